//! Attachment encoder boundary.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest side of an encoded attachment, in pixels.
pub const MAX_ATTACHMENT_DIMENSION: u32 = 800;

/// Lossy compression quality for encoded attachments (JPEG-equivalent).
pub const ATTACHMENT_QUALITY: f32 = 0.7;

/// An inline-storable encoded image: original file name plus the
/// encoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub data: String,
}

impl Attachment {
    /// Returns true if the attachment carries no usable content.
    pub fn is_empty(&self) -> bool {
        self.file_name.trim().is_empty() || self.data.is_empty()
    }
}

/// Encodes raw images into inline-storable attachments.
///
/// Implementations must cap the output at
/// [`MAX_ATTACHMENT_DIMENSION`] on the longest side (preserving aspect
/// ratio) and compress at roughly [`ATTACHMENT_QUALITY`]. A failure
/// must block the submission that needed the attachment; the caller's
/// previous state is untouched.
#[async_trait]
pub trait AttachmentEncoder: Send + Sync {
    /// Encodes a raw image file.
    async fn encode(&self, file_name: &str, bytes: &[u8]) -> Result<Attachment, DomainError>;
}

#[derive(Debug, Default)]
struct PassthroughState {
    fail_on_encode: bool,
}

/// Encoder that base64-encodes the input without downscaling.
///
/// Stands in for the real image pipeline in tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct PassthroughEncoder {
    state: Arc<RwLock<PassthroughState>>,
}

impl PassthroughEncoder {
    /// Creates a new passthrough encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the encoder to fail on the next encode call.
    pub fn set_fail_on_encode(&self, fail: bool) {
        self.state.write().unwrap().fail_on_encode = fail;
    }
}

#[async_trait]
impl AttachmentEncoder for PassthroughEncoder {
    async fn encode(&self, file_name: &str, bytes: &[u8]) -> Result<Attachment, DomainError> {
        if self.state.read().unwrap().fail_on_encode {
            return Err(DomainError::Encoding("encoder unavailable".to_string()));
        }
        if bytes.is_empty() {
            return Err(DomainError::Encoding("empty image payload".to_string()));
        }

        Ok(Attachment {
            file_name: file_name.to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}
