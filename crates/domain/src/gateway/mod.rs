//! External collaborators, consumed through trait boundaries.

mod attachment;
mod identity;

pub use attachment::{
    ATTACHMENT_QUALITY, Attachment, AttachmentEncoder, MAX_ATTACHMENT_DIMENSION,
    PassthroughEncoder,
};
pub use identity::{IdentityProvider, StaticIdentity};
