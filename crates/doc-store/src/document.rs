use serde::de::DeserializeOwned;

/// A stored document: an ID plus a JSON payload.
///
/// The store is schemaless at this seam; typed domain structs are
/// decoded from the payload at the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document ID within its collection.
    pub id: String,

    /// The document payload. Always a JSON object for stored documents.
    pub data: serde_json::Value,
}

impl Document {
    /// Creates a document from an ID and payload.
    pub fn new(id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decodes the payload into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        name: String,
        count: u32,
    }

    #[test]
    fn decode_typed_payload() {
        let doc = Document::new("w-1", serde_json::json!({"name": "gear", "count": 3}));
        let widget: Widget = doc.decode().unwrap();
        assert_eq!(
            widget,
            Widget {
                name: "gear".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn decode_mismatched_payload_fails() {
        let doc = Document::new("w-1", serde_json::json!({"name": 12}));
        assert!(doc.decode::<Widget>().is_err());
    }
}
