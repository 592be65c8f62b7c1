use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::PayloadError;

/// The single shared document all connected clients edit together.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
pub struct SharedDocument {
    pub text: String,
    pub image: String,
    #[schema(value_type = Vec<Object>)]
    pub files: Vec<Value>,
}

impl SharedDocument {
    /// Merge a validated patch into this document. Fields absent from the
    /// patch keep their current value.
    pub fn merge(&mut self, patch: DocumentPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(files) = patch.files {
            self.files = files;
        }
    }
}

/// A partial update request: only the fields the client supplied.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub text: Option<String>,
    pub image: Option<String>,
    pub files: Option<Vec<Value>>,
}

impl DocumentPatch {
    /// Validate a raw request mapping. Unknown keys are ignored; a known key
    /// carrying the wrong shape rejects the whole request before any state
    /// is touched.
    pub fn from_value(partial: &Value) -> Result<Self, PayloadError> {
        let map = partial.as_object().ok_or_else(|| {
            PayloadError::InvalidPayload("request body must be a JSON object".to_string())
        })?;

        let mut patch = DocumentPatch::default();

        if let Some(text) = map.get("text") {
            let text = text.as_str().ok_or_else(|| {
                PayloadError::InvalidPayload("'text' must be a string".to_string())
            })?;
            patch.text = Some(text.to_string());
        }

        if let Some(image) = map.get("image") {
            let image = image.as_str().ok_or_else(|| {
                PayloadError::InvalidPayload("'image' must be a string".to_string())
            })?;
            patch.image = Some(image.to_string());
        }

        if let Some(files) = map.get("files") {
            let files = files.as_array().ok_or_else(|| {
                PayloadError::InvalidPayload("'files' must be an array".to_string())
            })?;
            patch.files = Some(files.clone());
        }

        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_picks_up_only_present_fields() {
        let patch = DocumentPatch::from_value(&json!({"text": "hello"})).unwrap();
        assert_eq!(patch.text.as_deref(), Some("hello"));
        assert!(patch.image.is_none());
        assert!(patch.files.is_none());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let patch =
            DocumentPatch::from_value(&json!({"text": "a", "color": "red", "users": 7})).unwrap();
        assert_eq!(patch.text.as_deref(), Some("a"));
    }

    #[test]
    fn files_must_be_an_array() {
        let err = DocumentPatch::from_value(&json!({"files": "not-a-list"})).unwrap_err();
        assert!(err.to_string().contains("'files'"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(DocumentPatch::from_value(&json!("just a string")).is_err());
        assert!(DocumentPatch::from_value(&json!(42)).is_err());
    }

    #[test]
    fn merge_leaves_absent_fields_untouched() {
        let mut doc = SharedDocument {
            text: "old".to_string(),
            image: "img1".to_string(),
            files: vec![json!("f1")],
        };
        doc.merge(DocumentPatch {
            text: Some("hello".to_string()),
            ..Default::default()
        });
        assert_eq!(doc.text, "hello");
        assert_eq!(doc.image, "img1");
        assert_eq!(doc.files, vec![json!("f1")]);
    }
}
