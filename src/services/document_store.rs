use std::sync::Mutex;

use serde_json::Value;

use crate::models::{DocumentPatch, PayloadError, SharedDocument};

/// The single authoritative copy of the shared document.
///
/// All writes go through [`DocumentStore::apply`], which validates the
/// partial before taking the lock: a malformed request never mutates state.
/// The lock is held only for the merge or the snapshot clone, never while
/// the result is being fanned out to clients.
pub struct DocumentStore {
    inner: Mutex<SharedDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SharedDocument::default()),
        }
    }

    /// Snapshot read of the current document.
    ///
    /// # Panics
    ///
    /// * If the document `Mutex` is poisoned
    pub fn get(&self) -> SharedDocument {
        self.inner.lock().unwrap().clone()
    }

    /// Merge the fields present in `partial` into the stored document and
    /// return the resulting full document. Absent fields are untouched.
    ///
    /// # Errors
    ///
    /// * `PayloadError::InvalidPayload` if a supplied field has the wrong
    ///   shape; the stored document is left unchanged
    ///
    /// # Panics
    ///
    /// * If the document `Mutex` is poisoned
    pub fn apply(&self, partial: &Value) -> Result<SharedDocument, PayloadError> {
        let patch = DocumentPatch::from_value(partial)?;

        let mut doc = self.inner.lock().unwrap();
        doc.merge(patch);
        Ok(doc.clone())
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_update_keeps_other_fields() {
        let store = DocumentStore::new();
        store
            .apply(&json!({"text": "old", "image": "img1", "files": ["f1"]}))
            .unwrap();

        let doc = store.apply(&json!({"text": "hello"})).unwrap();

        assert_eq!(doc.text, "hello");
        assert_eq!(doc.image, "img1");
        assert_eq!(doc.files, vec![json!("f1")]);
        assert_eq!(store.get(), doc);
    }

    #[test]
    fn invalid_partial_does_not_mutate() {
        let store = DocumentStore::new();
        store.apply(&json!({"files": ["f1"]})).unwrap();

        let err = store.apply(&json!({"text": "new", "files": "not-a-list"}));

        assert!(err.is_err());
        let doc = store.get();
        assert_eq!(doc.text, "");
        assert_eq!(doc.files, vec![json!("f1")]);
    }

    #[test]
    fn empty_partial_is_a_no_op() {
        let store = DocumentStore::new();
        store.apply(&json!({"text": "keep"})).unwrap();

        let doc = store.apply(&json!({})).unwrap();

        assert_eq!(doc.text, "keep");
    }
}
