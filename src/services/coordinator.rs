use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::models::{
    InitMessage, OutboundMessage, PayloadError, SharedDocument, UpdateMessage, UserCountMessage,
};
use crate::services::broadcaster::Broadcaster;
use crate::services::document_store::DocumentStore;
use crate::services::session_registry::{ClientChannel, SessionId, SessionRegistry};

/// Orchestrates the session lifecycle and the update fan-out.
///
/// A session moves from accepted to registered in `handle_attach` and is
/// broadcast-eligible until `handle_detach` removes it; a detached id is
/// never reused, and frames addressed to it after removal fail the send and
/// are dropped. The document lock is released before any broadcast starts,
/// so a stalled client can never stall the next writer.
pub struct UpdateCoordinator {
    store: Arc<DocumentStore>,
    registry: Arc<SessionRegistry>,
    broadcaster: Broadcaster,
}

impl UpdateCoordinator {
    pub fn new(store: Arc<DocumentStore>, registry: Arc<SessionRegistry>) -> Self {
        let broadcaster = Broadcaster::new(registry.clone());
        Self {
            store,
            registry,
            broadcaster,
        }
    }

    /// Register a new client channel, send it the current snapshot, and
    /// announce the new participant count to everyone.
    pub fn handle_attach(&self, channel: ClientChannel) -> SessionId {
        let id = self.registry.register(channel.clone());
        let users = self.registry.count();
        info!("Client attached as session {}, {} participant(s) online", id, users);

        let doc = self.store.get();
        let init = OutboundMessage::Init(InitMessage {
            text: doc.text,
            image: doc.image,
            files: doc.files,
            users,
        });
        if channel.send(serde_json::to_string(&init).unwrap()).is_err() {
            // Channel already gone; the count broadcast below will prune it.
            warn!("Session {} closed before the initial snapshot was queued", id);
        }

        self.broadcast_user_count();
        id
    }

    /// Remove a session. Announces the new count only if the session was
    /// still registered, so a second detach for the same id is a no-op.
    pub fn handle_detach(&self, id: SessionId) {
        if self.registry.unregister(id) {
            info!(
                "Session {} detached, {} participant(s) online",
                id,
                self.registry.count()
            );
            self.broadcast_user_count();
        }
    }

    /// Apply a partial update to the shared document and push the resulting
    /// state to every live session.
    ///
    /// # Errors
    ///
    /// * `PayloadError::InvalidPayload` if the partial is malformed; nothing
    ///   is broadcast and the document is unchanged
    pub fn handle_update(&self, partial: &Value) -> Result<SharedDocument, PayloadError> {
        let doc = self.store.apply(partial)?;

        let update = OutboundMessage::Update(UpdateMessage {
            text: doc.text.clone(),
            image: doc.image.clone(),
            files: doc.files.clone(),
        });
        if self.broadcaster.broadcast(&update) > 0 {
            self.broadcast_user_count();
        }

        Ok(doc)
    }

    /// Snapshot read of the shared document.
    pub fn snapshot(&self) -> SharedDocument {
        self.store.get()
    }

    /// Current participant count.
    pub fn user_count(&self) -> usize {
        self.registry.count()
    }

    /// Announce the participant count to every live session. A round that
    /// prunes dead sessions changes the count again, so repeat until a round
    /// prunes nothing; each extra round removed at least one session, so
    /// this terminates.
    fn broadcast_user_count(&self) {
        loop {
            let users = self.registry.count();
            let pruned = self
                .broadcaster
                .broadcast(&OutboundMessage::UserCount(UserCountMessage { users }));
            if pruned == 0 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn coordinator() -> UpdateCoordinator {
        UpdateCoordinator::new(
            Arc::new(DocumentStore::new()),
            Arc::new(SessionRegistry::new()),
        )
    }

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }

    #[test]
    fn attach_delivers_one_init_with_snapshot_and_count() {
        let coordinator = coordinator();
        coordinator
            .handle_update(&json!({"text": "hello", "files": ["f1"]}))
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        coordinator.handle_attach(tx);

        let frames = drain(&mut rx);
        let inits: Vec<_> = frames.iter().filter(|f| f["type"] == "init").collect();
        assert_eq!(inits.len(), 1);
        assert_eq!(inits[0]["text"], "hello");
        assert_eq!(inits[0]["files"], json!(["f1"]));
        assert_eq!(inits[0]["users"], 1);

        // The count announcement reaches the new session too.
        assert!(frames.iter().any(|f| f["type"] == "users" && f["users"] == 1));
    }

    #[test]
    fn attach_announces_count_to_existing_sessions() {
        let coordinator = coordinator();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        coordinator.handle_attach(tx_a);
        drain(&mut rx_a);

        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        coordinator.handle_attach(tx_b);

        let frames = drain(&mut rx_a);
        assert!(frames.iter().any(|f| f["type"] == "users" && f["users"] == 2));
    }

    #[test]
    fn count_follows_attach_and_detach() {
        let coordinator = coordinator();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();

        let a = coordinator.handle_attach(tx_a);
        let b = coordinator.handle_attach(tx_b);
        assert_eq!(coordinator.user_count(), 2);

        coordinator.handle_detach(a);
        assert_eq!(coordinator.user_count(), 1);
        coordinator.handle_detach(b);
        assert_eq!(coordinator.user_count(), 0);
    }

    #[test]
    fn double_detach_does_not_double_decrement() {
        let coordinator = coordinator();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let a = coordinator.handle_attach(tx_a);
        coordinator.handle_attach(tx_b);
        drain(&mut rx_b);

        coordinator.handle_detach(a);
        assert_eq!(coordinator.user_count(), 1);
        assert_eq!(drain(&mut rx_b).len(), 1);

        // Second detach for the same id: no count change, no announcement.
        coordinator.handle_detach(a);
        assert_eq!(coordinator.user_count(), 1);
        assert!(drain(&mut rx_b).is_empty());
    }

    #[test]
    fn update_survives_a_broken_channel() {
        let coordinator = coordinator();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        let (tx_c, mut rx_c) = mpsc::unbounded_channel();
        coordinator.handle_attach(tx_a);
        coordinator.handle_attach(tx_b);
        coordinator.handle_attach(tx_c);
        drain(&mut rx_a);
        drain(&mut rx_c);

        // One of the three transports dies without a clean detach.
        drop(rx_b);

        coordinator.handle_update(&json!({"text": "still going"})).unwrap();

        assert_eq!(coordinator.user_count(), 2);
        for rx in [&mut rx_a, &mut rx_c] {
            let frames = drain(rx);
            let updates: Vec<_> = frames.iter().filter(|f| f["type"] == "update").collect();
            assert_eq!(updates.len(), 1);
            assert_eq!(updates[0]["text"], "still going");
            // Survivors learn the corrected count.
            assert!(frames.iter().any(|f| f["type"] == "users" && f["users"] == 2));
        }
    }

    #[test]
    fn invalid_payload_broadcasts_nothing() {
        let coordinator = coordinator();
        let (tx, mut rx) = mpsc::unbounded_channel();
        coordinator.handle_attach(tx);
        drain(&mut rx);

        let result = coordinator.handle_update(&json!({"files": "not-a-list"}));

        assert!(result.is_err());
        assert!(drain(&mut rx).is_empty());
        assert_eq!(coordinator.snapshot().files, Vec::<Value>::new());
    }

    #[test]
    fn concurrent_updates_settle_on_exactly_one_writer() {
        let coordinator = Arc::new(coordinator());
        let (tx, mut rx) = mpsc::unbounded_channel();
        coordinator.handle_attach(tx);
        drain(&mut rx);

        let handles: Vec<_> = ["A", "B"]
            .into_iter()
            .map(|text| {
                let coordinator = coordinator.clone();
                std::thread::spawn(move || {
                    coordinator.handle_update(&json!({ "text": text })).unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = coordinator.snapshot().text;
        assert!(text == "A" || text == "B");

        // Exactly one update frame per call, each a full post-apply state.
        let frames = drain(&mut rx);
        let texts: Vec<_> = frames
            .iter()
            .filter(|f| f["type"] == "update")
            .map(|f| f["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&"A".to_string()));
        assert!(texts.contains(&"B".to_string()));
    }
}
