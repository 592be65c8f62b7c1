use std::sync::Arc;

use tracing::{debug, error};

use crate::models::OutboundMessage;
use crate::services::session_registry::SessionRegistry;

/// Fans a message out to every live session.
///
/// The message is serialized once; each send is attempted independently, so
/// one broken channel never blocks or aborts delivery to the others. A
/// failed send means the receiving side is gone: the session is handed back
/// to the registry for removal instead of being retried.
pub struct Broadcaster {
    registry: Arc<SessionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `message` to every registered session. Returns how many dead
    /// sessions were pruned along the way.
    pub fn broadcast(&self, message: &OutboundMessage) -> usize {
        let frame = match serde_json::to_string(message) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to serialize broadcast frame: {}", e);
                return 0;
            }
        };

        let mut pruned = 0;
        for (id, channel) in self.registry.list() {
            if channel.send(frame.clone()).is_err() && self.registry.unregister(id) {
                debug!("Pruned dead session {} during broadcast", id);
                pruned += 1;
            }
        }
        pruned
    }
}
