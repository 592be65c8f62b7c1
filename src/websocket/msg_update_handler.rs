use serde_json::Value;
use tracing::{info, warn};

use crate::models::InboundUpdate;
use crate::services::coordinator::UpdateCoordinator;
use crate::services::session_registry::SessionId;

/// Handle an update frame received on the push channel
pub fn handle_update_message(
    update_msg: &InboundUpdate,
    session_id: SessionId,
    coordinator: &UpdateCoordinator,
) {
    info!("Update frame received from session {}", session_id);

    let partial = Value::Object(update_msg.partial.clone());
    if let Err(e) = coordinator.handle_update(&partial) {
        // A malformed frame only affects its sender; the connection stays up.
        warn!("Rejected update from session {}: {}", session_id, e);
    }
}
