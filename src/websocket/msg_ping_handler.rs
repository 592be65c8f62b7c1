use chrono::Utc;
use tracing::{debug, error};

use crate::models::{OutboundMessage, PongMessage};
use crate::services::session_registry::{ClientChannel, SessionId};

/// Handle a ping frame - reply with a pong to the requesting endpoint only
pub fn handle_ping_message(session_id: SessionId, channel: &ClientChannel) {
    debug!("Ping frame received from session {}", session_id);

    let pong = OutboundMessage::Pong(PongMessage {
        date: Utc::now().to_rfc3339(),
    });
    if channel.send(serde_json::to_string(&pong).unwrap()).is_err() {
        error!("Failed to queue pong for session {}", session_id);
    }
}
