use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::models::InboundMessage;
use crate::utils::scope_guard::ScopeGuard;
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_update_handler::handle_update_message;
use crate::AppState;

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    // Split the socket into sender and receiver
    let (mut sink, mut stream) = socket.split();

    // Outbound frames for this client queue here; the registry holds the
    // sending half so broadcasts never touch the socket directly.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let session_id = app_state.coordinator.handle_attach(tx.clone());
    info!("WebSocket connection established with session_id: {}", session_id);

    // Detach must run exactly once, on every exit path out of this function,
    // including cancellation of the whole connection future.
    let coordinator = app_state.coordinator.clone();
    let _detach = ScopeGuard::new(move || coordinator.handle_detach(session_id));

    // Pump queued frames out to the client as a separate asynchronous task.
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    // Read inbound frames until the transport closes. End-of-stream and read
    // errors both mean the client is gone and end the session.
    while let Some(Ok(message)) = stream.next().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        // Parse the incoming frame as JSON
        let inbound: InboundMessage = match serde_json::from_str(&text) {
            Ok(inbound) => inbound,
            Err(e) => {
                warn!("Dropping unparseable frame from session {}: {}", session_id, e);
                continue;
            }
        };

        // Handle different message types
        match inbound {
            InboundMessage::Update(update_msg) => {
                handle_update_message(&update_msg, session_id, &app_state.coordinator);
            }
            InboundMessage::Ping => {
                handle_ping_message(session_id, &tx);
            }
        }
    }

    send_task.abort();
    info!("WebSocket connection terminated for session {}", session_id);
}
