use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use uuid::Uuid;

/// Sending half of a client's outbound queue. Frames are already-serialized
/// JSON; the socket layer pumps the paired receiver into the transport.
pub type ClientChannel = UnboundedSender<String>;

/// Opaque handle for one attached client channel. Never reused.
pub type SessionId = Uuid;

/// The set of currently-attached client channels.
///
/// All mutation goes through `register`/`unregister` so the count can never
/// drift from the live set. `list` hands out a snapshot, so broadcast
/// iteration never holds the lock.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, ClientChannel>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Add a new session to the live set and return its id.
    ///
    /// # Panics
    ///
    /// * If the session `Mutex` is poisoned
    pub fn register(&self, channel: ClientChannel) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.lock().unwrap().insert(id, channel);
        debug!("Registered session {}", id);
        id
    }

    /// Remove a session if present. Unregistering an id that is already gone
    /// is a no-op; the return value says whether an entry was removed.
    ///
    /// # Panics
    ///
    /// * If the session `Mutex` is poisoned
    pub fn unregister(&self, id: SessionId) -> bool {
        let removed = self.sessions.lock().unwrap().remove(&id).is_some();
        if removed {
            debug!("Unregistered session {}", id);
        }
        removed
    }

    /// Snapshot of the live sessions for broadcast iteration.
    ///
    /// # Panics
    ///
    /// * If the session `Mutex` is poisoned
    pub fn list(&self) -> Vec<(SessionId, ClientChannel)> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .map(|(id, channel)| (*id, channel.clone()))
            .collect()
    }

    /// Current participant count.
    ///
    /// # Panics
    ///
    /// * If the session `Mutex` is poisoned
    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
