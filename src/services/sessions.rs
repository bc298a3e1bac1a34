//! In-memory session store
//!
//! Sessions are process-local and not persisted. Each one carries the
//! visit-dedup marker and at most one logged-in username. The visit
//! counter consumes only the "already counted?" / "mark counted" pair,
//! never the session storage itself.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct Session {
    counted_visit: bool,
    username: Option<String>,
}

#[derive(Default)]
pub struct SessionsService {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a session id, creating a fresh session when the token is
    /// absent or unknown. Returns the id and whether it was created.
    pub async fn ensure(&self, token: Option<Uuid>) -> (Uuid, bool) {
        let mut sessions = self.sessions.write().await;
        if let Some(id) = token {
            if sessions.contains_key(&id) {
                return (id, false);
            }
        }
        let id = Uuid::new_v4();
        sessions.insert(id, Session::default());
        (id, true)
    }

    pub async fn visit_counted(&self, id: &Uuid) -> bool {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|s| s.counted_visit)
            .unwrap_or(false)
    }

    pub async fn mark_visit_counted(&self, id: &Uuid) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.counted_visit = true;
        }
    }

    pub async fn login(&self, id: &Uuid, username: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.username = Some(username.to_string());
        }
    }

    /// Clear the logged-in user but keep the visit-counted marker, so a
    /// session is never counted twice across a logout.
    pub async fn logout(&self, id: &Uuid) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.username = None;
        }
    }

    pub async fn current_user(&self, id: &Uuid) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(id)
            .and_then(|s| s.username.clone())
    }
}
