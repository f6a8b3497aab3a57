use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::schema::Id;

/// Longest session lifetime honoured, about ten years.
pub const MAX_SESSION_HOURS: u64 = 24 * 365 * 10;

/// In-memory login sessions, keyed by an opaque random token.
/// Entries expire after the configured lifetime and vanish on restart.
pub struct SessionStore {
    sessions: HashMap<String, (Instant, Id)>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(hours: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: Duration::from_secs(hours.min(MAX_SESSION_HOURS) * 3600),
        }
    }

    /// Create a new session for a user. Returns the session token.
    pub fn create(&mut self, user_id: Id) -> String {
        self.clear_stale();
        let token = generate_token();
        self.sessions
            .insert(token.clone(), (Instant::now() + self.ttl, user_id));
        token
    }

    /// The user behind a live session.
    pub fn user_id(&self, token: &str) -> Option<Id> {
        self.sessions
            .get(token)
            .filter(|(expires_at, _)| *expires_at > Instant::now())
            .map(|(_, user_id)| *user_id)
    }

    /// Delete a session by token. Returns whether it existed.
    pub fn remove(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn clear_stale(&mut self) {
        let now = Instant::now();
        self.sessions.retain(|_, (expires_at, _)| *expires_at > now);
    }
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(name: &str, token: &str, max_age_hours: u64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        name,
        token,
        max_age_hours.min(MAX_SESSION_HOURS) * 3600
    )
}

pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", name)
}
