use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::RngCore;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Token entropy in bytes (256 bits).
const TOKEN_BYTES: usize = 32;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("no session for token")]
    Unauthenticated,

    #[error("session expired")]
    Expired,
}

struct Session<H> {
    handle: H,
    expires_at: DateTime<Utc>,
}

/// In-process session table keyed by opaque token.
///
/// Every operation takes the table lock once and never awaits while holding
/// it. Expired entries are evicted lazily, on the `touch` that finds them.
pub struct SessionStore<H> {
    sessions: Mutex<HashMap<String, Session<H>>>,
    ttl: chrono::Duration,
}

impl<H: Clone> SessionStore<H> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    pub fn create(&self, handle: H) -> String {
        self.create_at(handle, Utc::now())
    }

    pub fn create_at(&self, handle: H, now: DateTime<Utc>) -> String {
        let token = generate_token();
        let session = Session {
            handle,
            expires_at: self.expiry_from(now),
        };
        self.sessions.lock().insert(token.clone(), session);
        debug!("Created session (active: {})", self.len());
        token
    }

    /// Validate a token, sliding its expiry forward by one TTL.
    pub fn touch(&self, token: &str) -> Result<H, SessionError> {
        self.touch_at(token, Utc::now())
    }

    pub fn touch_at(&self, token: &str, now: DateTime<Utc>) -> Result<H, SessionError> {
        let mut sessions = self.sessions.lock();

        let session = sessions.get_mut(token).ok_or(SessionError::Unauthenticated)?;
        if session.expires_at < now {
            sessions.remove(token);
            debug!("Session expired, evicted");
            return Err(SessionError::Expired);
        }

        session.expires_at = self.expiry_from(now);
        Ok(session.handle.clone())
    }

    /// Expiry of a live entry, read without renewing it.
    pub fn expires_at(&self, token: &str) -> Option<DateTime<Utc>> {
        self.sessions.lock().get(token).map(|s| s.expires_at)
    }

    pub fn remove(&self, token: &str) {
        if self.sessions.lock().remove(token).is_some() {
            debug!("Removed session");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
