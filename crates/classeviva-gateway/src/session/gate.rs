use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use super::SessionStore;
use crate::state::AppState;
use crate::upstream::ClientHandle;
use crate::utils::error::{ApiError, NOT_LOGGED_IN};

pub const SESSION_COOKIE: &str = "session_id";

/// Resolve an optional session token to its client handle, renewing it.
pub fn authorize<H: Clone>(store: &SessionStore<H>, token: Option<&str>) -> Result<H, ApiError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::AuthRequired(NOT_LOGGED_IN.to_string()))?;
    Ok(store.touch(token)?)
}

/// Extractor for routes behind the session cookie.
pub struct Authenticated(pub ClientHandle);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(|c| c.value());
        let handle = authorize(state.sessions.as_ref(), token)?;
        tracing::debug!("Session validated for {}", handle.username());
        Ok(Authenticated(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SESSION_EXPIRED;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_missing_token() {
        let store: SessionStore<u8> = SessionStore::new(Duration::from_secs(60));
        for token in [None, Some("")] {
            match authorize(&store, token) {
                Err(ApiError::AuthRequired(msg)) => assert_eq!(msg, NOT_LOGGED_IN),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_expired_token() {
        let store: SessionStore<u8> = SessionStore::new(Duration::from_secs(60));
        let token = store.create_at(7, Utc::now() - chrono::Duration::seconds(120));
        match authorize(&store, Some(&token)) {
            Err(ApiError::AuthRequired(msg)) => assert_eq!(msg, SESSION_EXPIRED),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_valid_token() {
        let store: SessionStore<u8> = SessionStore::new(Duration::from_secs(60));
        let token = store.create(7);
        assert_eq!(authorize(&store, Some(&token)).unwrap(), 7);
    }
}
