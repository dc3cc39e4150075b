//! Login / logout handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::SESSION_COOKIE;
use crate::state::AppState;
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub user: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Cookie attributes allow the front-end to live on another origin.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build()
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let handle = tokio::time::timeout(
        state.proxy.timeout(),
        state.connector.authenticate(&payload.username, &payload.password),
    )
    .await
    .map_err(|_| ApiError::LoginFailed("Upstream login timed out".to_string()))?
    .map_err(|e| ApiError::LoginFailed(e.login_reason()))?;

    // A fresh login replaces whatever session the browser still carries.
    if let Some(previous) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(previous.value());
    }

    let token = state.sessions.create(handle);
    info!(
        "User {} logged in (active sessions: {})",
        payload.username,
        state.sessions.len()
    );

    Ok((
        jar.add(session_cookie(token)),
        Json(LoginResponse {
            ok: true,
            user: payload.username,
        }),
    ))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value());
    }

    let removal = Cookie::build(SESSION_COOKIE)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None);

    (jar.remove(removal), Json(LogoutResponse { ok: true }))
}
