use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use classeviva_client::ClientError;
use serde::Serialize;
use thiserror::Error;

use crate::session::SessionError;

pub const NOT_LOGGED_IN: &str = "not logged in";
pub const SESSION_EXPIRED: &str = "session expired";

const UPSTREAM_DETAIL: &str = "upstream service error";
const INTERNAL_DETAIL: &str = "internal error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Internal failure: {0}")]
    InternalFailure(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::LoginFailed(_) | ApiError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            ApiError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Failures of an authenticated resource fetch.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        if err.is_upstream() {
            ApiError::UpstreamFailure(err.to_string())
        } else {
            ApiError::InternalFailure(err.to_string())
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Unauthenticated => ApiError::AuthRequired(NOT_LOGGED_IN.to_string()),
            SessionError::Expired => ApiError::AuthRequired(SESSION_EXPIRED.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn internal() -> Self {
        Self {
            detail: INTERNAL_DETAIL.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::LoginFailed(msg) => {
                tracing::warn!("Login failed: {}", msg);
                msg
            }
            ApiError::AuthRequired(msg) => {
                tracing::debug!("Authentication required: {}", msg);
                msg
            }
            ApiError::UpstreamFailure(msg) => {
                tracing::error!("Upstream failure: {}", msg);
                UPSTREAM_DETAIL.to_string()
            }
            ApiError::InternalFailure(msg) => {
                tracing::error!("Internal failure: {}", msg);
                INTERNAL_DETAIL.to_string()
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                msg
            }
            ApiError::NotFound(msg) => msg,
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
