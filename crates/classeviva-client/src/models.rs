use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub ident: Option<&'a str>,
    pub pass: &'a str,
    pub uid: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub ident: String,
    pub token: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub expire: Option<String>,
}

/// Error body returned by the upstream on 4xx/5xx.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpstreamErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authenticated upstream identity.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Full ident as returned by the upstream, e.g. `S1234567X`.
    pub ident: String,
    /// Numeric part of the ident used in resource paths.
    pub student_id: String,
    pub token: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Upstream token expiry, verbatim.
    pub expire: Option<String>,
}

/// Keep only the digits of an ident (`S1234567X` -> `1234567`).
pub fn student_id_from_ident(ident: &str) -> Option<String> {
    let digits: String = ident.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
