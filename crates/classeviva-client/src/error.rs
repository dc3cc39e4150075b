//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Username and password are required")]
    MissingCredentials,

    /// The upstream refused the login (bad credentials, locked account, ...).
    #[error("Login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The upstream answered with an error-range status.
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed upstream payload: {0}")]
    Decode(String),

    #[error("Cannot derive student id from ident {0:?}")]
    InvalidIdentity(String),

    #[error("Missing request parameters for {0}")]
    MissingParams(&'static str),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// True when the failure happened while talking to the upstream, as opposed
    /// to a local formatting problem.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClientError::Rejected { .. }
                | ClientError::Status { .. }
                | ClientError::Transport(_)
                | ClientError::Decode(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }

    /// Reason safe to hand back to the caller after a failed login.
    pub fn login_reason(&self) -> String {
        match self {
            ClientError::MissingCredentials => self.to_string(),
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::Transport(e) if e.is_timeout() => "Upstream login timed out".to_string(),
            ClientError::Transport(_) => "Upstream unreachable".to_string(),
            _ => "Upstream login failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let rejected = ClientError::Rejected {
            status: 422,
            message: "Credenziali errate".to_string(),
        };
        assert!(rejected.is_upstream());
        assert_eq!(rejected.login_reason(), "Credenziali errate");

        let local = ClientError::InvalidIdentity("SX".to_string());
        assert!(!local.is_upstream());
        assert!(!local.is_timeout());
        assert_eq!(local.login_reason(), "Upstream login failed");
    }
}
