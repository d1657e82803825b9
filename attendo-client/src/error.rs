//! Client error types

use thiserror::Error;

/// Fallback shown when the server gives no message
pub const GENERIC_FAILURE: &str = "Please try again.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (HTTP 401)
    #[error("Authentication required")]
    Unauthorized,

    /// No session token available for an authenticated call
    #[error("Not logged in")]
    NotLoggedIn,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (HTTP 400 or local form check)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status, carrying the server's message
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token store I/O failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message suitable for a user-facing alert
    ///
    /// Server-provided text wins; transport failures fall back to
    /// [`GENERIC_FAILURE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Forbidden(m) | Self::NotFound(m) | Self::Validation(m) if !m.is_empty() => {
                m.clone()
            }
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Unauthorized => "Session expired. Please log in again.".to_string(),
            Self::NotLoggedIn => "Please log in first.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Local password-change form errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("New passwords do not match.")]
    Mismatch,
    #[error("Password must be at least {0} characters long.")]
    TooShort(usize),
}

impl From<PasswordError> for ClientError {
    fn from(err: PasswordError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::Validation("Insufficient leave balance".into());
        assert_eq!(err.user_message(), "Insufficient leave balance");

        let err = ClientError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert!(ClientError::Unauthorized.is_unauthorized());
    }
}
