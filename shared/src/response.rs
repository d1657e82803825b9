//! API Response types
//!
//! Envelope structures returned by the HR backend

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// Every resource endpoint wraps its payload:
/// ```json
/// {
///     "data": { ... },
///     "message": "optional human-readable text"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response payload
    pub data: T,
    /// Human-readable message (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a response carrying data only
    pub fn ok(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Unwrap the payload
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Error body returned on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_message() {
        let resp: ApiResponse<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2,3]}"#).unwrap();
        assert_eq!(resp.data, vec![1, 2, 3]);
        assert!(resp.message.is_none());
    }

    #[test]
    fn test_error_body_tolerates_extra_fields() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Invalid credentials","stack":"..."}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid credentials"));
    }
}
