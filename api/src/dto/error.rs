//! Error response payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by every failing endpoint.
///
/// `code` is a stable machine-readable identifier; `message` is for humans
/// and may change without notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,

    pub message: String,

    /// When the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_wire_format() {
        let response = ErrorResponse::new("invalid_credentials", "Invalid email or password");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["code"], "invalid_credentials");
        assert_eq!(value["message"], "Invalid email or password");
        assert!(value["timestamp"].is_string());
    }
}
