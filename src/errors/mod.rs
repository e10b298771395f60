//! Error handling module for the incident console.
//!
//! Provides the crate error type, its stable error codes, and the backend error envelope.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Missing or rejected bearer token
    Unauthorized(String),
    /// Authenticated, but the role does not allow the operation
    Forbidden(String),
    /// Row not found on the backend
    NotFound(String),
    /// Rejected input
    Validation(String),
    /// Any other non-2xx response
    Http { status: u16, message: String },
    /// Connection, timeout or transport failure
    Network(String),
    /// Response body did not match the expected shape
    Decode(String),
    /// Invalid configuration value
    Config(String),
    /// The collaborator does not offer this operation
    Unsupported(String),
}

impl AppError {
    /// Build an error from a non-2xx HTTP status and the backend's message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => AppError::Unauthorized(message),
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            400 | 422 => AppError::Validation(message),
            _ => AppError::Http { status, message },
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Forbidden(_) => codes::FORBIDDEN,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Http { .. } => codes::HTTP_ERROR,
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Unsupported(_) => codes::UNSUPPORTED,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Http { status, message } => format!("HTTP {}: {}", status, message),
            AppError::Network(msg) => msg.clone(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Unsupported(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Request error: {:?}", err);
        if err.is_decode() {
            AppError::Decode(format!("Response decode error: {}", err))
        } else if let Some(status) = err.status() {
            AppError::from_status(status.as_u16(), err.to_string())
        } else {
            AppError::Network(format!("Network error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

/// Error details in the backend's response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope returned by the backend on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details: None,
            },
        }
    }

    /// Pull a human-readable message out of an error body.
    ///
    /// Accepts the structured envelope, a bare `{"message": ...}` object, or plain text.
    pub fn message_from_body(body: &str) -> Option<String> {
        if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(body) {
            return Some(envelope.error.message);
        }
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
                return Some(msg.to_string());
            }
        }
        let trimmed = body.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            AppError::from_status(401, "no".into()).error_code(),
            codes::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from_status(403, "no".into()).error_code(),
            codes::FORBIDDEN
        );
        assert_eq!(
            AppError::from_status(404, "gone".into()).error_code(),
            codes::NOT_FOUND
        );
        assert_eq!(
            AppError::from_status(503, "down".into()),
            AppError::Http {
                status: 503,
                message: "down".into()
            }
        );
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::NotFound("Incident 7 not found".into());
        assert_eq!(err.to_string(), "NOT_FOUND: Incident 7 not found");
    }

    #[test]
    fn test_message_from_envelope() {
        let body = r#"{"success":false,"error":{"code":"NOT_FOUND","message":"Incident 3 not found"}}"#;
        assert_eq!(
            ErrorResponse::message_from_body(body).as_deref(),
            Some("Incident 3 not found")
        );
    }

    #[test]
    fn test_message_from_plain_bodies() {
        assert_eq!(
            ErrorResponse::message_from_body(r#"{"message":"Token inválido"}"#).as_deref(),
            Some("Token inválido")
        );
        assert_eq!(
            ErrorResponse::message_from_body("  boom \n").as_deref(),
            Some("boom")
        );
        assert_eq!(ErrorResponse::message_from_body("   "), None);
    }
}
