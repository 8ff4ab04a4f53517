//! Error taxonomy for calls to the planning backend
//!
//! - validation: caught client-side, never sent
//! - 4xx: surfaced immediately, never retried
//! - 5xx and transport failures: retryable up to the policy's ceiling

use climate_model::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    /// 5xx responses and transport-level failures
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => (500..=599).contains(status),
            ApiError::RequestFailed(_) => true,
            _ => false,
        }
    }

    /// Text for the transient notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Status { status, message } => match status {
                400 => "Invalid request. Please check your input.".to_string(),
                401 => "Authentication failed. Please log in again.".to_string(),
                403 => "Access denied.".to_string(),
                404 => "Resource not found.".to_string(),
                429 => "Too many requests. Please try again later.".to_string(),
                500 => "Server error. Please try again later.".to_string(),
                _ => message.clone(),
            },
            ApiError::RequestFailed(_) => "Server error. Please try again later.".to_string(),
            ApiError::ParseError(_) | ApiError::InvalidConfig(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

/// Pull the backend's explanation out of an error body: `message`, then
/// `detail`, then the raw text.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        v.get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| match v.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
    });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() && parsed.is_none() => body.trim().to_string(),
        None => fallback.to_string(),
    }
}
