//! Client error types

use crate::types::ErrorBody;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Server answered 2xx but the envelope reported failure
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from an HTTP status code and the raw response body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.message,
            Err(_) => Some(body.trim().to_string()).filter(|text| !text.is_empty()),
        };

        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Whether the server answered 401
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Human-readable message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } | Self::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}
