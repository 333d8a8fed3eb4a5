//! Wire types for the admin API

use crate::client::error::ClientError;
use serde::{Deserialize, Serialize};

/// Standard `{success, data, message}` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, treating `success: false` or a missing `data` as a rejection
    pub fn into_data(self) -> Result<T, ClientError> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(ClientError::Rejected {
                message: self.message,
            }),
        }
    }
}

/// Administrator account as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default, alias = "is2FAVerified")]
    pub is_two_factor_verified: bool,
    #[serde(default)]
    pub is_active: bool,
}

impl AdminUser {
    /// "First Last", falling back to the email when both names are blank
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Email/password login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub message: Option<String>,
    pub admin: AdminUser,
    pub token: String,
}

/// Error body shape used by the API for non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
