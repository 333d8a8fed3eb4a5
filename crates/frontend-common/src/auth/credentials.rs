//! Persisted copy of the session credentials

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use cms_admin_http::types::AdminUser;
use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Token and user as stored between page loads
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub token: String,
    pub user: AdminUser,
}

/// Durable key/value home for the credential pair
pub trait CredentialStore {
    /// Last written record, or `None` if never written, cleared, or partially present
    fn read(&self) -> Option<CredentialRecord>;

    /// Persist both halves of the record
    fn write(&self, record: &CredentialRecord);

    /// Remove both halves; safe to call when nothing is stored
    fn clear(&self);
}

/// `localStorage`-backed store using two independent keys
#[derive(Clone, Debug)]
pub struct LocalStorageCredentials {
    token_key: String,
    user_key: String,
}

impl LocalStorageCredentials {
    pub fn new(token_key: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            token_key: token_key.into(),
            user_key: user_key.into(),
        }
    }
}

impl CredentialStore for LocalStorageCredentials {
    fn read(&self) -> Option<CredentialRecord> {
        let token: String = LocalStorage::get(&self.token_key).ok()?;
        let user: AdminUser = match LocalStorage::get(&self.user_key) {
            Ok(user) => user,
            Err(error) => {
                tracing::debug!(%error, "Stored user record unreadable; ignoring credentials");
                return None;
            }
        };
        Some(CredentialRecord { token, user })
    }

    fn write(&self, record: &CredentialRecord) {
        // Both keys are written in the same synchronous turn, so no reader can
        // observe only one of them.
        if let Err(error) = LocalStorage::set(&self.user_key, &record.user) {
            tracing::warn!(%error, "Failed to persist user record");
            return;
        }
        if let Err(error) = LocalStorage::set(&self.token_key, &record.token) {
            tracing::warn!(%error, "Failed to persist token");
            LocalStorage::delete(&self.user_key);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.token_key);
        LocalStorage::delete(&self.user_key);
    }
}

/// In-memory store for tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    slot: RefCell<Option<CredentialRecord>>,
}

impl MemoryCredentials {
    pub fn with_record(record: CredentialRecord) -> Self {
        Self {
            slot: RefCell::new(Some(record)),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn read(&self) -> Option<CredentialRecord> {
        self.slot.borrow().clone()
    }

    fn write(&self, record: &CredentialRecord) {
        *self.slot.borrow_mut() = Some(record.clone());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Expiry (`exp`, seconds since the epoch) embedded in a JWT-shaped token
pub fn token_expiry(token: &str) -> Option<f64> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    claim.exp
}

/// Whether `token` had expired at `now` (seconds since the epoch).
///
/// Unparsable tokens and tokens without an `exp` claim count as expired.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let now = now as f64;
    token_expiry(token).is_none_or(|exp| exp <= now)
}

/// Offline expiry check against the local clock; not a substitute for asking the server
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, chrono::Utc::now().timestamp())
}
