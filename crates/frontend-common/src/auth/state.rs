//! Session state and its transition table

use super::credentials::CredentialRecord;
use cms_admin_http::types::AdminUser;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Process-wide authentication state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<AdminUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Coarse state the route guards switch on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Unauthenticated,
    Authenticated,
}

/// Every way the session state may change
#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    LoginPending,
    LoginFulfilled { user: AdminUser, token: String },
    LoginRejected(String),
    LogoutPending,
    LogoutFulfilled,
    LogoutRejected,
    SilentCheckPending,
    SilentCheckFulfilled(AdminUser),
    SilentCheckRejected,
    PatchProfile(UserPatch),
    ClearError,
}

impl SessionAction {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginPending => "login/pending",
            Self::LoginFulfilled { .. } => "login/fulfilled",
            Self::LoginRejected(_) => "login/rejected",
            Self::LogoutPending => "logout/pending",
            Self::LogoutFulfilled => "logout/fulfilled",
            Self::LogoutRejected => "logout/rejected",
            Self::SilentCheckPending => "silent-check/pending",
            Self::SilentCheckFulfilled(_) => "silent-check/fulfilled",
            Self::SilentCheckRejected => "silent-check/rejected",
            Self::PatchProfile(_) => "profile/patch",
            Self::ClearError => "error/clear",
        }
    }
}

/// Partial update to the signed-in user; `None` fields are left alone
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_email_verified: Option<bool>,
    pub is_two_factor_verified: Option<bool>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Merge the supplied fields into `user`
    pub fn apply_to(self, user: &mut AdminUser) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(verified) = self.is_email_verified {
            user.is_email_verified = verified;
        }
        if let Some(verified) = self.is_two_factor_verified {
            user.is_two_factor_verified = verified;
        }
        if let Some(active) = self.is_active {
            user.is_active = active;
        }
    }
}

impl SessionState {
    /// State at process start, seeded from persisted credentials.
    ///
    /// A restored record is not yet trusted: `is_authenticated` stays false
    /// until the silent check confirms it, and `is_loading` is raised so guards
    /// wait for that check instead of redirecting.
    pub fn restored(record: Option<CredentialRecord>) -> Self {
        match record {
            Some(record) => Self {
                user: Some(record.user),
                token: Some(record.token),
                is_loading: true,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Loading
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }

    /// Copy with all credentials dropped
    fn signed_out(&self, error: Option<String>) -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: false,
            error,
        }
    }

    /// Apply one transition
    pub fn apply(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::LoginPending => Self {
                is_loading: true,
                error: None,
                ..self.clone()
            },
            SessionAction::LoginFulfilled { user, token } => Self {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
            SessionAction::LoginRejected(message) => self.signed_out(Some(message)),
            SessionAction::LogoutPending | SessionAction::SilentCheckPending => Self {
                is_loading: true,
                ..self.clone()
            },
            // A failed server-side logout still forgets the credentials locally
            SessionAction::LogoutFulfilled | SessionAction::LogoutRejected => {
                self.signed_out(None)
            }
            SessionAction::SilentCheckFulfilled(user) => Self {
                user: Some(user),
                token: self.token.clone(),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
            SessionAction::SilentCheckRejected => self.signed_out(None),
            SessionAction::PatchProfile(patch) => {
                let mut next = self.clone();
                if let Some(user) = next.user.as_mut() {
                    patch.apply_to(user);
                }
                next
            }
            SessionAction::ClearError => Self {
                error: None,
                ..self.clone()
            },
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}
