//! Session operations: login, logout, silent re-authentication

use super::credentials::{
    CredentialRecord, CredentialStore, LocalStorageCredentials, MemoryCredentials, is_expired,
};
use super::state::{SessionAction, SessionState, UserPatch};
use super::store::SessionStore;
use crate::config::SessionConfig;
use crate::platform::{Notice, browser_redirect, log_notices, spawn_local};
use cms_admin_http::types::{AdminUser, LoginRequest};
use cms_admin_http::{AdminClient, ClientError, Interceptor};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use thiserror::Error;
use yew::Callback;

/// Shown when the server rejects a login without explaining why
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";

/// Session operation errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Credentials were refused
    #[error("{0}")]
    LoginRejected(String),

    /// Nothing stored to re-authenticate with
    #[error("no auth data")]
    NoAuthData,

    /// The stored token was not accepted
    #[error("auth check failed")]
    AuthCheckFailed,

    /// Client could not be constructed
    #[error(transparent)]
    Client(#[from] ClientError),
}

struct SessionInner {
    config: SessionConfig,
    client: AdminClient,
    store: SessionStore,
    credentials: Rc<dyn CredentialStore>,
    notify: Callback<Notice>,
    redirect: Callback<String>,
    silent_check_started: Cell<bool>,
    /// Set from logout-pending until the teardown finishes
    logout_in_flight: Cell<bool>,
}

/// Handle to the session layer. Cheap to clone; clones share everything.
#[derive(Clone)]
pub struct Session {
    inner: Rc<SessionInner>,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Session {
    /// Start building a session around an API client
    pub fn builder(client: AdminClient) -> SessionBuilder {
        SessionBuilder::new(client)
    }

    /// Session wired to `localStorage`, `window.location` and logging notices
    pub fn browser(config: SessionConfig, notify: Callback<Notice>) -> Result<Self, SessionError> {
        let client = AdminClient::builder()
            .base_url(config.api_base_url.clone())
            .build()?;
        let credentials = LocalStorageCredentials::new(&config.token_key, &config.user_key);

        Ok(Self::builder(client)
            .config(config)
            .credentials(Rc::new(credentials))
            .notify(notify)
            .redirect(browser_redirect())
            .build())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &AdminClient {
        &self.inner.client
    }

    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// Current state snapshot
    pub fn state(&self) -> Rc<SessionState> {
        self.inner.store.state()
    }

    /// Log in with email and password.
    ///
    /// Failures are folded into the session's `error` and a notice; the
    /// returned error only tells the caller what already happened.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, SessionError> {
        let inner = &self.inner;
        inner.store.dispatch(SessionAction::LoginPending);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match inner.client.login_email(&request).await {
            Ok(data) => {
                let record = CredentialRecord {
                    token: data.token,
                    user: data.admin,
                };
                inner.store.dispatch(SessionAction::LoginFulfilled {
                    user: record.user.clone(),
                    token: record.token.clone(),
                });
                inner.credentials.write(&record);

                tracing::info!(user_id = %record.user.id, "Logged in");
                inner.notify.emit(Notice::success(
                    data.message.unwrap_or_else(|| "Login successful".to_string()),
                ));
                Ok(record.user)
            }
            Err(error) => {
                let message = error
                    .server_message()
                    .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                    .to_string();
                tracing::info!(%error, "Login rejected");

                inner.notify.emit(Notice::error(message.clone()));
                inner
                    .store
                    .dispatch(SessionAction::LoginRejected(message.clone()));
                Err(SessionError::LoginRejected(message))
            }
        }
    }

    /// Log out. Always ends signed out, whatever the server says.
    pub async fn logout(&self) {
        let token = self.begin_logout();
        self.finish_logout(token).await;
    }

    fn begin_logout(&self) -> Option<String> {
        self.inner.logout_in_flight.set(true);
        self.inner.store.dispatch(SessionAction::LogoutPending);
        self.inner.store.token()
    }

    async fn finish_logout(&self, token: Option<String>) {
        let inner = &self.inner;

        if let Some(token) = token {
            if let Err(error) = inner.client.logout(&token).await {
                tracing::warn!(%error, "Server logout failed; clearing local session anyway");
            }
        }

        inner.store.dispatch(SessionAction::LogoutFulfilled);
        inner.credentials.clear();
        inner.logout_in_flight.set(false);

        tracing::info!("Logged out");
        inner.notify.emit(Notice::success("Logged out successfully"));
    }

    /// Validate the restored token against the profile endpoint
    pub async fn silent_check(&self) -> Result<AdminUser, SessionError> {
        let inner = &self.inner;
        inner.store.dispatch(SessionAction::SilentCheckPending);

        let state = inner.store.state();
        let (Some(token), Some(_)) = (state.token.clone(), state.user.as_ref()) else {
            inner.store.dispatch(SessionAction::SilentCheckRejected);
            return Err(SessionError::NoAuthData);
        };

        match inner.client.profile(&token).await {
            Ok(user) => {
                inner
                    .store
                    .dispatch(SessionAction::SilentCheckFulfilled(user.clone()));
                inner.credentials.write(&CredentialRecord {
                    token,
                    user: user.clone(),
                });
                tracing::debug!(user_id = %user.id, "Stored session confirmed");
                Ok(user)
            }
            Err(error) => {
                tracing::debug!(%error, "Stored session not accepted");
                inner.store.dispatch(SessionAction::SilentCheckRejected);
                inner.credentials.clear();
                Err(SessionError::AuthCheckFailed)
            }
        }
    }

    /// Run the startup silent check, at most once per session and only when not
    /// already signed in. Returns whether a check was started.
    pub fn bootstrap(&self) -> bool {
        let inner = &self.inner;
        if inner.silent_check_started.replace(true) {
            return false;
        }
        if inner.store.state().is_authenticated {
            return false;
        }

        let session = self.clone();
        spawn_local(async move {
            // Outcome is already reflected in the store
            let _ = session.silent_check().await;
        });
        true
    }

    /// Tear the session down after an unauthorized response from `path`.
    ///
    /// Concurrent failures collapse into one logout and one navigation, and a
    /// logout already in progress (user-initiated or forced) absorbs the call.
    pub fn force_logout(&self, path: &str) {
        let inner = &self.inner;
        if inner.logout_in_flight.get() || inner.store.token().is_none() {
            tracing::debug!(path, "Session already being torn down");
            return;
        }
        tracing::warn!(path, "Unauthorized response from auth endpoint; ending session");

        let token = self.begin_logout();
        let session = self.clone();
        spawn_local(async move {
            session.finish_logout(token).await;
        });

        inner.redirect.emit(inner.config.login_path.clone());
    }

    /// Merge fields into the signed-in user
    pub fn patch_profile(&self, patch: UserPatch) {
        let inner = &self.inner;
        inner.store.dispatch(SessionAction::PatchProfile(patch));

        let state = inner.store.state();
        if let (Some(token), Some(user)) = (state.token.clone(), state.user.clone()) {
            inner.credentials.write(&CredentialRecord { token, user });
        }
    }

    pub fn clear_error(&self) {
        self.inner.store.dispatch(SessionAction::ClearError);
    }

    fn install_interceptor(&self) {
        let store = self.inner.store.clone();
        let session: Weak<SessionInner> = Rc::downgrade(&self.inner);

        self.inner.client.install_interceptor(Interceptor::new(
            move || store.token(),
            move |path| {
                if let Some(inner) = session.upgrade() {
                    Session { inner }.force_logout(path);
                }
            },
        ));
    }
}

/// Builder for [`Session`]
pub struct SessionBuilder {
    client: AdminClient,
    config: SessionConfig,
    credentials: Option<Rc<dyn CredentialStore>>,
    notify: Option<Callback<Notice>>,
    redirect: Option<Callback<String>>,
}

impl SessionBuilder {
    fn new(client: AdminClient) -> Self {
        Self {
            client,
            config: SessionConfig::default(),
            credentials: None,
            notify: None,
            redirect: None,
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Where credentials persist; defaults to memory
    pub fn credentials(mut self, credentials: Rc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sink for user-facing notices; defaults to logging
    pub fn notify(mut self, notify: Callback<Notice>) -> Self {
        self.notify = Some(notify);
        self
    }

    /// Hard navigation used by the forced logout; defaults to logging
    pub fn redirect(mut self, redirect: Callback<String>) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Restore persisted credentials, build the session and install its interceptor
    pub fn build(self) -> Session {
        let credentials = self
            .credentials
            .unwrap_or_else(|| Rc::new(MemoryCredentials::default()));

        let record = credentials.read().filter(|record| {
            let usable = !is_expired(&record.token);
            if !usable {
                tracing::info!("Stored token expired; discarding credentials");
                credentials.clear();
            }
            usable
        });

        let session = Session {
            inner: Rc::new(SessionInner {
                config: self.config,
                client: self.client,
                store: SessionStore::new(SessionState::restored(record)),
                credentials,
                notify: self.notify.unwrap_or_else(log_notices),
                redirect: self.redirect.unwrap_or_else(|| {
                    Callback::from(|path: String| tracing::info!(%path, "redirect requested"))
                }),
                silent_check_started: Cell::new(false),
                logout_in_flight: Cell::new(false),
            }),
        };
        session.install_interceptor();
        session
    }
}
