//! Browser/host glue: task spawning, hard navigation and user notices

use std::future::Future;
use yew::Callback;

/// Run a future on the current thread's executor without awaiting it
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Run a future on the current thread's executor without awaiting it.
///
/// Must be called from within a tokio `LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(future);
}

/// Severity of a user-facing notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Notice sink that only logs
pub fn log_notices() -> Callback<Notice> {
    Callback::from(|notice: Notice| match notice.level {
        NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
        NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
    })
}

/// Full page navigation via `window.location`
pub fn browser_redirect() -> Callback<String> {
    Callback::from(|path: String| {
        let Some(window) = web_sys::window() else {
            tracing::warn!(%path, "No window; cannot navigate");
            return;
        };
        if let Err(error) = window.location().set_href(&path) {
            tracing::warn!(%path, ?error, "Hard navigation failed");
        }
    })
}
