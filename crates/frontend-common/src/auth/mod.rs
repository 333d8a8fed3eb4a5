//! Authentication and session lifecycle

pub mod context;
pub mod credentials;
pub mod session;
pub mod state;
pub mod store;

// Re-export commonly used items
pub use context::{SessionContext, SessionProvider, use_is_authenticated, use_session};
pub use credentials::{CredentialRecord, CredentialStore, is_expired};
pub use session::{Session, SessionBuilder, SessionError};
pub use state::{SessionAction, SessionPhase, SessionState, UserPatch};
pub use store::{SessionStore, Subscription};
