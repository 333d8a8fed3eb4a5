pub mod auth;
pub mod auth_guard;
pub mod components;
pub mod config;
pub mod platform;

pub use auth::context::{SessionContext, SessionProvider, use_session};
pub use auth::session::{Session, SessionBuilder, SessionError};
pub use auth::state::{SessionAction, SessionPhase, SessionState, UserPatch};
pub use auth_guard::{RequireAuthenticated, RequireUnauthenticated};
pub use components::Spinner;
pub use config::{AuthConfig, SessionConfig};
