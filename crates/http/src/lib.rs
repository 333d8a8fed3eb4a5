//! CMS admin HTTP client
//!
//! Typed access to the admin API plus the interceptor hook the session layer
//! uses to attach bearer tokens and react to unauthorized responses.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::interceptor::{Interceptor, is_auth_scoped};
pub use client::{AdminClient, AdminClientBuilder};
pub use reqwest::Method;
