//! Frontend configuration

/// Authentication constants
pub struct AuthConfig;

impl AuthConfig {
    /// Storage key for the bearer token
    pub const TOKEN_KEY: &'static str = "token";

    /// Storage key for the serialized user record
    pub const USER_KEY: &'static str = "user";

    /// Where unauthenticated visitors are sent
    pub const LOGIN_PATH: &'static str = "/login";

    /// Landing page after login when no return path was remembered
    pub const DEFAULT_LANDING_PATH: &'static str = "/dashboard";

    /// Compile-time override for the API base URL
    pub const API_URL_ENV: Option<&'static str> = option_env!("CMS_ADMIN_API_URL");
}

/// Runtime session configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub default_landing_path: String,
    pub token_key: String,
    pub user_key: String,
}

impl SessionConfig {
    /// Configuration for an API served at `api_base_url`
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Configuration for the browser: `CMS_ADMIN_API_URL` if set at build time,
    /// otherwise the page origin.
    pub fn from_browser() -> Self {
        let api_base_url = AuthConfig::API_URL_ENV
            .map(str::to_string)
            .or_else(|| web_sys::window().and_then(|window| window.location().origin().ok()))
            .unwrap_or_default();

        Self::new(api_base_url)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            login_path: AuthConfig::LOGIN_PATH.to_string(),
            default_landing_path: AuthConfig::DEFAULT_LANDING_PATH.to_string(),
            token_key: AuthConfig::TOKEN_KEY.to_string(),
            user_key: AuthConfig::USER_KEY.to_string(),
        }
    }
}
