//! CMS admin API client

pub mod auth;
pub mod error;
pub mod interceptor;

use error::ClientError;
use interceptor::Interceptor;
use reqwest::{Client, ClientBuilder, header};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Admin API client
///
/// Clones share the same interceptor slot, so installing an interceptor on one
/// handle affects every clone.
#[derive(Clone)]
pub struct AdminClient {
    client: Client,
    base_url: String,
    interceptor: Rc<RefCell<Option<Interceptor>>>,
}

impl AdminClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> AdminClientBuilder {
        AdminClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the session interceptor, replacing any previous one
    pub fn install_interceptor(&self, interceptor: Interceptor) {
        let replaced = self.interceptor.borrow_mut().replace(interceptor).is_some();
        if replaced {
            tracing::debug!("Replaced previously installed interceptor");
        }
    }

    /// Remove the installed interceptor
    pub fn clear_interceptor(&self) {
        self.interceptor.borrow_mut().take();
    }

    fn current_token(&self) -> Option<String> {
        self.interceptor
            .borrow()
            .as_ref()
            .and_then(Interceptor::current_token)
    }

    /// Create a request builder carrying the current session token, if any
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);

        match self.current_token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Create a request builder with an explicit bearer token
    pub fn request_with_token(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Execute a request and decode a JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request whose body is irrelevant
    pub async fn execute_discarding(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        self.send(request).await.map(drop)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_status(status, &body);

        // The hook runs before the caller sees the error
        let interceptor = self.interceptor.borrow().clone();
        if let Some(interceptor) = interceptor {
            interceptor.inspect_failure(status.as_u16(), &path);
        }

        Err(error)
    }
}

/// Builder for AdminClient
#[derive(Default)]
pub struct AdminClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AdminClientBuilder {
    /// API origin, e.g. `https://cms.example.com`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout. Native only; the browser owns fetch timeouts.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// User agent for native builds; browsers ignore it
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<AdminClient, ClientError> {
        let base_url = normalize_base_url(self.base_url.as_deref())?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let builder = ClientBuilder::new().default_headers(headers);

        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            let agent = self
                .user_agent
                .unwrap_or_else(|| format!("cms-admin/{}", env!("CARGO_PKG_VERSION")));
            let builder = builder.user_agent(agent);
            match self.timeout {
                Some(timeout) => builder.timeout(timeout),
                None => builder,
            }
        };

        #[cfg(target_arch = "wasm32")]
        let _ = (self.timeout, self.user_agent);

        Ok(AdminClient {
            client: builder.build()?,
            base_url,
            interceptor: Rc::new(RefCell::new(None)),
        })
    }
}

/// Absolute http(s) origin without a trailing slash, so paths can be appended verbatim
fn normalize_base_url(raw: Option<&str>) -> Result<String, ClientError> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

    let url = reqwest::Url::parse(raw)
        .map_err(|error| ClientError::Configuration(format!("invalid base_url {raw:?}: {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::Configuration(format!(
            "base_url must be http or https, got {:?}",
            url.scheme()
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url(Some("https://cms.example.com/")).unwrap(),
            "https://cms.example.com"
        );
        assert_eq!(
            normalize_base_url(Some(" http://localhost:5000 ")).unwrap(),
            "http://localhost:5000"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_unusable_values() {
        for raw in [None, Some(""), Some("   "), Some("/api"), Some("ftp://cms.example.com")] {
            assert!(
                matches!(normalize_base_url(raw), Err(ClientError::Configuration(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
