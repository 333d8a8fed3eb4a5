//! Authentication endpoints

use super::{AdminClient, error::ClientError};
use crate::types::{AdminUser, ApiEnvelope, LoginData, LoginRequest};
use reqwest::Method;

impl AdminClient {
    /// Log in with email and password
    pub async fn login_email(&self, request: &LoginRequest) -> Result<LoginData, ClientError> {
        let req = self
            .request(Method::POST, "/api/auth/login-email")
            .json(request);
        self.execute::<ApiEnvelope<LoginData>>(req).await?.into_data()
    }

    /// Fetch the profile that `token` belongs to
    pub async fn profile(&self, token: &str) -> Result<AdminUser, ClientError> {
        let req = self.request_with_token(Method::GET, "/api/auth/profile", token);
        self.execute::<ApiEnvelope<AdminUser>>(req).await?.into_data()
    }

    /// Tell the server `token` is being discarded. The response body is ignored.
    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let req = self.request_with_token(Method::POST, "/api/auth/logout", token);
        self.execute_discarding(req).await
    }
}
