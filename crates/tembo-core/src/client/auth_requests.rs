//! Authentication endpoints.
//!
//! None of these trigger the refresh-and-retry path: a 401 from the login
//! endpoint means wrong credentials, not an expired session.

use super::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{LoginResponse, WriteAck};
use crate::params::{SignIn, SignUp};

const LOGIN_PATH: &str = "/staff/auth/login";
const LOGOUT_PATH: &str = "/staff/auth/logout";
const REFRESH_PATH: &str = "/staff/auth/refresh-token";
const REGISTER_PATH: &str = "/staff/register-manager";

impl ApiClient {
    /// Signs in; the session cookies arrive via `Set-Cookie`.
    pub async fn login(&self, credentials: &SignIn) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::post(LOGIN_PATH).anonymous().json(credentials)?;
        self.execute(&request).await?.json()
    }

    /// Ends the session on the backend. Local tokens are dropped even if the
    /// call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .execute(&ApiRequest::post(LOGOUT_PATH).anonymous())
            .await;
        self.clear_tokens();
        result.map(|_| ())
    }

    /// Exchange the refresh cookie for a new access cookie.
    ///
    /// Sent with a single dispatch; `execute` calls this on a 401.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let request = ApiRequest::post(REFRESH_PATH).anonymous();
        let response = self.dispatch(&request).await?;
        Self::check(&request, response).map(|_| ())
    }

    /// Self-registration for a new manager account.
    pub async fn register_manager(&self, sign_up: &SignUp) -> Result<WriteAck, ApiError> {
        let request = ApiRequest::post(REGISTER_PATH).anonymous().json(sign_up)?;
        Ok(WriteAck::from_value(self.execute(&request).await?.value()))
    }
}
