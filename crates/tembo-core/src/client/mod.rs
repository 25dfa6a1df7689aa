//! HTTP client for the Tembo REST backend.
//!
//! [`ApiClient`] owns the reqwest client, the base URL and the session
//! cookies. Every call goes through [`ApiClient::execute`], which:
//!
//! 1. sends the request with the current `Cookie` header,
//! 2. harvests `Set-Cookie` tokens from the response,
//! 3. on a 401 from a protected endpoint, refreshes the session once and
//!    re-issues the same request (same body, same `Idempotency-Key`),
//! 4. classifies any non-success status into an [`ApiError`].
//!
//! Endpoint wrappers are grouped per resource, mirroring the backend routes.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Response, StatusCode};
use url::Url;

use crate::error::{ApiError, Result, ResultExt};
use crate::session::SessionTokens;

pub mod auth_requests;
pub mod blog_requests;
pub mod booking_requests;
pub mod errors;
pub mod itinerary_requests;
pub mod request;
pub mod staff_requests;
mod uploader;

pub use request::{ApiRequest, AuthMode, FilePart, RawResponse};

const USER_AGENT: &str = concat!("tembo/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the admin REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: RwLock<SessionTokens>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.tokens().has_any())
            .finish()
    }
}

impl ApiClient {
    /// Creates a client for `base_url`, starting from the given tokens.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Configuration` if the URL does not parse or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, tokens: SessionTokens) -> Result<Self> {
        let parsed = Url::parse(base_url).with_context(format!("Invalid API URL '{base_url}'"))?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .with_context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            tokens: RwLock::new(tokens),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the current session tokens.
    pub fn tokens(&self) -> SessionTokens {
        self.read_tokens().clone()
    }

    pub fn set_tokens(&self, tokens: SessionTokens) {
        *self.write_tokens() = tokens;
    }

    /// Forget every session token held in memory.
    pub fn clear_tokens(&self) {
        *self.write_tokens() = SessionTokens::default();
    }

    /// Send a request, refreshing the session once on a 401.
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` when no response arrived
    /// - `ApiError::SessionExpired` when the refresh failed or the retried
    ///   request was rejected again
    /// - the classified status error for any other non-success response
    pub async fn execute(&self, request: &ApiRequest) -> std::result::Result<RawResponse, ApiError> {
        let response = self.dispatch(request).await?;
        if response.status != StatusCode::UNAUTHORIZED || request.auth() == AuthMode::Anonymous {
            return Self::check(request, response);
        }

        log::debug!(
            "{} {} returned 401, refreshing session",
            request.method(),
            request.path()
        );
        if let Err(e) = self.refresh_session().await {
            log::warn!("Session refresh failed: {e}");
            self.clear_tokens();
            return Err(ApiError::SessionExpired);
        }

        let retried = self.dispatch(request).await?;
        if retried.status == StatusCode::UNAUTHORIZED {
            log::warn!(
                "{} {} rejected again after refresh",
                request.method(),
                request.path()
            );
            self.clear_tokens();
            return Err(ApiError::SessionExpired);
        }
        Self::check(request, retried)
    }

    /// One round trip without any retry.
    async fn dispatch(&self, request: &ApiRequest) -> std::result::Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path());
        let cookie = self.read_tokens().cookie_header();

        let mut builder = request.build(&self.http, &url)?;
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }

        log::debug!("{} {url}", request.method());
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.absorb_cookies(&response);

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log::debug!("{} {url} -> {status}", request.method());
        Ok(RawResponse { status, body })
    }

    fn check(
        request: &ApiRequest,
        response: RawResponse,
    ) -> std::result::Result<RawResponse, ApiError> {
        let status = response.status;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &response.body));
        }
        match request.expected_status() {
            Some(expected) if expected != status => Err(ApiError::Status {
                status: status.as_u16(),
                detail: format!("expected {expected}"),
            }),
            _ => Ok(response),
        }
    }

    fn absorb_cookies(&self, response: &Response) {
        let mut tokens = self.write_tokens();
        for cookie in response.cookies() {
            // A zero max-age is how the backend deletes a cookie.
            let value = if cookie.max_age() == Some(Duration::ZERO) {
                ""
            } else {
                cookie.value()
            };
            if tokens.absorb(cookie.name(), value) {
                log::debug!("Session cookie '{}' updated", cookie.name());
            }
        }
    }

    fn read_tokens(&self) -> RwLockReadGuard<'_, SessionTokens> {
        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_tokens(&self) -> RwLockWriteGuard<'_, SessionTokens> {
        self.tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
