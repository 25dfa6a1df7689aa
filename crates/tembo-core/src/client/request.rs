//! Request descriptions that can be sent more than once.
//!
//! A reqwest `RequestBuilder` is consumed by `send`, and multipart forms are
//! not clonable, so an [`ApiRequest`] keeps everything needed to rebuild the
//! request for the post-refresh retry. File contents are read once, up front.

use std::fmt;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::forms::NewImage;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Whether a 401 on this request may trigger a session refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Protected endpoint: refresh once and retry
    Session,
    /// Auth endpoint: a 401 is final
    Anonymous,
}

/// A file loaded into memory for a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    field: &'static str,
    path: PathBuf,
    file_name: String,
    mime: &'static str,
    bytes: Vec<u8>,
}

impl FilePart {
    /// Read `image` from disk as multipart field `field`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::LocalFile` if the file cannot be read.
    pub async fn read(field: &'static str, image: &NewImage) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(image.path())
            .await
            .map_err(|e| ApiError::LocalFile {
                path: image.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            field,
            path: image.path.clone(),
            file_name: image.file_name(),
            mime: image.mime(),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn to_part(&self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(self.mime)
            .map_err(|e| ApiError::LocalFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}

#[derive(Debug, Clone)]
enum Body {
    Empty,
    Json(Value),
    Multipart(Vec<FilePart>),
}

/// One logical API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Body,
    auth: AuthMode,
    expected: Option<StatusCode>,
    idempotency_key: Option<String>,
}

impl ApiRequest {
    /// Writes get an `Idempotency-Key` generated here, so every attempt of
    /// the same logical request carries the same key.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let idempotency_key = if method == Method::GET {
            None
        } else {
            Some(Uuid::new_v4().to_string())
        };
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            auth: AuthMode::Session,
            expected: None,
            idempotency_key,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if `body` does not serialize.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn files(mut self, parts: Vec<FilePart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    pub fn query(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Mark as an auth endpoint that never triggers a refresh.
    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    /// Treat any other 2xx status as an error.
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected = Some(status);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn auth(&self) -> AuthMode {
        self.auth
    }

    pub fn expected_status(&self) -> Option<StatusCode> {
        self.expected
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    /// Build a fresh reqwest request for one attempt.
    pub(crate) fn build(
        &self,
        http: &reqwest::Client,
        url: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let mut builder = http.request(self.method.clone(), url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(key) = &self.idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key);
        }
        Ok(match &self.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    form = form.part(part.field, part.to_part()?);
                }
                builder.multipart(form)
            }
        })
    }
}

/// Status and body of a completed round trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Decode the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` when the body has another shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The body as loose JSON; empty bodies are `null`, non-JSON bodies a
    /// string.
    pub fn value(&self) -> Value {
        if self.body.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}
