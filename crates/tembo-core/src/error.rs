//! Error types for the admin client library.
//!
//! Errors are layered the same way the write pipeline is:
//!
//! - [`ApiError`]: what the REST backend (or the transport) said, already
//!   classified by HTTP status.
//! - [`SubmitError`]: which stage of a multi-step submission failed, so
//!   callers can branch on the stage instead of matching message strings.
//! - [`AdminError`]: everything else the library can fail on (configuration,
//!   session files, local input), wrapping the two above.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::orchestrator::{Stage, UploadBatch};
use crate::validation::FieldErrors;

/// Coarse classification of a backend failure, used for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Unauthorized,
    Validation,
    NotFound,
    Server,
    Network,
    Other,
}

/// Failure reported by the REST backend or the HTTP transport.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401 that was not (or could not be) recovered by a token refresh
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },
    /// The silent refresh failed or the retried request was rejected again
    #[error("Session expired, please sign in again")]
    SessionExpired,
    /// 400/422 with optional per-field messages
    #[error("Validation failed ({status}): {detail}")]
    Validation {
        status: u16,
        detail: String,
        fields: FieldErrors,
    },
    /// 403
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    /// 404
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    /// 409
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    /// Any 5xx
    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },
    /// No response at all
    #[error("Network error: {0}")]
    Network(String),
    /// A local file selected for upload could not be read
    #[error("Cannot read '{path}': {reason}")]
    LocalFile { path: PathBuf, reason: String },
    /// A status the client does not classify further
    #[error("Unexpected status {status}: {detail}")]
    Status { status: u16, detail: String },
    /// The response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by this error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } | ApiError::SessionExpired => Some(401),
            ApiError::Validation { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Status { status, .. } => Some(*status),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::Network(_) | ApiError::LocalFile { .. } | ApiError::Decode(_) => None,
        }
    }

    /// The backend's `detail`/`message` text, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Validation { detail, .. }
            | ApiError::Forbidden { detail }
            | ApiError::NotFound { detail }
            | ApiError::Conflict { detail }
            | ApiError::Server { detail, .. }
            | ApiError::Status { detail, .. } => {
                if detail.is_empty() {
                    None
                } else {
                    Some(detail)
                }
            }
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Unauthorized { .. } | ApiError::SessionExpired => {
                ErrorCategory::Unauthorized
            }
            ApiError::Validation { .. } => ErrorCategory::Validation,
            ApiError::NotFound { .. } => ErrorCategory::NotFound,
            ApiError::Server { .. } => ErrorCategory::Server,
            ApiError::Network(_) => ErrorCategory::Network,
            _ => ErrorCategory::Other,
        }
    }
}

/// Failure of one submission attempt, tagged with the stage that failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Client-side schema check failed; nothing was sent
    #[error("Please fix {} invalid field(s) before submitting", .0.len())]
    Validation(FieldErrors),
    /// The form matches its snapshot; nothing was sent
    #[error("No changes detected to update")]
    NoChanges,
    /// Another attempt on the same form is still running
    #[error("A submission is already in progress")]
    InFlight,
    /// A dependent asset batch failed; the entity write was never issued
    #[error("Image upload failed ({batch}): {source}")]
    Upload {
        batch: UploadBatch,
        #[source]
        source: ApiError,
    },
    /// The entity write itself failed
    #[error("{0}")]
    Submit(#[source] ApiError),
}

impl SubmitError {
    /// The pipeline stage this failure belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            SubmitError::Validation(_) | SubmitError::NoChanges | SubmitError::InFlight => {
                Stage::Validating
            }
            SubmitError::Upload { batch, .. } => Stage::Uploading(*batch),
            SubmitError::Submit(_) => Stage::Submitting,
        }
    }

    /// The backend error behind an upload or submit failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SubmitError::Upload { source, .. } => Some(source),
            SubmitError::Submit(source) => Some(source),
            _ => None,
        }
    }
}

/// Comprehensive error type for all library operations.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Backend or transport failure outside a form submission
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A form submission failed
    #[error(transparent)]
    Submit(#[from] SubmitError),
    /// No session tokens are available for a protected operation
    #[error("Not signed in. Sign in first.")]
    SignInRequired,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AdminError {
        AdminError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AdminError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an I/O failure with the path it happened at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AdminError::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to AdminError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| AdminError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_and_category() {
        let err = ApiError::NotFound {
            detail: "Itinerary not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.detail(), Some("Itinerary not found"));

        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_empty_detail_is_none() {
        let err = ApiError::Server {
            status: 502,
            detail: String::new(),
        };
        assert_eq!(err.detail(), None);
        assert_eq!(err.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_submit_error_stage() {
        let err = SubmitError::Upload {
            batch: UploadBatch::DayImages { day: 2 },
            source: ApiError::Network("reset".to_string()),
        };
        assert_eq!(err.stage(), Stage::Uploading(UploadBatch::DayImages { day: 2 }));
        assert!(err.api_error().is_some());

        assert_eq!(SubmitError::NoChanges.stage(), Stage::Validating);
        assert!(SubmitError::NoChanges.api_error().is_none());
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = AdminError::invalid_input("price").with_reason("not a number");
        match err {
            AdminError::InvalidInput { field, reason } => {
                assert_eq!(field, "price");
                assert_eq!(reason, "not a number");
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }
}
