//! Read-view states.

use std::sync::Arc;

use crate::error::ApiError;

/// What a list or detail view renders: the data, or a failure with a retry
/// hint instead of an error crash.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Ready(Arc<T>),
    Failed { message: String, retryable: bool },
}

impl<T> ViewState<T> {
    /// Turn a fetch result into a view, describing failures for `subject`
    /// (e.g. "staff members").
    pub fn load(result: Result<Arc<T>, ApiError>, subject: &str) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(error) => {
                log::warn!("Loading {subject} failed: {error}");
                Self::failed(&error, subject)
            }
        }
    }

    fn failed(error: &ApiError, subject: &str) -> Self {
        let (message, retryable) = describe_failure(error, subject);
        ViewState::Failed { message, retryable }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            ViewState::Failed { .. } => None,
        }
    }
}

/// Message for a failed load of `subject` and whether retrying can help.
pub fn describe_failure(error: &ApiError, subject: &str) -> (String, bool) {
    match error {
        ApiError::SessionExpired => (
            "Your session has expired. Please sign in again.".to_string(),
            false,
        ),
        ApiError::NotFound { .. } => (
            format!("The requested {subject} could not be found."),
            false,
        ),
        ApiError::Forbidden { .. } => (
            format!("You do not have permission to view {subject}."),
            false,
        ),
        ApiError::Network(_) => (
            "Network error. Please check your connection.".to_string(),
            true,
        ),
        _ => (
            format!("Unable to load {subject}. Please try again later."),
            true,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_view() {
        let view = ViewState::load(Ok(Arc::new(vec![1, 2])), "itineraries");
        assert!(view.is_ready());
        assert_eq!(view.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_server_failure_is_retryable() {
        let view: ViewState<Vec<u8>> = ViewState::load(
            Err(ApiError::Server {
                status: 502,
                detail: String::new(),
            }),
            "staff members",
        );
        assert_eq!(
            view,
            ViewState::Failed {
                message: "Unable to load staff members. Please try again later.".to_string(),
                retryable: true,
            }
        );
    }

    #[test]
    fn test_not_found_is_final() {
        let view: ViewState<u8> = ViewState::load(
            Err(ApiError::NotFound {
                detail: String::new(),
            }),
            "itinerary",
        );
        assert!(matches!(view, ViewState::Failed { retryable: false, .. }));
        assert!(view.data().is_none());
    }
}
