//! User-facing outcome of a submission.
//!
//! A [`Feedback`] is what a form shows after an attempt: a banner line,
//! per-field messages, and optionally a route to navigate to. The wording
//! depends on which form failed, so each conversion takes a [`FormKind`].

use crate::error::{ApiError, SubmitError};
use crate::routes::Route;
use crate::validation::FieldErrors;

const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";
const SERVER_MESSAGE: &str = "Server error. Please try again later.";
const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
const INVALID_FORM_MESSAGE: &str = "Please fix the highlighted fields before submitting.";

/// The form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    SignIn,
    SignUp,
    ItineraryCreate,
    ItineraryUpdate,
    BlogCreate,
    BlogUpdate,
    ProfileUpdate,
    StaffCreate,
    /// A confirmed deletion of an itinerary, blog post or staff member.
    Delete,
}

impl FormKind {
    fn no_changes_message(self) -> &'static str {
        match self {
            FormKind::ProfileUpdate => "No changes detected. Please modify at least one field.",
            _ => "No changes detected to update",
        }
    }

    fn success_title(self) -> &'static str {
        match self {
            FormKind::SignIn => "Signed in",
            FormKind::SignUp => "Account created. You can now sign in.",
            FormKind::ItineraryCreate => "Itinerary created successfully",
            FormKind::ItineraryUpdate => "Itinerary updated successfully",
            FormKind::BlogCreate => "Blog created successfully",
            FormKind::BlogUpdate => "Blog updated successfully",
            FormKind::ProfileUpdate => "Profile updated successfully",
            FormKind::StaffCreate => "Staff members created successfully",
            FormKind::Delete => "Deleted successfully",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// Banner, field messages and navigation for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub tone: Tone,
    pub banner: String,
    pub field_errors: FieldErrors,
    pub redirect: Option<Route>,
}

impl Feedback {
    fn error(banner: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            banner: banner.into(),
            field_errors: FieldErrors::new(),
            redirect: None,
        }
    }

    fn with_fields(mut self, fields: FieldErrors) -> Self {
        self.field_errors = fields;
        self
    }

    fn redirect_to(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }

    /// Feedback for a settled mutation, listing the fields the backend
    /// reports as changed.
    pub fn settled(kind: FormKind, updated: &[String], redirect: Option<Route>) -> Self {
        let banner = if updated.is_empty() {
            kind.success_title().to_string()
        } else {
            format!(
                "{}. Updated fields: {}",
                kind.success_title(),
                updated.join(", ")
            )
        };
        Self {
            tone: Tone::Success,
            banner,
            field_errors: FieldErrors::new(),
            redirect,
        }
    }

    /// Feedback for a failed submission attempt.
    pub fn from_submit(kind: FormKind, error: &SubmitError) -> Self {
        match error {
            SubmitError::Validation(fields) => {
                Self::error(INVALID_FORM_MESSAGE).with_fields(fields.clone())
            }
            SubmitError::NoChanges => Self::error(kind.no_changes_message()),
            SubmitError::InFlight => Self::error("A submission is already in progress."),
            SubmitError::Upload { source, .. } => match source {
                ApiError::SessionExpired | ApiError::Network(_) => Self::from_api(kind, source),
                _ => {
                    let reason = source
                        .detail()
                        .map(str::to_string)
                        .unwrap_or_else(|| source.to_string());
                    Self::error(format!("Image upload failed: {reason}"))
                }
            },
            SubmitError::Submit(source) => Self::from_api(kind, source),
        }
    }

    /// Feedback for a backend failure outside the staged pipeline (sign-in,
    /// staff creation) or the write stage of one.
    pub fn from_api(kind: FormKind, error: &ApiError) -> Self {
        match error {
            ApiError::SessionExpired => Self::error(SESSION_EXPIRED_MESSAGE)
                .redirect_to(Route::SignIn { redirect_to: None }),
            ApiError::Network(_) => Self::error(NETWORK_MESSAGE),
            ApiError::LocalFile { .. } => Self::error(error.to_string()),
            _ => match kind {
                FormKind::SignIn => sign_in(error),
                FormKind::SignUp => {
                    Self::error(message_or(error, "Registration failed. Please try again."))
                        .with_fields(fields_of(error))
                }
                FormKind::ItineraryUpdate => itinerary_update(error),
                FormKind::ItineraryCreate => Self::error(message_or(
                    error,
                    "Failed to create itinerary. Please try again.",
                ))
                .with_fields(fields_of(error)),
                FormKind::BlogCreate => Self::error(message_or(error, "Failed to create blog."))
                    .with_fields(fields_of(error)),
                FormKind::BlogUpdate => Self::error(message_or(error, "Failed to update blog."))
                    .with_fields(fields_of(error)),
                FormKind::ProfileUpdate => profile_update(error),
                FormKind::StaffCreate => staff_create(error),
                FormKind::Delete => delete(error),
            },
        }
    }
}

fn sign_in(error: &ApiError) -> Feedback {
    match error {
        ApiError::Unauthorized { .. } => Feedback::error("Invalid email or password"),
        ApiError::Validation { status: 422, .. } => {
            Feedback::error("Please check your input and try again").with_fields(fields_of(error))
        }
        ApiError::Server { .. } => Feedback::error(SERVER_MESSAGE),
        _ => Feedback::error(message_or(error, "Login failed. Please try again.")),
    }
}

fn itinerary_update(error: &ApiError) -> Feedback {
    match error {
        ApiError::Validation { .. } => {
            Feedback::error("Update failed. Please check all required fields.")
                .with_fields(fields_of(error))
        }
        ApiError::NotFound { .. } => {
            Feedback::error("Itinerary not found.").redirect_to(Route::Itineraries)
        }
        ApiError::Server { .. } => Feedback::error(SERVER_MESSAGE),
        _ => Feedback::error(message_or(
            error,
            "An unexpected error occurred. Please try again.",
        )),
    }
}

fn profile_update(error: &ApiError) -> Feedback {
    if let Some(message) = backend_message(error) {
        return Feedback::error(message).with_fields(fields_of(error));
    }
    let banner = match error.status() {
        Some(400) => "Invalid data provided. Please check all fields.",
        Some(401) => "Invalid credentials. Please check your password.",
        Some(403) => "You do not have permission to update this profile.",
        Some(409) => "Email address is already in use. Please choose a different email.",
        Some(500..=599) => SERVER_MESSAGE,
        _ => "Failed to update profile",
    };
    Feedback::error(banner).with_fields(fields_of(error))
}

fn staff_create(error: &ApiError) -> Feedback {
    if let Some(message) = backend_message(error) {
        return Feedback::error(message).with_fields(fields_of(error));
    }
    let banner = match error.status() {
        Some(400) => "Invalid data provided. Please check all fields are filled correctly.",
        Some(401) => "Authentication required. Please log in again.",
        Some(500..=599) => SERVER_MESSAGE,
        _ => "Failed to create staff members",
    };
    Feedback::error(banner)
}

fn delete(error: &ApiError) -> Feedback {
    match error {
        ApiError::NotFound { .. } => Feedback::error("Nothing to delete: it no longer exists."),
        ApiError::Server { .. } => Feedback::error(SERVER_MESSAGE),
        _ => Feedback::error(message_or(error, "Failed to delete. Please try again.")),
    }
}

/// The backend's own message, unless the error is an unexpected 2xx.
fn backend_message(error: &ApiError) -> Option<&str> {
    match error {
        ApiError::Status { status, .. } if *status < 300 => None,
        _ => error.detail(),
    }
}

fn message_or(error: &ApiError, fallback: &str) -> String {
    backend_message(error).unwrap_or(fallback).to_string()
}

fn fields_of(error: &ApiError) -> FieldErrors {
    error.field_errors().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::UploadBatch;

    #[test]
    fn test_sign_in_401_is_invalid_credentials() {
        let feedback = Feedback::from_api(
            FormKind::SignIn,
            &ApiError::Unauthorized {
                detail: "Incorrect email or password".to_string(),
            },
        );
        assert_eq!(feedback.banner, "Invalid email or password");
        assert!(feedback.field_errors.is_empty());
        assert_eq!(feedback.redirect, None);
        assert!(feedback.is_error());
    }

    #[test]
    fn test_sign_in_422_maps_fields() {
        let error = ApiError::from_response(
            422,
            r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}"#,
        );
        let feedback = Feedback::from_api(FormKind::SignIn, &error);
        assert_eq!(feedback.banner, "Please check your input and try again");
        assert_eq!(
            feedback.field_errors.first("email"),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_itinerary_update_404_redirects_to_list() {
        let error = SubmitError::Submit(ApiError::NotFound {
            detail: String::new(),
        });
        let feedback = Feedback::from_submit(FormKind::ItineraryUpdate, &error);
        assert_eq!(feedback.banner, "Itinerary not found.");
        assert_eq!(feedback.redirect, Some(Route::Itineraries));
    }

    #[test]
    fn test_delete_failures() {
        let missing = Feedback::from_api(
            FormKind::Delete,
            &ApiError::NotFound {
                detail: String::new(),
            },
        );
        assert_eq!(missing.banner, "Nothing to delete: it no longer exists.");
        assert_eq!(missing.redirect, None);

        let expired = Feedback::from_api(FormKind::Delete, &ApiError::SessionExpired);
        assert_eq!(expired.banner, SESSION_EXPIRED_MESSAGE);
        assert_eq!(expired.redirect, Some(Route::SignIn { redirect_to: None }));

        let network = Feedback::from_api(
            FormKind::Delete,
            &ApiError::Network("connection refused".to_string()),
        );
        assert_eq!(network.banner, NETWORK_MESSAGE);
    }

    #[test]
    fn test_network_and_server_messages() {
        let network = Feedback::from_api(
            FormKind::ItineraryUpdate,
            &ApiError::Network("connection refused".to_string()),
        );
        assert_eq!(network.banner, NETWORK_MESSAGE);

        let server = Feedback::from_api(
            FormKind::ItineraryUpdate,
            &ApiError::Server {
                status: 500,
                detail: "Traceback".to_string(),
            },
        );
        assert_eq!(server.banner, SERVER_MESSAGE);
    }

    #[test]
    fn test_profile_messages() {
        let conflict = Feedback::from_api(
            FormKind::ProfileUpdate,
            &ApiError::Conflict {
                detail: String::new(),
            },
        );
        assert_eq!(
            conflict.banner,
            "Email address is already in use. Please choose a different email."
        );

        let no_changes = Feedback::from_submit(FormKind::ProfileUpdate, &SubmitError::NoChanges);
        assert_eq!(
            no_changes.banner,
            "No changes detected. Please modify at least one field."
        );

        let backend = Feedback::from_api(
            FormKind::ProfileUpdate,
            &ApiError::Validation {
                status: 400,
                detail: "Current password is wrong".to_string(),
                fields: FieldErrors::new(),
            },
        );
        assert_eq!(backend.banner, "Current password is wrong");
    }

    #[test]
    fn test_validation_failure_keeps_field_errors() {
        let mut fields = FieldErrors::new();
        fields.add("days[0].title", "Day name is required");
        let feedback =
            Feedback::from_submit(FormKind::ItineraryUpdate, &SubmitError::Validation(fields));
        assert_eq!(
            feedback.field_errors.first("days[0].title"),
            Some("Day name is required")
        );
    }

    #[test]
    fn test_upload_failure_and_expired_session() {
        let upload = SubmitError::Upload {
            batch: UploadBatch::BlogCover,
            source: ApiError::Validation {
                status: 400,
                detail: "Unsupported file".to_string(),
                fields: FieldErrors::new(),
            },
        };
        let feedback = Feedback::from_submit(FormKind::BlogUpdate, &upload);
        assert_eq!(feedback.banner, "Image upload failed: Unsupported file");

        let expired = Feedback::from_submit(
            FormKind::BlogUpdate,
            &SubmitError::Submit(ApiError::SessionExpired),
        );
        assert_eq!(expired.redirect, Some(Route::SignIn { redirect_to: None }));
    }

    #[test]
    fn test_create_ignores_unexpected_success_status_detail() {
        let feedback = Feedback::from_api(
            FormKind::ItineraryCreate,
            &ApiError::Status {
                status: 200,
                detail: "expected 201 Created".to_string(),
            },
        );
        assert_eq!(
            feedback.banner,
            "Failed to create itinerary. Please try again."
        );
    }

    #[test]
    fn test_settled_lists_updated_fields() {
        let feedback = Feedback::settled(
            FormKind::ItineraryUpdate,
            &["price".to_string(), "title".to_string()],
            None,
        );
        assert_eq!(feedback.tone, Tone::Success);
        assert_eq!(
            feedback.banner,
            "Itinerary updated successfully. Updated fields: price, title"
        );
    }
}
