//! Classification of non-success responses.

use serde_json::Value;

use crate::error::ApiError;
use crate::validation::FieldErrors;

const MAX_TEXT_DETAIL: usize = 200;

impl ApiError {
    /// Build the error for a non-success `status` with response `body`.
    ///
    /// The backend reports problems as `{"detail": "..."}`, as FastAPI-style
    /// `{"detail": [{"loc": [...], "msg": "..."}]}`, or as
    /// `{"message": "..."}`. List details become per-field errors keyed by
    /// their `loc` path (`days[1].title`).
    pub fn from_response(status: u16, body: &str) -> Self {
        let (detail, fields) = match serde_json::from_str::<Value>(body) {
            Ok(value) => describe(&value),
            Err(_) => (plain_text(body), FieldErrors::new()),
        };

        match status {
            401 => ApiError::Unauthorized { detail },
            400 | 422 => ApiError::Validation {
                status,
                detail,
                fields,
            },
            403 => ApiError::Forbidden { detail },
            404 => ApiError::NotFound { detail },
            409 => ApiError::Conflict { detail },
            500..=599 => ApiError::Server { status, detail },
            _ => ApiError::Status { status, detail },
        }
    }

    /// Per-field messages the backend attached, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

fn describe(body: &Value) -> (String, FieldErrors) {
    let mut fields = FieldErrors::new();
    let detail = match body.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => {
            for item in items {
                let message = item
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or("Invalid value");
                let path = item
                    .get("loc")
                    .and_then(Value::as_array)
                    .and_then(|loc| field_path(loc));
                if let Some(path) = path {
                    fields.add(path, message);
                }
            }
            items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
                .unwrap_or("Validation error")
                .to_string()
        }
        _ => ["message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string(),
    };
    (detail, fields)
}

/// `["body", "days", 1, "title"]` -> `days[1].title`.
fn field_path(loc: &[Value]) -> Option<String> {
    let mut path = String::new();
    let segments = match loc.first().and_then(Value::as_str) {
        Some("body" | "query" | "path") => &loc[1..],
        _ => loc,
    };
    for segment in segments {
        match segment {
            Value::String(name) => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(name);
            }
            Value::Number(index) => path.push_str(&format!("[{index}]")),
            _ => {}
        }
    }
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

fn plain_text(body: &str) -> String {
    let text = body.trim();
    if text.chars().count() > MAX_TEXT_DETAIL {
        let cut: String = text.chars().take(MAX_TEXT_DETAIL).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_string_detail() {
        let err = ApiError::from_response(404, r#"{"detail": "Itinerary not found"}"#);
        assert_eq!(
            err,
            ApiError::NotFound {
                detail: "Itinerary not found".to_string()
            }
        );
    }

    #[test]
    fn test_validation_detail_maps_fields() {
        let body = r#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "days", 1, "title"], "msg": "field required"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.first("email"), Some("value is not a valid email address"));
        assert_eq!(fields.first("days[1].title"), Some("field required"));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.detail(), Some("value is not a valid email address"));
    }

    #[test]
    fn test_message_fallback_and_status_classes() {
        let err = ApiError::from_response(409, r#"{"message": "Email already registered"}"#);
        assert_eq!(err.detail(), Some("Email already registered"));
        assert!(matches!(err, ApiError::Conflict { .. }));

        let err = ApiError::from_response(503, "<html>Bad gateway</html>");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.category(), ErrorCategory::Server);

        let err = ApiError::from_response(418, "");
        assert!(matches!(err, ApiError::Status { status: 418, .. }));
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_long_text_body_is_truncated() {
        let body = "x".repeat(500);
        let err = ApiError::from_response(500, &body);
        assert_eq!(err.detail().unwrap().len(), MAX_TEXT_DETAIL + 3);
    }
}
