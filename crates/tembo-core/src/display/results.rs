//! Result wrapper types for displaying mutation outcomes.

use std::fmt;

use crate::feedback::{Feedback, Tone};
use crate::models::{Blog, Itinerary, StaffProfile, WriteAck};

/// An entity that mutation results can name.
pub trait Resource {
    const NOUN: &'static str;

    fn resource_id(&self) -> &str;
}

impl Resource for Itinerary {
    const NOUN: &'static str = "itinerary";

    fn resource_id(&self) -> &str {
        &self.id
    }
}

impl Resource for Blog {
    const NOUN: &'static str = "blog";

    fn resource_id(&self) -> &str {
        &self.id
    }
}

impl Resource for StaffProfile {
    const NOUN: &'static str = "profile";

    fn resource_id(&self) -> &str {
        &self.id
    }
}

/// Outcome of a create request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateResult {
    pub noun: &'static str,
    pub ack: WriteAck,
}

impl CreateResult {
    pub fn new(noun: &'static str, ack: WriteAck) -> Self {
        Self { noun, ack }
    }
}

impl fmt::Display for CreateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ack.id {
            Some(id) => writeln!(f, "Created {} with ID: {id}", self.noun)?,
            None => writeln!(f, "Created {}", self.noun)?,
        }
        if let Some(message) = &self.ack.message {
            writeln!(f)?;
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}

/// Outcome of an update, with the fields that changed and the refreshed
/// entity.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource + fmt::Display> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated {} with ID: {}",
            T::NOUN,
            self.resource.resource_id()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteResult {
    pub noun: &'static str,
    pub id: String,
}

impl DeleteResult {
    pub fn new(noun: &'static str, id: impl Into<String>) -> Self {
        Self {
            noun,
            id: id.into(),
        }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} (ID: {})", self.noun, self.id)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.tone {
            Tone::Success => "Success:",
            Tone::Error => "Error:",
        };
        writeln!(f, "{label} {}", self.banner)?;
        if !self.field_errors.is_empty() {
            writeln!(f)?;
            for (field, messages) in self.field_errors.iter() {
                for message in messages {
                    writeln!(f, "- `{field}`: {message}")?;
                }
            }
        }
        if let Some(route) = &self.redirect {
            writeln!(f)?;
            writeln!(f, "Next: {route}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::feedback::FormKind;
    use crate::validation::FieldErrors;

    #[test]
    fn test_create_result_display() {
        let ack = WriteAck {
            id: Some("12".to_string()),
            message: None,
            updated_fields: serde_json::Value::Null,
        };
        assert_eq!(
            CreateResult::new("itinerary", ack).to_string(),
            "Created itinerary with ID: 12\n"
        );
    }

    #[test]
    fn test_update_result_lists_changes() {
        let profile = StaffProfile {
            id: "4".to_string(),
            first_name: "Amani".to_string(),
            last_name: "Otieno".to_string(),
            email: "amani@tembo.co.ke".to_string(),
            role: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let output =
            UpdateResult::with_changes(profile, vec!["first_name".to_string()]).to_string();
        assert!(output.starts_with("Updated profile with ID: 4"));
        assert!(output.contains("- first_name"));
        assert!(output.contains("# Amani Otieno"));
    }

    #[test]
    fn test_feedback_display_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.add("title", "Title is required");
        let feedback =
            Feedback::from_submit(FormKind::ItineraryUpdate, &SubmitError::Validation(fields));
        let output = feedback.to_string();
        assert!(output.starts_with("Error: "));
        assert!(output.contains("- `title`: Title is required"));
    }
}
