//! Parameter structures for dashboard operations.
//!
//! These are plain data carriers shared by every front end. The CLI wraps them
//! with clap-specific argument structs and converts via `From`, so the core
//! types never depend on a UI framework. Entity forms with baseline tracking
//! live in [`crate::forms`]; the simpler one-shot forms live here.

use serde::{Deserialize, Serialize};

use crate::validation::{rules, FieldErrors, Schema};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Parameters for permanently deleting a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delete {
    /// ID of the resource to delete
    pub id: String,
    /// Deletion must be confirmed explicitly
    #[serde(default)]
    pub confirmed: bool,
}

/// Credentials for `/staff/auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

impl Schema for SignIn {
    fn check(&self, errors: &mut FieldErrors) {
        rules::email(errors, "email", &self.email, "Must be a valid email");
        rules::min_chars(
            errors,
            "password",
            &self.password,
            8,
            "Must be at least 8 characters long",
        );
    }
}

/// Manager self-registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Never sent; must equal `password`
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

impl Schema for SignUp {
    fn check(&self, errors: &mut FieldErrors) {
        rules::min_chars(
            errors,
            "first_name",
            self.first_name.trim(),
            1,
            "Must be at least 1 character long",
        );
        rules::min_chars(
            errors,
            "last_name",
            self.last_name.trim(),
            1,
            "Must be at least 1 character long",
        );
        rules::email(errors, "email", &self.email, "Must be a valid email");
        rules::min_chars(
            errors,
            "password",
            &self.password,
            8,
            "Must be at least 8 characters long",
        );
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }
    }
}

/// One account in a bulk staff creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewStaffMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewStaffMember {
    /// Copy with surrounding whitespace removed, as sent on the wire.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// Bulk staff creation (`/staff/create` takes a JSON array).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStaff {
    pub staff: Vec<NewStaffMember>,
}

impl Schema for CreateStaff {
    fn check(&self, errors: &mut FieldErrors) {
        if self.staff.is_empty() {
            errors.add("staff", "At least one staff member is required");
        }
        for (index, member) in self.staff.iter().enumerate() {
            let prefix = format!("staff[{index}]");
            rules::min_chars(
                errors,
                &format!("{prefix}.first_name"),
                member.first_name.trim(),
                2,
                "First name must be at least 2 characters",
            );
            rules::min_chars(
                errors,
                &format!("{prefix}.last_name"),
                member.last_name.trim(),
                2,
                "Last name must be at least 2 characters",
            );
            let email_field = format!("{prefix}.email");
            rules::email(
                errors,
                &email_field,
                &member.email,
                "Please enter a valid email address",
            );
            rules::complete_email(
                errors,
                &email_field,
                &member.email,
                "Please enter a complete email address (e.g., user@domain.com)",
            );
        }
    }
}

/// Paging for `/bookings/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListBookings {
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListBookings {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validated;

    #[test]
    fn test_sign_in_rejects_bad_email_and_short_password() {
        let params = SignIn {
            email: "ranger".to_string(),
            password: "short".to_string(),
        };
        let errors = params.errors();
        assert_eq!(errors.first("email"), Some("Must be a valid email"));
        assert_eq!(
            errors.first("password"),
            Some("Must be at least 8 characters long")
        );
    }

    #[test]
    fn test_sign_up_password_confirmation_mismatch() {
        let params = SignUp {
            first_name: "Amani".to_string(),
            last_name: "Otieno".to_string(),
            email: "amani@safari.co.ke".to_string(),
            password: "savannah-sun".to_string(),
            confirm_password: "savannah-moon".to_string(),
        };
        let errors = params.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first("confirm_password"), Some("Passwords do not match"));
    }

    #[test]
    fn test_sign_up_confirmation_not_serialized() {
        let params = SignUp {
            confirm_password: "secret".to_string(),
            ..SignUp::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("confirm_password").is_none());
    }

    #[test]
    fn test_create_staff_requires_members() {
        let errors = CreateStaff::default().errors();
        assert_eq!(
            errors.first("staff"),
            Some("At least one staff member is required")
        );
    }

    #[test]
    fn test_create_staff_indexes_member_errors() {
        let params = CreateStaff {
            staff: vec![
                NewStaffMember {
                    first_name: "Baraka".to_string(),
                    last_name: "Mwangi".to_string(),
                    email: "baraka@tembo.co.ke".to_string(),
                },
                NewStaffMember {
                    first_name: "J".to_string(),
                    last_name: "Kamau".to_string(),
                    email: "j@localhost".to_string(),
                },
            ],
        };
        match params.validate() {
            Validated::Invalid(errors) => {
                assert!(errors.contains("staff[1].first_name"));
                assert!(errors.contains("staff[1].email"));
                assert!(!errors.contains("staff[0].email"));
            }
            Validated::Valid(_) => panic!("Expected validation errors"),
        }
    }

    #[test]
    fn test_new_staff_member_trimmed() {
        let member = NewStaffMember {
            first_name: "  Zawadi ".to_string(),
            last_name: "Njeri ".to_string(),
            email: " zawadi@tembo.co.ke".to_string(),
        };
        let trimmed = member.trimmed();
        assert_eq!(trimmed.first_name, "Zawadi");
        assert_eq!(trimmed.email, "zawadi@tembo.co.ke");
    }
}
