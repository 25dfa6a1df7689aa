//! The signed-in staff member's profile form.

use serde::{Deserialize, Serialize};

use crate::models::StaffProfile;
use crate::validation::{rules, FieldErrors, Schema};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// New password; empty keeps the current one
    #[serde(default)]
    pub password: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &StaffProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            password: String::new(),
        }
    }
}

impl Schema for ProfileForm {
    fn check(&self, errors: &mut FieldErrors) {
        rules::min_chars(
            errors,
            "first_name",
            self.first_name.trim(),
            2,
            "First name must be at least 2 characters",
        );
        rules::min_chars(
            errors,
            "last_name",
            self.last_name.trim(),
            2,
            "Last name must be at least 2 characters",
        );
        rules::email(
            errors,
            "email",
            &self.email,
            "Please enter a valid email address",
        );
        if !self.password.is_empty() {
            rules::min_chars(
                errors,
                "password",
                &self.password,
                6,
                "Password must be at least 6 characters",
            );
        }
    }
}
