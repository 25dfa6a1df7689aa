//! Declarative per-entity validation.
//!
//! Every form type implements [`Schema`] by listing its rules once in
//! [`Schema::check`]; [`Schema::validate`] turns the collected messages into a
//! tagged [`Validated`] result. The same rules back the pre-submit check of
//! the mutation orchestrator and the CLI's argument checks.
//!
//! Field paths use dotted/indexed form, e.g. `days[1].title`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Field path to messages, ordered by path for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field path.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message for a field, which is what an inline error shows.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Move all messages of `other` into `self`, prefixing their paths.
    pub fn merge_nested(&mut self, prefix: &str, other: FieldErrors) {
        for (field, messages) in other.0 {
            let path = format!("{prefix}.{field}");
            self.0.entry(path).or_default().extend(messages);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.0 {
            for message in messages {
                writeln!(f, "- {field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Outcome of running a schema over a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(FieldErrors),
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn into_result(self) -> Result<T, FieldErrors> {
        match self {
            Validated::Valid(value) => Ok(value),
            Validated::Invalid(errors) => Err(errors),
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Validated::Valid(_) => None,
            Validated::Invalid(errors) => Some(errors),
        }
    }
}

/// A type whose field constraints are declared in one place.
pub trait Schema {
    /// Push a message for every violated rule.
    fn check(&self, errors: &mut FieldErrors);

    /// Run all rules, handing the value back when it is valid.
    fn validate(self) -> Validated<Self>
    where
        Self: Sized,
    {
        let errors = self.errors();
        if errors.is_empty() {
            Validated::Valid(self)
        } else {
            Validated::Invalid(errors)
        }
    }

    /// Run all rules and return whatever was collected.
    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.check(&mut errors);
        errors
    }
}

/// Reusable field rules.
pub mod rules {
    use super::*;

    pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

    fn email_pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*$")
                .expect("email pattern is a valid regex")
        })
    }

    pub fn non_empty(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            errors.add(field, message);
        }
    }

    pub fn min_chars(errors: &mut FieldErrors, field: &str, value: &str, min: usize, message: &str) {
        if value.chars().count() < min {
            errors.add(field, message);
        }
    }

    pub fn positive(errors: &mut FieldErrors, field: &str, value: i64, message: &str) {
        if value <= 0 {
            errors.add(field, message);
        }
    }

    pub fn non_negative(errors: &mut FieldErrors, field: &str, value: f64, message: &str) {
        if value.is_nan() || value < 0.0 {
            errors.add(field, message);
        }
    }

    pub fn email(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
        if !email_pattern().is_match(value.trim()) {
            errors.add(field, message);
        }
    }

    /// Stricter than [`email`]: the domain part must contain a dot.
    pub fn complete_email(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
        let value = value.trim();
        let has_dotted_domain = value
            .split_once('@')
            .map(|(_, domain)| domain.contains('.'))
            .unwrap_or(false);
        if email_pattern().is_match(value) && !has_dotted_domain {
            errors.add(field, message);
        }
    }

    pub fn image_file(errors: &mut FieldErrors, field: &str, path: &Path) {
        let allowed = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !allowed {
            errors.add(field, "Only JPEG, PNG, and WebP files are allowed");
        }
    }
}
