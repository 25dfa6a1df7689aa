//! Editable form state for each entity.
//!
//! A form is the live, user-editable mirror of a fetched snapshot plus any
//! files picked for upload but not yet sent. [`FormSession`] pairs a form with
//! the baseline it was initialised from so the tracker can diff the two.

pub mod blog;
pub mod itinerary;
pub mod profile;
pub mod session;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use blog::{BlogForm, NewBlog};
pub use itinerary::{DayForm, ItineraryForm, NewItinerary};
pub use profile::ProfileForm;
pub use session::FormSession;

/// A local file selected for upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct NewImage {
    pub path: PathBuf,
}

impl NewImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent in the multipart part.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string()
    }

    /// MIME type inferred from the extension.
    pub fn mime(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

/// Trim every entry and drop the empty ones.
pub(crate) fn clean_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
