//! Blog post form.

use serde::{Deserialize, Serialize};

use super::NewImage;
use crate::models::Blog;
use crate::validation::{rules, FieldErrors, Schema};

/// Live, editable mirror of a [`Blog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub content: String,
    /// Cover currently stored for the post
    #[serde(default)]
    pub image_url: String,
    /// Replacement cover, uploaded on submit
    #[serde(default)]
    pub new_image: Option<NewImage>,
}

impl BlogForm {
    pub fn from_snapshot(snapshot: &Blog) -> Self {
        Self {
            title: snapshot.title.clone(),
            content: snapshot.content.clone(),
            image_url: snapshot.image_url.clone(),
            new_image: None,
        }
    }

    pub fn without_pending_files(&self) -> Self {
        Self {
            new_image: None,
            ..self.clone()
        }
    }
}

impl Schema for BlogForm {
    fn check(&self, errors: &mut FieldErrors) {
        rules::non_empty(errors, "title", &self.title, "Title is required");
        rules::non_empty(errors, "content", &self.content, "Content is required");
        if let Some(image) = &self.new_image {
            rules::image_file(errors, "image", image.path());
        }
    }
}

/// A blog form being submitted for creation; the cover is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NewBlog(pub BlogForm);

impl Schema for NewBlog {
    fn check(&self, errors: &mut FieldErrors) {
        self.0.check(errors);
        if self.0.new_image.is_none() {
            errors.add("image", "Image is required");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_blog_requires_cover() {
        let form = NewBlog(BlogForm {
            title: "Calving season".to_string(),
            content: "The southern Serengeti in February".to_string(),
            ..BlogForm::default()
        });
        let errors = form.errors();
        assert_eq!(errors.first("image"), Some("Image is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_update_allows_missing_cover() {
        let form = BlogForm {
            title: "Calving season".to_string(),
            content: "".to_string(),
            ..BlogForm::default()
        };
        let errors = form.errors();
        assert_eq!(errors.first("content"), Some("Content is required"));
        assert!(!errors.contains("image"));
    }
}
