//! Blog post model.

use serde::{Deserialize, Serialize};

use super::de::{null_as_default, string_or_number};

/// A published blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blog {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_public_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_email: String,
    /// Creation time as sent by the backend (ISO 8601)
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}
