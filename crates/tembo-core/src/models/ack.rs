//! Acknowledgement bodies returned by write endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::optional_string_or_number;

/// What a create or update endpoint sent back.
///
/// Write endpoints are loosely typed: creates return the new entity, updates
/// return `{ "updated_fields": {...} }`. Only the parts the client uses are
/// kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WriteAck {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub updated_fields: Value,
}

impl WriteAck {
    /// Parse any JSON body; non-object bodies give an empty ack.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Names of the fields the backend reports as updated.
    pub fn updated_field_names(&self) -> Vec<String> {
        match &self.updated_fields {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}
