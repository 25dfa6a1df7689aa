//! Staff accounts and the authenticated profile.

use serde::{Deserialize, Serialize};

use super::de::{null_as_default, string_or_number};

/// Manager a staff member reports to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manager {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// One entry of `/staff/all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffMember {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default)]
    pub manager: Option<Manager>,
}

impl StaffMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Response of `/staff/all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StaffList {
    #[serde(default)]
    pub staff_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub staff: Vec<StaffMember>,
}

/// The signed-in staff member's own profile (`/staff/me`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

impl StaffProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Identity block returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

/// Response of `/staff/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub staff_info: StaffInfo,
}
