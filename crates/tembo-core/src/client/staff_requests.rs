//! Staff and profile endpoints.

use serde_json::Value;

use super::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{StaffList, StaffProfile, WriteAck};
use crate::params::{CreateStaff, NewStaffMember};
use crate::tracker::PatchPayload;

const ME_PATH: &str = "/staff/me";
const ALL_STAFF_PATH: &str = "/staff/all";
const CREATE_STAFF_PATH: &str = "/staff/create";

impl ApiClient {
    pub async fn me(&self) -> Result<StaffProfile, ApiError> {
        self.execute(&ApiRequest::get(ME_PATH)).await?.json()
    }

    /// Patch the signed-in profile.
    ///
    /// The backend answers either with the profile itself or wrapped as
    /// `{"staff": {...}}`; both are accepted.
    pub async fn update_me(&self, payload: &PatchPayload) -> Result<StaffProfile, ApiError> {
        let request = ApiRequest::patch(ME_PATH).json(payload)?;
        let body = self.execute(&request).await?.value();
        let profile = match body {
            Value::Object(mut map) if map.get("staff").is_some_and(Value::is_object) => {
                map.remove("staff").unwrap_or_default()
            }
            other => other,
        };
        serde_json::from_value(profile).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn list_staff(&self) -> Result<StaffList, ApiError> {
        self.execute(&ApiRequest::get(ALL_STAFF_PATH)).await?.json()
    }

    /// Create several accounts in one request; the body is a bare array.
    pub async fn create_staff(&self, params: &CreateStaff) -> Result<WriteAck, ApiError> {
        let members: Vec<NewStaffMember> =
            params.staff.iter().map(NewStaffMember::trimmed).collect();
        let request = ApiRequest::post(CREATE_STAFF_PATH).json(&members)?;
        Ok(WriteAck::from_value(self.execute(&request).await?.value()))
    }

    pub async fn delete_staff(&self, id: &str) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("/staff/{id}")))
            .await
            .map(|_| ())
    }
}
