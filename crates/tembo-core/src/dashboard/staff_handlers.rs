//! Staff and profile handlers.

use std::sync::Arc;

use super::itinerary_handlers::require_confirmation;
use super::{ensure_valid, Dashboard};
use crate::cache::QueryKey;
use crate::display::{DeleteResult, UpdateResult};
use crate::error::Result;
use crate::forms::ProfileForm;
use crate::models::{StaffList, StaffProfile, WriteAck};
use crate::params::{CreateStaff, Delete};
use crate::routes::Route;

impl Dashboard {
    /// Handle listing the staff directory.
    pub async fn list_staff(&self) -> Result<Arc<StaffList>> {
        self.require(&Route::Staff)?;
        Ok(self
            .cache
            .fetch(QueryKey::Staff, || self.client.list_staff())
            .await?)
    }

    /// Handle creating several staff accounts in one request.
    ///
    /// # Errors
    ///
    /// `SubmitError::Validation` with `staff[i].field` paths when any member
    /// fails the local rules; nothing is sent in that case.
    pub async fn create_staff(&self, params: &CreateStaff) -> Result<WriteAck> {
        ensure_valid(params)?;
        self.require(&Route::Staff)?;
        let ack = self.client.create_staff(params).await?;
        self.cache.invalidate(&QueryKey::Staff).await;
        log::info!("Created {} staff member(s)", params.staff.len());
        Ok(ack)
    }

    pub async fn delete_staff(&self, params: &Delete) -> Result<DeleteResult> {
        require_confirmation(params)?;
        self.require(&Route::Staff)?;
        self.client.delete_staff(&params.id).await?;
        self.cache.invalidate(&QueryKey::Staff).await;
        Ok(DeleteResult::new("staff member", &params.id))
    }

    /// The signed-in staff member's profile.
    pub async fn profile(&self) -> Result<Arc<StaffProfile>> {
        self.require(&Route::Settings)?;
        Ok(self
            .cache
            .fetch(QueryKey::StaffProfile, || self.client.me())
            .await?)
    }

    /// Handle a profile update.
    ///
    /// Only trimmed fields that differ from the fetched profile are sent,
    /// and the password only when one was entered. On success the session
    /// identity is refreshed from the returned profile and saved.
    pub async fn update_profile<F>(&self, edits: F) -> Result<UpdateResult<StaffProfile>>
    where
        F: FnOnce(&mut ProfileForm),
    {
        self.require(&Route::Settings)?;
        let (settled, _) = self.run_update::<StaffProfile, _>("me", edits).await?;
        let profile = settled.value;

        {
            let mut session = self.session_guard();
            if let Some(context) = session.as_mut() {
                context.staff = context.staff.updated_from(&profile);
                context.tokens = self.client.tokens();
                self.store.save(context)?;
            }
        }

        let changes = settled.fields.iter().map(|f| f.to_string()).collect();
        Ok(UpdateResult::with_changes(profile, changes))
    }
}
