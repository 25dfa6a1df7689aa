//! Itinerary handlers.

use std::sync::Arc;

use super::Dashboard;
use crate::cache::QueryKey;
use crate::client::ApiClient;
use crate::display::{DeleteResult, Itineraries, UpdateResult};
use crate::error::{AdminError, Result};
use crate::forms::ItineraryForm;
use crate::models::{Itinerary, WriteAck};
use crate::orchestrator::{Editor, ItineraryCreator, Settled};
use crate::params::{Delete, Id};
use crate::routes::Route;
use crate::tracker::PatchPlan;
use crate::views::ViewState;

impl Dashboard {
    /// Handle listing the itinerary catalogue.
    ///
    /// Served from the cache while fresh.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tembo_core::DashboardBuilder;
    /// # async {
    /// let dashboard = DashboardBuilder::new().build()?;
    /// let itineraries = dashboard.list_itineraries().await?;
    /// println!("{itineraries}");
    /// # Result::<(), tembo_core::AdminError>::Ok(())
    /// # };
    /// ```
    pub async fn list_itineraries(&self) -> Result<Itineraries> {
        let itineraries = self.load_itineraries().await?;
        Ok(Itineraries(itineraries.as_ref().clone()))
    }

    /// The itinerary list as a view: failures become a retry hint.
    ///
    /// `refresh` reloads even when the cached list is still fresh.
    pub async fn itineraries_view(&self, refresh: bool) -> Result<ViewState<Vec<Itinerary>>> {
        self.require(&Route::Itineraries)?;
        let loader = || self.client.list_itineraries();
        let result = if refresh {
            self.cache.refresh(QueryKey::Itineraries, loader).await
        } else {
            self.cache.fetch(QueryKey::Itineraries, loader).await
        };
        Ok(ViewState::load(result, "itineraries"))
    }

    pub(crate) async fn load_itineraries(&self) -> Result<Arc<Vec<Itinerary>>> {
        self.require(&Route::Itineraries)?;
        Ok(self
            .cache
            .fetch(QueryKey::Itineraries, || self.client.list_itineraries())
            .await?)
    }

    /// Handle showing one itinerary with its days.
    pub async fn show_itinerary(&self, params: &Id) -> Result<Arc<Itinerary>> {
        self.require(&Route::Itinerary(params.id.clone()))?;
        Ok(self
            .cache
            .fetch(QueryKey::Itinerary(params.id.clone()), || {
                self.client.get_itinerary(&params.id)
            })
            .await?)
    }

    /// Handle creating an itinerary from a complete form.
    ///
    /// Every image batch is uploaded before the create request; the
    /// itinerary list is invalidated once it settles.
    ///
    /// # Errors
    ///
    /// `AdminError::Submit` naming the stage that failed.
    pub async fn create_itinerary(&self, form: ItineraryForm) -> Result<Settled<WriteAck>> {
        self.require(&Route::Itineraries)?;
        let creator = ItineraryCreator::new(self.client.clone(), self.cache.clone(), form);
        Ok(creator.submit().await?)
    }

    /// Handle a partial update: apply `edits` to the form built from the
    /// current snapshot and PATCH only the fields that changed.
    ///
    /// # Returns
    ///
    /// The refreshed itinerary and the fields the backend reports as
    /// updated
    ///
    /// # Errors
    ///
    /// `AdminError::Submit(SubmitError::NoChanges)` when `edits` leave the
    /// form equal to the snapshot; nothing is sent in that case.
    pub async fn update_itinerary<F>(&self, params: &Id, edits: F) -> Result<UpdateResult<Itinerary>>
    where
        F: FnOnce(&mut ItineraryForm),
    {
        self.require(&Route::Itinerary(params.id.clone()))?;
        let (settled, snapshot) = self.run_update::<Itinerary, _>(&params.id, edits).await?;
        let mut changes = settled.value.updated_field_names();
        if changes.is_empty() {
            changes = settled.fields.iter().map(|f| f.to_string()).collect();
        }
        Ok(UpdateResult::with_changes(snapshot.as_ref().clone(), changes))
    }

    /// The patch an update with `edits` would send, without sending it.
    pub async fn preview_itinerary_update<F>(&self, params: &Id, edits: F) -> Result<PatchPlan>
    where
        F: FnOnce(&mut ItineraryForm),
    {
        self.require(&Route::Itinerary(params.id.clone()))?;
        let editor: Editor<Itinerary, ApiClient> =
            Editor::open(self.client.clone(), self.cache.clone(), &params.id).await?;
        editor.edit(edits);
        Ok(editor.preview())
    }

    /// Handle deleting an itinerary.
    ///
    /// # Errors
    ///
    /// `AdminError::InvalidInput` unless the deletion was confirmed.
    pub async fn delete_itinerary(&self, params: &Delete) -> Result<DeleteResult> {
        require_confirmation(params)?;
        self.require(&Route::Itineraries)?;
        self.client.delete_itinerary(&params.id).await?;
        self.cache.invalidate(&QueryKey::Itineraries).await;
        self.cache
            .invalidate(&QueryKey::Itinerary(params.id.clone()))
            .await;
        log::info!("Deleted itinerary {}", params.id);
        Ok(DeleteResult::new("itinerary", &params.id))
    }
}

pub(crate) fn require_confirmation(params: &Delete) -> Result<()> {
    if params.id.trim().is_empty() {
        return Err(AdminError::invalid_input("id").with_reason("An ID is required"));
    }
    if !params.confirmed {
        return Err(AdminError::invalid_input("confirm")
            .with_reason("Deletion is permanent; pass --confirm to proceed"));
    }
    Ok(())
}
