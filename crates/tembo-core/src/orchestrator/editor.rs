//! Update flows over a fetched snapshot.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{MutationOrchestrator, Settled, SubmissionState};
use crate::backend::AdminBackend;
use crate::cache::{QueryCache, QueryKey};
use crate::error::{ApiError, SubmitError};
use crate::forms::{BlogForm, FormSession, ItineraryForm, ProfileForm};
use crate::models::{Blog, Itinerary, StaffProfile, WriteAck};
use crate::routes::Route;
use crate::tracker::{plan_patch, Diffable, DirtySet, PatchPayload, PatchPlan, PatchSource};
use crate::validation::Schema;

/// A backend entity that can be edited through a form.
#[async_trait]
pub trait Editable: Sized + Send + Sync + 'static {
    type Form: PatchSource + Schema + Clone + Send + Sync + 'static;
    /// What the write endpoint returns
    type Ack: Send + 'static;

    fn to_form(&self) -> Self::Form;

    fn detail_key(id: &str) -> QueryKey;

    /// List query that also shows this entity, if any.
    fn list_key() -> Option<QueryKey>;

    /// Where to navigate after a successful update.
    fn after_update(id: &str) -> Option<Route>;

    async fn fetch<B: AdminBackend>(backend: &B, id: &str) -> Result<Self, ApiError>;

    async fn write<B: AdminBackend>(
        backend: &B,
        id: &str,
        payload: &PatchPayload,
    ) -> Result<Self::Ack, ApiError>;
}

#[async_trait]
impl Editable for Itinerary {
    type Form = ItineraryForm;
    type Ack = WriteAck;

    fn to_form(&self) -> ItineraryForm {
        ItineraryForm::from_snapshot(self)
    }

    fn detail_key(id: &str) -> QueryKey {
        QueryKey::Itinerary(id.to_string())
    }

    fn list_key() -> Option<QueryKey> {
        Some(QueryKey::Itineraries)
    }

    fn after_update(id: &str) -> Option<Route> {
        Some(Route::Itinerary(id.to_string()))
    }

    async fn fetch<B: AdminBackend>(backend: &B, id: &str) -> Result<Self, ApiError> {
        backend.fetch_itinerary(id).await
    }

    async fn write<B: AdminBackend>(
        backend: &B,
        id: &str,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        backend.patch_itinerary(id, payload).await
    }
}

#[async_trait]
impl Editable for Blog {
    type Form = BlogForm;
    type Ack = WriteAck;

    fn to_form(&self) -> BlogForm {
        BlogForm::from_snapshot(self)
    }

    fn detail_key(id: &str) -> QueryKey {
        QueryKey::Blog(id.to_string())
    }

    fn list_key() -> Option<QueryKey> {
        Some(QueryKey::Blogs)
    }

    fn after_update(_id: &str) -> Option<Route> {
        Some(Route::Blogs)
    }

    async fn fetch<B: AdminBackend>(backend: &B, id: &str) -> Result<Self, ApiError> {
        backend.fetch_blog(id).await
    }

    async fn write<B: AdminBackend>(
        backend: &B,
        id: &str,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        backend.patch_blog(id, payload).await
    }
}

#[async_trait]
impl Editable for StaffProfile {
    type Form = ProfileForm;
    type Ack = StaffProfile;

    fn to_form(&self) -> ProfileForm {
        ProfileForm::from_profile(self)
    }

    fn detail_key(_id: &str) -> QueryKey {
        QueryKey::StaffProfile
    }

    fn list_key() -> Option<QueryKey> {
        Some(QueryKey::Staff)
    }

    fn after_update(_id: &str) -> Option<Route> {
        None
    }

    async fn fetch<B: AdminBackend>(backend: &B, _id: &str) -> Result<Self, ApiError> {
        backend.fetch_profile().await
    }

    async fn write<B: AdminBackend>(
        backend: &B,
        _id: &str,
        payload: &PatchPayload,
    ) -> Result<StaffProfile, ApiError> {
        backend.patch_profile(payload).await
    }
}

struct EditorState<T: Editable> {
    snapshot: Arc<T>,
    session: FormSession<T::Form>,
}

/// Edits one entity: holds its snapshot, the live form, and the
/// submission pipeline.
pub struct Editor<T: Editable, B> {
    backend: Arc<B>,
    cache: QueryCache,
    id: String,
    state: Mutex<EditorState<T>>,
    orchestrator: MutationOrchestrator,
}

pub type ItineraryEditor<B> = Editor<Itinerary, B>;
pub type BlogEditor<B> = Editor<Blog, B>;
pub type ProfileEditor<B> = Editor<StaffProfile, B>;

impl<T: Editable, B: AdminBackend> Editor<T, B> {
    /// Fetch the snapshot (through the cache) and start editing it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, e.g. `ApiError::NotFound` for a stale link.
    pub async fn open(backend: Arc<B>, cache: QueryCache, id: &str) -> Result<Self, ApiError> {
        let snapshot = cache
            .fetch(T::detail_key(id), || T::fetch(backend.as_ref(), id))
            .await?;
        Ok(Self::with_snapshot(backend, cache, id, snapshot))
    }

    /// Start editing an already fetched snapshot.
    pub fn with_snapshot(
        backend: Arc<B>,
        cache: QueryCache,
        id: impl Into<String>,
        snapshot: Arc<T>,
    ) -> Self {
        let session = FormSession::new(snapshot.to_form());
        Self {
            backend,
            cache,
            id: id.into(),
            state: Mutex::new(EditorState { snapshot, session }),
            orchestrator: MutationOrchestrator::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> Arc<T> {
        self.lock().snapshot.clone()
    }

    /// Copy of the live form.
    pub fn form(&self) -> T::Form {
        self.lock().session.current().clone()
    }

    pub fn edit(&self, apply: impl FnOnce(&mut T::Form)) {
        self.lock().session.edit(apply);
    }

    pub fn dirty(&self) -> DirtySet<<T::Form as Diffable>::Field> {
        self.lock().session.dirty()
    }

    /// The plan a submit would run right now.
    pub fn preview(&self) -> PatchPlan {
        let state = self.lock();
        plan_patch(state.session.baseline(), state.session.current())
    }

    /// Drop every unsaved edit.
    pub fn discard(&self) {
        self.lock().session.discard();
    }

    pub fn state(&self) -> SubmissionState {
        self.orchestrator.state()
    }

    pub fn trail(&self) -> Vec<SubmissionState> {
        self.orchestrator.trail()
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Validate, upload pending files, and PATCH the changed fields.
    ///
    /// On failure the form and its dirty fields are left untouched so the
    /// user can retry. On success the snapshot is refetched and the form
    /// reset to it.
    ///
    /// # Errors
    ///
    /// Returns a `SubmitError` naming the stage that failed.
    pub async fn submit(&self) -> Result<Settled<T::Ack>, SubmitError> {
        let attempt = self.orchestrator.begin()?;
        let (baseline, current) = {
            let state = self.lock();
            (
                state.session.baseline().clone(),
                state.session.current().clone(),
            )
        };

        attempt.validate(&current)?;
        let plan = plan_patch(&baseline, &current);
        attempt.require_changes(&plan)?;
        let fields = plan.fields().to_vec();

        let payload = attempt.upload(plan, self.backend.as_ref()).await?;
        let ack = attempt
            .submit(T::write(self.backend.as_ref(), &self.id, &payload))
            .await?;

        let invalidated: Vec<QueryKey> = std::iter::once(T::detail_key(&self.id))
            .chain(T::list_key())
            .collect();
        let settled = attempt
            .settle(&self.cache, ack, fields, invalidated, T::after_update(&self.id))
            .await;

        self.rebase(&current).await;
        Ok(settled)
    }

    /// Replace the snapshot after a successful write.
    async fn rebase(&self, submitted: &T::Form) {
        let refetched = self
            .cache
            .fetch(T::detail_key(&self.id), || {
                T::fetch(self.backend.as_ref(), &self.id)
            })
            .await;

        let mut state = self.lock();
        match refetched {
            Ok(snapshot) => {
                state.session.reset(snapshot.to_form());
                state.snapshot = snapshot;
            }
            Err(e) => {
                log::warn!("Refetching {} after update failed: {e}", self.id);
                state.session.reset(submitted.committed());
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
