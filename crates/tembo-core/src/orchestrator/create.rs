//! Create flows.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{MutationOrchestrator, Settled, SubmissionState};
use crate::backend::AdminBackend;
use crate::cache::{QueryCache, QueryKey};
use crate::error::{ApiError, SubmitError};
use crate::forms::{BlogForm, ItineraryForm, NewBlog, NewItinerary};
use crate::models::WriteAck;
use crate::routes::Route;
use crate::tracker::{plan_create, PatchPayload, PatchSource};
use crate::validation::Schema;

/// A form that can be submitted to a create endpoint.
#[async_trait]
pub trait Creatable: PatchSource + Clone + Send + Sync + 'static {
    /// The form wrapped with its creation rules
    type Draft: Schema + Send;

    fn draft(&self) -> Self::Draft;

    fn list_key() -> QueryKey;

    fn after_create() -> Route;

    async fn create<B: AdminBackend>(
        backend: &B,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError>;
}

#[async_trait]
impl Creatable for ItineraryForm {
    type Draft = NewItinerary;

    fn draft(&self) -> NewItinerary {
        NewItinerary(self.clone())
    }

    fn list_key() -> QueryKey {
        QueryKey::Itineraries
    }

    fn after_create() -> Route {
        Route::Itineraries
    }

    async fn create<B: AdminBackend>(
        backend: &B,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        backend.create_itinerary(payload).await
    }
}

#[async_trait]
impl Creatable for BlogForm {
    type Draft = NewBlog;

    fn draft(&self) -> NewBlog {
        NewBlog(self.clone())
    }

    fn list_key() -> QueryKey {
        QueryKey::Blogs
    }

    fn after_create() -> Route {
        Route::Blogs
    }

    async fn create<B: AdminBackend>(
        backend: &B,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        backend.create_blog(payload).await
    }
}

/// Holds a new entity's form and submits it.
///
/// The form stays populated after a failed attempt so it can be retried.
pub struct Creator<F: Creatable, B> {
    backend: Arc<B>,
    cache: QueryCache,
    form: Mutex<F>,
    orchestrator: MutationOrchestrator,
}

pub type ItineraryCreator<B> = Creator<ItineraryForm, B>;
pub type BlogCreator<B> = Creator<BlogForm, B>;

impl<F: Creatable, B: AdminBackend> Creator<F, B> {
    pub fn new(backend: Arc<B>, cache: QueryCache, form: F) -> Self {
        Self {
            backend,
            cache,
            form: Mutex::new(form),
            orchestrator: MutationOrchestrator::new(),
        }
    }

    pub fn form(&self) -> F {
        self.lock().clone()
    }

    pub fn edit(&self, apply: impl FnOnce(&mut F)) {
        let mut form = self.lock();
        apply(&mut *form);
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

    /// Validate, upload every file, and POST the full body.
    ///
    /// # Errors
    ///
    /// Returns a `SubmitError` naming the stage that failed; an upload
    /// failure means the create request was never sent.
    pub async fn submit(&self) -> Result<Settled<WriteAck>, SubmitError> {
        let attempt = self.orchestrator.begin()?;
        let form = self.form();

        attempt.validate(&form.draft())?;
        let plan = plan_create(&form);
        let fields = plan.fields().to_vec();

        let payload = attempt.upload(plan, self.backend.as_ref()).await?;
        let ack = attempt
            .submit(F::create(self.backend.as_ref(), &payload))
            .await?;

        Ok(attempt
            .settle(
                &self.cache,
                ack,
                fields,
                vec![F::list_key()],
                Some(F::after_create()),
            )
            .await)
    }

    fn lock(&self) -> MutexGuard<'_, F> {
        self.form
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
