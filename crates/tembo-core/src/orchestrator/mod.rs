//! Multi-step write sequencing.
//!
//! Every submission runs the same pipeline:
//!
//! ```text
//! Idle ─▶ Validating ─▶ Uploading(batch)* ─▶ Submitting ─▶ Settled
//!             │               │                  │
//!             ▼               ▼                  ▼
//!      ValidationFailed  UploadFailed(batch)  SubmitFailed
//! ```
//!
//! Each stage returns a tagged result, so a caller can tell which stage
//! failed from the [`SubmitError`] alone. Uploads run strictly one batch at a
//! time and always before the entity write. A [`MutationOrchestrator`] admits
//! a single attempt at a time; a second attempt while one is running is
//! refused with [`SubmitError::InFlight`].
//!
//! - [`stage`]: stage and state enums
//! - [`gate`]: the in-flight guard
//! - [`editor`]: update flows over a fetched snapshot
//! - [`create`]: create flows

pub mod create;
pub mod editor;
pub mod gate;
pub mod stage;

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

pub use create::{BlogCreator, Creatable, Creator, ItineraryCreator};
pub use editor::{BlogEditor, Editable, Editor, ItineraryEditor, ProfileEditor};
pub use gate::{SubmissionGate, SubmissionGuard};
pub use stage::{Stage, SubmissionState, UploadBatch};

use crate::backend::AssetUploader;
use crate::cache::{QueryCache, QueryKey};
use crate::error::{ApiError, SubmitError};
use crate::routes::Route;
use crate::tracker::{PatchPayload, PatchPlan};
use crate::validation::Schema;

/// Result of a settled mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<T> {
    pub value: T,
    /// Payload keys that were sent
    pub fields: Vec<&'static str>,
    /// Cache entries dropped after the write
    pub invalidated: Vec<QueryKey>,
    /// Where the UI should go next
    pub redirect: Option<Route>,
}

#[derive(Debug, Default)]
struct Progress {
    state: SubmissionState,
    trail: Vec<SubmissionState>,
}

/// Per-form submission coordinator.
#[derive(Debug, Default)]
pub struct MutationOrchestrator {
    gate: SubmissionGate,
    progress: Mutex<Progress>,
}

impl MutationOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the current or most recent attempt.
    pub fn state(&self) -> SubmissionState {
        self.progress().state
    }

    /// States visited by the current or most recent attempt, in order.
    pub fn trail(&self) -> Vec<SubmissionState> {
        self.progress().trail.clone()
    }

    /// Whether the submit control should be disabled.
    pub fn is_busy(&self) -> bool {
        !self.gate.is_open()
    }

    /// Start an attempt.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::InFlight` while another attempt holds the gate.
    pub fn begin(&self) -> Result<Attempt<'_>, SubmitError> {
        let guard = self.gate.try_enter().ok_or(SubmitError::InFlight)?;
        {
            let mut progress = self.progress();
            progress.trail.clear();
        }
        Ok(Attempt {
            orchestrator: self,
            _guard: guard,
        })
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        // Progress holds plain values, so a poisoned lock is still usable.
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter(&self, state: SubmissionState) {
        log::debug!("Submission {state}");
        let mut progress = self.progress();
        progress.state = state;
        progress.trail.push(state);
    }
}

/// One running submission attempt; the gate reopens when it is dropped.
pub struct Attempt<'a> {
    orchestrator: &'a MutationOrchestrator,
    _guard: SubmissionGuard,
}

impl<'a> Attempt<'a> {
    fn fail(&self, error: SubmitError) -> SubmitError {
        self.orchestrator
            .enter(SubmissionState::failed_at(error.stage()));
        error
    }

    /// Run the client-side schema check; nothing is sent when it fails.
    pub fn validate<S: Schema + ?Sized>(&self, form: &S) -> Result<(), SubmitError> {
        self.orchestrator.enter(SubmissionState::Validating);
        let errors = form.errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(self.fail(SubmitError::Validation(errors)))
        }
    }

    /// Reject an update whose plan carries no changes.
    pub fn require_changes(&self, plan: &PatchPlan) -> Result<(), SubmitError> {
        if plan.is_empty() {
            return Err(self.fail(SubmitError::NoChanges));
        }
        Ok(())
    }

    /// Upload the plan's files batch by batch, then build the payload.
    ///
    /// Plans without files skip the uploading state entirely.
    pub async fn upload(
        &self,
        plan: PatchPlan,
        uploader: &dyn AssetUploader,
    ) -> Result<PatchPayload, SubmitError> {
        let orchestrator = self.orchestrator;
        let mut on_batch = |batch| orchestrator.enter(SubmissionState::Uploading(batch));
        plan.upload_and_resolve_with(uploader, &mut on_batch)
            .await
            .map_err(|e| self.fail(e))
    }

    /// Issue the entity write.
    pub async fn submit<T, Fut>(&self, write: Fut) -> Result<T, SubmitError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.orchestrator.enter(SubmissionState::Submitting);
        write
            .await
            .map_err(|e| self.fail(SubmitError::Submit(e)))
    }

    /// Invalidate affected queries and close the attempt.
    pub async fn settle<T>(
        self,
        cache: &QueryCache,
        value: T,
        fields: Vec<&'static str>,
        invalidated: Vec<QueryKey>,
        redirect: Option<Route>,
    ) -> Settled<T> {
        for key in &invalidated {
            cache.invalidate(key).await;
        }
        self.orchestrator.enter(SubmissionState::Settled);
        log::info!("Mutation settled ({} field(s))", fields.len());
        Settled {
            value,
            fields,
            invalidated,
            redirect,
        }
    }
}
