//! High-level admin API.
//!
//! [`Dashboard`] ties the pieces together for a front end: it holds the API
//! client, the read-view cache, and the persisted session, and exposes one
//! method per screen action.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │  Editors and    │    │   ApiClient     │
//! │ (auth, blog,    │───▶│  Creators       │───▶│ (refresh-retry, │
//! │  itinerary...)  │    │ (orchestrator)  │    │  cookies)       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                                            │
//!          ▼                                            ▼
//!   SessionStore (JSON)                       QueryCache (moka)
//! ```
//!
//! - [`builder`]: assembles config, session store and client
//! - [`auth_handlers`]: sign-in, sign-out, registration, session sync
//! - [`itinerary_handlers`] and [`blog_handlers`]: read views and mutations
//! - [`staff_handlers`]: staff directory, bulk creation, own profile
//! - [`report_handlers`]: overview reports
//!
//! Protected actions check the [`RouteGuard`] first and fail with
//! `AdminError::SignInRequired` when there is no session.
//!
//! ```rust,no_run
//! use tembo_core::{params::SignIn, DashboardBuilder};
//!
//! # async fn example() -> Result<(), tembo_core::AdminError> {
//! let dashboard = DashboardBuilder::new()
//!     .with_api_url(Some("http://localhost:8000"))
//!     .build()?;
//!
//! let session = dashboard
//!     .sign_in(&SignIn {
//!         email: "amani@tembo.co.ke".to_string(),
//!         password: "correct horse".to_string(),
//!     })
//!     .await?;
//! println!("Signed in as {}", session.staff);
//!
//! let itineraries = dashboard.list_itineraries().await?;
//! println!("{itineraries}");
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

pub mod auth_handlers;
pub mod blog_handlers;
pub mod builder;
pub mod itinerary_handlers;
pub mod report_handlers;
pub mod staff_handlers;


pub use builder::DashboardBuilder;

use crate::cache::QueryCache;
use crate::client::ApiClient;
use crate::error::{AdminError, Result, SubmitError};
use crate::orchestrator::{Editable, Editor, Settled};
use crate::routes::{GuardDecision, Route, RouteGuard};
use crate::session::{SessionContext, SessionStore};
use crate::validation::Schema;

/// Main entry point for front ends.
pub struct Dashboard {
    pub(crate) client: Arc<ApiClient>,
    pub(crate) cache: QueryCache,
    pub(crate) store: SessionStore,
    session: Mutex<Option<SessionContext>>,
    guard: RouteGuard,
}

impl Dashboard {
    pub(crate) fn new(
        client: ApiClient,
        cache: QueryCache,
        store: SessionStore,
        session: Option<SessionContext>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            cache,
            store,
            session: Mutex::new(session),
            guard: RouteGuard,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    /// Fail with `SignInRequired` unless `route` may be shown.
    pub fn require(&self, route: &Route) -> Result<()> {
        match self.guard.check(route, &self.client.tokens()) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect(_) => Err(AdminError::SignInRequired),
        }
    }

    /// Open `id`, apply `edits` to its form and submit the patch.
    ///
    /// Returns the settled mutation and the snapshot the editor rebased
    /// onto.
    pub(crate) async fn run_update<T, F>(
        &self,
        id: &str,
        edits: F,
    ) -> Result<(Settled<T::Ack>, Arc<T>)>
    where
        T: Editable,
        F: FnOnce(&mut T::Form),
    {
        let editor: Editor<T, ApiClient> =
            Editor::open(self.client.clone(), self.cache.clone(), id).await?;
        editor.edit(edits);
        let settled = editor.submit().await?;
        Ok((settled, editor.snapshot()))
    }

    pub(crate) fn session_guard(&self) -> MutexGuard<'_, Option<SessionContext>> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Reject `value` locally when its schema fails; nothing is sent.
pub(crate) fn ensure_valid<S: Schema + ?Sized>(value: &S) -> Result<()> {
    let errors = value.errors();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SubmitError::Validation(errors).into())
    }
}
