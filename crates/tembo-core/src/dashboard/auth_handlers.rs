//! Session lifecycle handlers.

use super::{ensure_valid, Dashboard};
use crate::error::Result;
use crate::models::WriteAck;
use crate::params::{SignIn, SignUp};
use crate::session::{SessionContext, StaffIdentity};

impl Dashboard {
    /// Sign in and persist the new session.
    ///
    /// # Arguments
    ///
    /// * `params` - Email and password
    ///
    /// # Returns
    ///
    /// The session context that was saved to the session store
    ///
    /// # Errors
    ///
    /// `AdminError::Submit(SubmitError::Validation)` when the credentials
    /// fail the local schema (nothing is sent), otherwise the backend's
    /// `ApiError`; a 401 is `ApiError::Unauthorized` and never triggers a
    /// session refresh.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tembo_core::{params::SignIn, DashboardBuilder};
    /// # async {
    /// let dashboard = DashboardBuilder::new().build()?;
    /// let params = SignIn {
    ///     email: "amani@tembo.co.ke".to_string(),
    ///     password: "correct horse".to_string(),
    /// };
    /// let session = dashboard.sign_in(&params).await?;
    /// println!("{}", session.staff);
    /// # Result::<(), tembo_core::AdminError>::Ok(())
    /// # };
    /// ```
    pub async fn sign_in(&self, params: &SignIn) -> Result<SessionContext> {
        ensure_valid(params)?;

        // The login request goes out without cookies; a failed attempt must
        // leave the current session in place.
        let previous = self.client.tokens();
        self.client.clear_tokens();
        let response = match self.client.login(params).await {
            Ok(response) => response,
            Err(e) => {
                self.client.set_tokens(previous);
                return Err(e.into());
            }
        };
        let context = SessionContext::new(
            StaffIdentity::from(response.staff_info),
            self.client.tokens(),
        );
        self.store.save(&context)?;
        self.cache.invalidate_all();
        *self.session_guard() = Some(context.clone());

        log::info!("Signed in as {}", context.staff.email);
        Ok(context)
    }

    /// Sign out locally and on the backend.
    ///
    /// The local session is always removed; a backend failure is only
    /// logged.
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(e) = self.client.logout().await {
            log::warn!("Backend logout failed: {e}");
        }
        self.store.clear()?;
        self.cache.invalidate_all();
        *self.session_guard() = None;
        log::info!("Signed out");
        Ok(())
    }

    /// Register a new manager account.
    ///
    /// # Errors
    ///
    /// `SubmitError::Validation` for local schema failures (including
    /// mismatched passwords), otherwise the backend's `ApiError`.
    pub async fn register(&self, params: &SignUp) -> Result<WriteAck> {
        ensure_valid(params)?;
        Ok(self.client.register_manager(params).await?)
    }

    /// The signed-in session, if any.
    pub fn current_session(&self) -> Option<SessionContext> {
        self.session_guard().clone()
    }

    /// Write rotated tokens back to the session store.
    ///
    /// Call after a batch of requests: a silent refresh may have replaced
    /// the access token, and a failed refresh clears the session.
    pub fn sync_session(&self) -> Result<()> {
        let tokens = self.client.tokens();
        let mut session = self.session_guard();
        let Some(context) = session.as_mut() else {
            return Ok(());
        };
        if !tokens.has_any() {
            log::info!("Session ended, removing {}", self.store.path().display());
            *session = None;
            return self.store.clear();
        }
        if context.tokens != tokens {
            context.tokens = tokens;
            self.store.save(context)?;
        }
        Ok(())
    }
}
