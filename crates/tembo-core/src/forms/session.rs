//! A form paired with the baseline it is diffed against.

use crate::tracker::{Diffable, DirtySet};

/// Baseline and live copies of one form instance.
///
/// The dirty set is never stored: it is recomputed from the two copies on
/// demand, so reverting an edit makes the field clean again.
#[derive(Debug, Clone)]
pub struct FormSession<F> {
    baseline: F,
    current: F,
}

impl<F: Clone> FormSession<F> {
    /// Start editing from a baseline; the live copy starts identical.
    pub fn new(baseline: F) -> Self {
        Self {
            current: baseline.clone(),
            baseline,
        }
    }

    pub fn baseline(&self) -> &F {
        &self.baseline
    }

    pub fn current(&self) -> &F {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut F {
        &mut self.current
    }

    /// Apply an edit to the live copy.
    pub fn edit(&mut self, apply: impl FnOnce(&mut F)) {
        apply(&mut self.current);
    }

    /// Throw away every edit since the last reset.
    pub fn discard(&mut self) {
        self.current = self.baseline.clone();
    }

    /// Replace the baseline wholesale (e.g. after a refetch) and drop edits.
    pub fn reset(&mut self, baseline: F) {
        self.current = baseline.clone();
        self.baseline = baseline;
    }
}

impl<F: Diffable + Clone> FormSession<F> {
    /// Fields whose live value differs from the baseline.
    pub fn dirty(&self) -> DirtySet<F::Field> {
        self.baseline.diff(&self.current)
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ProfileForm;
    use crate::tracker::ProfileField;

    fn profile() -> ProfileForm {
        ProfileForm {
            first_name: "Neema".to_string(),
            last_name: "Achieng".to_string(),
            email: "neema@tembo.co.ke".to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn test_discard_clears_dirty_state() {
        let mut session = FormSession::new(profile());
        session.edit(|form| form.last_name = "Wanjiru".to_string());
        assert!(session.dirty().contains(&ProfileField::LastName));

        session.discard();
        assert!(!session.is_dirty());
        assert_eq!(session.current().last_name, "Achieng");
    }

    #[test]
    fn test_reset_replaces_baseline() {
        let mut session = FormSession::new(profile());
        session.edit(|form| form.email = "neema@mara.co.ke".to_string());

        let mut refreshed = profile();
        refreshed.email = "neema@mara.co.ke".to_string();
        session.reset(refreshed);

        assert!(!session.is_dirty());
        assert_eq!(session.baseline().email, "neema@mara.co.ke");
    }
}
