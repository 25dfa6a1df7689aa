//! One-submission-at-a-time gate for a form instance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Admits at most one submission attempt at a time.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if an attempt is already running.
    ///
    /// The gate reopens when the returned guard is dropped, including when
    /// the attempt's future is dropped mid-flight.
    pub fn try_enter(&self) -> Option<SubmissionGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_open(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of one attempt.
#[derive(Debug)]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_entry_is_refused_until_drop() {
        let gate = SubmissionGate::new();
        let guard = gate.try_enter().expect("gate starts open");
        assert!(gate.try_enter().is_none());
        assert!(!gate.is_open());

        drop(guard);
        assert!(gate.is_open());
        assert!(gate.try_enter().is_some());
    }
}
