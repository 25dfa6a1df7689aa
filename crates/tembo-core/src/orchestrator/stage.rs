//! Submission stages and states.

use std::fmt;

/// A batch of files uploaded as one request before the entity write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadBatch {
    /// The itinerary's own gallery
    ItineraryImages,
    /// Images of one day, identified by its day number
    DayImages { day: i64 },
    /// A blog post's cover
    BlogCover,
}

impl fmt::Display for UploadBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadBatch::ItineraryImages => write!(f, "itinerary images"),
            UploadBatch::DayImages { day } => write!(f, "images for day {day}"),
            UploadBatch::BlogCover => write!(f, "blog cover image"),
        }
    }
}

/// Pipeline step a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Uploading(UploadBatch),
    Submitting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Validating => write!(f, "validation"),
            Stage::Uploading(batch) => write!(f, "upload of {batch}"),
            Stage::Submitting => write!(f, "submit"),
        }
    }
}

/// Where a form's current (or last) submission attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Uploading(UploadBatch),
    Submitting,
    Settled,
    ValidationFailed,
    UploadFailed(UploadBatch),
    SubmitFailed,
}

impl SubmissionState {
    /// An attempt is running; the submit control must stay disabled.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating | SubmissionState::Uploading(_) | SubmissionState::Submitting
        )
    }

    /// The attempt ended, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Settled
                | SubmissionState::ValidationFailed
                | SubmissionState::UploadFailed(_)
                | SubmissionState::SubmitFailed
        )
    }

    /// Terminal state for a failure at `stage`.
    pub fn failed_at(stage: Stage) -> Self {
        match stage {
            Stage::Validating => SubmissionState::ValidationFailed,
            Stage::Uploading(batch) => SubmissionState::UploadFailed(batch),
            Stage::Submitting => SubmissionState::SubmitFailed,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Validating => write!(f, "validating"),
            SubmissionState::Uploading(batch) => write!(f, "uploading {batch}"),
            SubmissionState::Submitting => write!(f, "submitting"),
            SubmissionState::Settled => write!(f, "settled"),
            SubmissionState::ValidationFailed => write!(f, "validation failed"),
            SubmissionState::UploadFailed(batch) => write!(f, "upload of {batch} failed"),
            SubmissionState::SubmitFailed => write!(f, "submit failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_at_maps_each_stage() {
        assert_eq!(
            SubmissionState::failed_at(Stage::Validating),
            SubmissionState::ValidationFailed
        );
        assert_eq!(
            SubmissionState::failed_at(Stage::Uploading(UploadBatch::BlogCover)),
            SubmissionState::UploadFailed(UploadBatch::BlogCover)
        );
        assert!(SubmissionState::SubmitFailed.is_terminal());
        assert!(SubmissionState::Uploading(UploadBatch::ItineraryImages).is_busy());
        assert!(!SubmissionState::Idle.is_busy());
    }

    #[test]
    fn test_batch_display() {
        assert_eq!(
            UploadBatch::DayImages { day: 3 }.to_string(),
            "images for day 3"
        );
    }
}
