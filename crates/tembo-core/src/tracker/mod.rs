//! Dirty-field tracking and minimal patch synthesis.
//!
//! ```text
//!  baseline ─┐
//!            ├─ diff ─▶ DirtySet ─ plan ─▶ PatchPlan ─ upload ─▶ PatchPayload
//!  current ──┘
//! ```
//!
//! - [`fields`]: field identifiers and the form-to-payload name mapping
//! - [`dirty`]: the pure `diff(baseline, current)` comparison
//! - [`patch`]: payload shaping and dependent-upload substitution

pub mod dirty;
pub mod fields;
pub mod patch;

pub use dirty::{Diffable, DirtySet};
pub use fields::{BlogField, ItineraryField, ProfileField, TrackedField, ITINERARY_FIELD_MAPPING};
pub use patch::{
    plan_create, plan_patch, PatchPayload, PatchPlan, PatchSource, PayloadShape, UploadTarget,
    UploadTask, UploadedRefs,
};
