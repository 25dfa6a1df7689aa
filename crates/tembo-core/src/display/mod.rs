//! Display formatting functions and result types.
//!
//! Wire models implement [`std::fmt::Display`] directly (see [`models`]);
//! lists and mutation outcomes go through the wrapper types here. All output
//! is markdown, rendered to the terminal by the CLI.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Wire Models   │    │ Wrappers &      │    │    Markdown     │
//! │ (Itinerary,...) │───▶│ Result Types    │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: list wrappers (Itineraries, Blogs, StaffDirectory,
//!   BookingPage)
//! - [`results`]: mutation outcomes (CreateResult, UpdateResult,
//!   DeleteResult) and the rendering of [`crate::feedback::Feedback`]
//! - [`status`]: one-line confirmations (OperationStatus)
//! - [`reports`]: overview reports
//! - [`datetime`]: backend timestamp parsing and formatting
//!
//! ```rust
//! use tembo_core::display::{DeleteResult, OperationStatus};
//!
//! let deleted = DeleteResult::new("blog", "9");
//! assert_eq!(deleted.to_string(), "Deleted blog (ID: 9)\n");
//!
//! let status = OperationStatus::success("Signed out");
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod reports;
pub mod results;
pub mod status;

pub use collections::{BookingPage, Blogs, Itineraries, StaffDirectory};
pub use datetime::BackendTime;
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
pub use status::OperationStatus;
