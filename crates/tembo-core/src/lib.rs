//! Core library for the Tembo safari operator admin console.
//!
//! This crate talks to the Tembo REST backend on behalf of staff: it signs
//! in, lists and edits itineraries and blog posts, manages staff accounts,
//! and computes the overview reports shown on the home screen.
//!
//! # Partial updates
//!
//! Edits are made on a form built from a fetched snapshot. The [`tracker`]
//! compares the form with that snapshot and the [`orchestrator`] sends only
//! the fields that changed, after validating the form and uploading any new
//! images. Nothing is sent when nothing changed.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): list, result and report
//!   formatting, rendered as markdown by the CLI
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tembo_core::{params::Id, DashboardBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dashboard = DashboardBuilder::new().build()?;
//!
//! let params = Id {
//!     id: "it-42".to_string(),
//! };
//! let updated = dashboard
//!     .update_itinerary(&params, |form| form.price = 2450)
//!     .await?;
//! println!("{updated}");
//! dashboard.sync_session()?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod feedback;
pub mod forms;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod reports;
pub mod routes;
pub mod session;
pub mod tracker;
pub mod validation;
pub mod views;

// Re-export commonly used types
pub use backend::{AdminBackend, AssetUploader};
pub use cache::{QueryCache, QueryKey};
pub use client::ApiClient;
pub use config::Config;
pub use dashboard::{Dashboard, DashboardBuilder};
pub use display::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{AdminError, ApiError, Result, SubmitError};
pub use feedback::{Feedback, FormKind, Tone};
pub use models::{Blog, Booking, Itinerary, StaffProfile, WriteAck};
pub use orchestrator::{Editor, MutationOrchestrator, Settled};
pub use routes::Route;
pub use session::{SessionContext, SessionStore, SessionTokens, StaffIdentity};
pub use tracker::{PatchPayload, PatchPlan};
pub use validation::FieldErrors;
