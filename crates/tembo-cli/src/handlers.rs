//! Command handlers.
//!
//! Each handler calls one `Dashboard` operation and renders its result.
//! Submission and backend failures are turned into the same [`Feedback`] a
//! form would show, so the message depends on which command failed.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use tembo_core::display::{Blogs, CreateResult, Itineraries, StaffDirectory};
use tembo_core::forms::{BlogForm, ItineraryForm};
use tembo_core::params::ListBookings;
use tembo_core::views::{describe_failure, ViewState};
use tembo_core::{AdminError, Dashboard, Feedback, FormKind, OperationStatus};

use crate::cli::{AuthCommands, BlogCommands, ItineraryCommands, ReportCommands, StaffCommands};
use crate::renderer::TerminalRenderer;

pub struct Cli {
    dashboard: Dashboard,
    renderer: TerminalRenderer,
}

/// Turn a library error into the message the matching form would show.
fn explain(kind: FormKind, error: AdminError) -> anyhow::Error {
    let feedback = match &error {
        AdminError::Submit(e) => Feedback::from_submit(kind, e),
        AdminError::Api(e) => Feedback::from_api(kind, e),
        _ => return error.into(),
    };
    // anyhow adds its own "Error:" label.
    let mut message = feedback.banner;
    for (field, messages) in feedback.field_errors.iter() {
        for text in messages {
            message.push_str(&format!("\n  {field}: {text}"));
        }
    }
    if let Some(route) = feedback.redirect {
        message.push_str(&format!("\nNext: {route}"));
    }
    anyhow!(message)
}

/// Describe a failed read of `subject`.
fn explain_read(subject: &'static str) -> impl FnOnce(AdminError) -> anyhow::Error {
    move |error| match error {
        AdminError::Api(e) => anyhow!(describe_failure(&e, subject).0),
        other => other.into(),
    }
}

/// Data of a loaded view, or its failure with a retry hint.
fn ready<T>(view: ViewState<T>, retry: &str) -> Result<Arc<T>> {
    match view {
        ViewState::Ready(data) => Ok(data),
        ViewState::Failed {
            message,
            retryable: true,
        } => Err(anyhow!("{message}\nRun `{retry}` to try again.")),
        ViewState::Failed { message, .. } => Err(anyhow!(message)),
    }
}

fn read_form<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid form file {}", path.display()))
}

impl Cli {
    pub fn new(dashboard: Dashboard, renderer: TerminalRenderer) -> Self {
        Self {
            dashboard,
            renderer,
        }
    }

    /// Persist any session change the command caused and pass its result on.
    ///
    /// A silent token refresh rotates the cookies, and an expired session
    /// must not survive to the next invocation.
    pub fn finish(&self, result: Result<()>) -> Result<()> {
        self.dashboard
            .sync_session()
            .context("Failed to update the session file")?;
        result
    }

    pub async fn handle_auth_command(&self, command: AuthCommands) -> Result<()> {
        match command {
            AuthCommands::Login(args) => {
                let session = self
                    .dashboard
                    .sign_in(&args.into())
                    .await
                    .map_err(|e| explain(FormKind::SignIn, e))?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Signed in as {}",
                    session.staff
                )))
            }
            AuthCommands::Logout => {
                self.dashboard.sign_out().await?;
                self.renderer.show(&OperationStatus::success("Signed out"))
            }
            AuthCommands::Whoami => match self.dashboard.current_session() {
                Some(session) => self.renderer.render(&format!("{}\n", session.staff)),
                None => self
                    .renderer
                    .show(&OperationStatus::failure("Not signed in")),
            },
            AuthCommands::Register(args) => {
                self.dashboard
                    .register(&args.into())
                    .await
                    .map_err(|e| explain(FormKind::SignUp, e))?;
                self.renderer
                    .show(&Feedback::settled(FormKind::SignUp, &[], None))
            }
        }
    }

    pub async fn handle_itinerary_command(&self, command: ItineraryCommands) -> Result<()> {
        match command {
            ItineraryCommands::List(args) => {
                let view = self
                    .dashboard
                    .itineraries_view(args.refresh)
                    .await
                    .map_err(explain_read("itineraries"))?;
                let itineraries = ready(view, "tembo itinerary list --refresh")?;
                self.renderer
                    .show(&Itineraries(itineraries.as_ref().clone()))
            }
            ItineraryCommands::Show(args) => {
                let itinerary = self
                    .dashboard
                    .show_itinerary(&args.into())
                    .await
                    .map_err(explain_read("itinerary"))?;
                self.renderer.show(&itinerary)
            }
            ItineraryCommands::Create(args) => {
                let form: ItineraryForm = read_form(&args.file)?;
                let settled = self
                    .dashboard
                    .create_itinerary(form)
                    .await
                    .map_err(|e| explain(FormKind::ItineraryCreate, e))?;
                self.renderer
                    .show(&CreateResult::new("itinerary", settled.value))
            }
            ItineraryCommands::Update(args) => {
                let base = args
                    .file
                    .as_deref()
                    .map(read_form::<ItineraryForm>)
                    .transpose()?;
                let dry_run = args.dry_run;
                let (id, edits) = args.into_edits(base);

                // Edits are checked against the stored itinerary before
                // anything is uploaded or sent.
                let stored = self
                    .dashboard
                    .show_itinerary(&id)
                    .await
                    .map_err(|e| explain(FormKind::ItineraryUpdate, e))?;
                let mut edited = ItineraryForm::from_snapshot(&stored);
                edits.apply(&mut edited)?;

                if dry_run {
                    let plan = self
                        .dashboard
                        .preview_itinerary_update(&id, |form| *form = edited)
                        .await
                        .map_err(|e| explain(FormKind::ItineraryUpdate, e))?;
                    return self.render_plan(&plan);
                }

                let updated = self
                    .dashboard
                    .update_itinerary(&id, |form| *form = edited)
                    .await
                    .map_err(|e| explain(FormKind::ItineraryUpdate, e))?;
                self.renderer.show(&updated)
            }
            ItineraryCommands::Delete(args) => {
                let deleted = self
                    .dashboard
                    .delete_itinerary(&args.into())
                    .await
                    .map_err(|e| explain(FormKind::Delete, e))?;
                self.renderer.show(&deleted)
            }
        }
    }

    pub async fn handle_blog_command(&self, command: BlogCommands) -> Result<()> {
        match command {
            BlogCommands::List(args) => {
                let view = self
                    .dashboard
                    .blogs_view(args.refresh)
                    .await
                    .map_err(explain_read("blogs"))?;
                let blogs = ready(view, "tembo blog list --refresh")?;
                self.renderer.show(&Blogs(blogs.as_ref().clone()))
            }
            BlogCommands::Show(args) => {
                let blog = self
                    .dashboard
                    .show_blog(&args.into())
                    .await
                    .map_err(explain_read("blog post"))?;
                self.renderer.show(&blog)
            }
            BlogCommands::Create(args) => {
                let form: BlogForm = args.into();
                let settled = self
                    .dashboard
                    .create_blog(form)
                    .await
                    .map_err(|e| explain(FormKind::BlogCreate, e))?;
                self.renderer.show(&CreateResult::new("blog", settled.value))
            }
            BlogCommands::Update(args) => {
                let (id, edits) = args.into_edits();
                let updated = self
                    .dashboard
                    .update_blog(&id, |form| edits.apply(form))
                    .await
                    .map_err(|e| explain(FormKind::BlogUpdate, e))?;
                self.renderer.show(&updated)
            }
            BlogCommands::Delete(args) => {
                let deleted = self
                    .dashboard
                    .delete_blog(&args.into())
                    .await
                    .map_err(|e| explain(FormKind::Delete, e))?;
                self.renderer.show(&deleted)
            }
        }
    }

    pub async fn handle_staff_command(&self, command: StaffCommands) -> Result<()> {
        match command {
            StaffCommands::List => {
                let staff = self
                    .dashboard
                    .list_staff()
                    .await
                    .map_err(explain_read("staff members"))?;
                self.renderer.show(&StaffDirectory(&staff))
            }
            StaffCommands::Create(args) => {
                let count = args.members.len();
                self.dashboard
                    .create_staff(&args.into())
                    .await
                    .map_err(|e| explain(FormKind::StaffCreate, e))?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Created {count} staff member(s)"
                )))
            }
            StaffCommands::Delete(args) => {
                let deleted = self
                    .dashboard
                    .delete_staff(&args.into())
                    .await
                    .map_err(|e| explain(FormKind::Delete, e))?;
                self.renderer.show(&deleted)
            }
            StaffCommands::Profile => {
                let profile = self
                    .dashboard
                    .profile()
                    .await
                    .map_err(explain_read("profile"))?;
                self.renderer.show(&profile)
            }
            StaffCommands::UpdateProfile(args) => {
                let updated = self
                    .dashboard
                    .update_profile(|form| args.apply(form))
                    .await
                    .map_err(|e| explain(FormKind::ProfileUpdate, e))?;
                self.renderer.show(&updated)
            }
        }
    }

    pub async fn handle_report_command(&self, command: ReportCommands) -> Result<()> {
        match command {
            ReportCommands::Overview(args) => self.business_overview(&args.into()).await,
            ReportCommands::Blogs => {
                let stats = self
                    .dashboard
                    .blog_stats()
                    .await
                    .map_err(explain_read("blog stats"))?;
                self.renderer.show(&stats)
            }
            ReportCommands::Itineraries => {
                let stats = self
                    .dashboard
                    .itinerary_stats()
                    .await
                    .map_err(explain_read("itinerary stats"))?;
                self.renderer.show(&stats)
            }
        }
    }

    /// The home screen; also what a bare `tembo` shows.
    pub async fn business_overview(&self, params: &ListBookings) -> Result<()> {
        let overview = self
            .dashboard
            .business_overview(params)
            .await
            .map_err(explain_read("bookings"))?;
        self.renderer.show(&overview)
    }

    fn render_plan(&self, plan: &tembo_core::PatchPlan) -> Result<()> {
        if plan.is_empty() {
            return self
                .renderer
                .show(&OperationStatus::failure("No changes detected to update"));
        }
        let mut markdown = format!("# Pending update ({} field(s))\n\n", plan.fields().len());
        for field in plan.fields() {
            markdown.push_str(&format!("- `{field}`\n"));
        }
        let uploads = plan.pending_uploads();
        if !uploads.is_empty() {
            markdown.push_str("\n**Uploads first:**\n");
            for task in uploads {
                markdown.push_str(&format!("- {} ({} file(s))\n", task.batch, task.files.len()));
            }
        }
        self.renderer.render(&markdown)
    }
}
