//! Command-line argument wrappers.
//!
//! Each wrapper carries clap's attributes and converts into the core
//! parameter or edit type, so `tembo-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params / Form edits → Dashboard
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand};
use tembo_core::forms::{BlogForm, ItineraryForm, NewImage, ProfileForm};
use tembo_core::models::{Accommodation, Location};
use tembo_core::error::AdminError;
use tembo_core::params::{CreateStaff, Delete, Id, ListBookings, NewStaffMember, SignIn, SignUp};

// ============================================================================
// Auth
// ============================================================================

/// Sign in with email and password
#[derive(Args)]
pub struct LoginArgs {
    /// Staff email address
    pub email: String,
    #[arg(short, long, help = "Account password")]
    pub password: String,
}

impl From<LoginArgs> for SignIn {
    fn from(val: LoginArgs) -> Self {
        SignIn {
            email: val.email,
            password: val.password,
        }
    }
}

/// Register a new manager account
#[derive(Args)]
pub struct RegisterArgs {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[arg(short, long, help = "Password, at least 8 characters")]
    pub password: String,
    #[arg(long, help = "Repeat the password")]
    pub confirm_password: String,
}

impl From<RegisterArgs> for SignUp {
    fn from(val: RegisterArgs) -> Self {
        SignUp {
            first_name: val.first_name,
            last_name: val.last_name,
            email: val.email,
            password: val.password,
            confirm_password: val.confirm_password,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in and keep the session
    #[command(alias = "in")]
    Login(LoginArgs),
    /// Sign out and forget the session
    #[command(alias = "out")]
    Logout,
    /// Show who is signed in
    Whoami,
    /// Register a new manager account
    Register(RegisterArgs),
}

// ============================================================================
// Shared
// ============================================================================

/// Show one resource
#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Unique identifier of the resource")]
    pub id: String,
}

impl From<ShowArgs> for Id {
    fn from(val: ShowArgs) -> Self {
        Id { id: val.id }
    }
}

/// List a collection
#[derive(Args)]
pub struct ListArgs {
    /// Reload even if a cached copy is still fresh
    #[arg(long)]
    pub refresh: bool,
}

/// Delete a resource permanently
#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Unique identifier of the resource to permanently delete")]
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteArgs> for Delete {
    fn from(val: DeleteArgs) -> Self {
        Delete {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

// ============================================================================
// Itineraries
// ============================================================================

/// Create an itinerary from a JSON form file
#[derive(Args)]
pub struct CreateItineraryArgs {
    #[arg(
        short,
        long,
        help = "JSON form with title, overview, days, tags, cost lines and new_images paths"
    )]
    pub file: PathBuf,
}

/// New images for one day, given as `DAY:PATH`.
#[derive(Clone)]
pub struct DayImage {
    pub day: i64,
    pub path: PathBuf,
}

fn parse_day_image(value: &str) -> Result<DayImage, String> {
    let (day, path) = value
        .split_once(':')
        .ok_or_else(|| format!("expected DAY:PATH, got '{value}'"))?;
    let day = day
        .trim()
        .parse()
        .map_err(|_| format!("'{day}' is not a day number"))?;
    Ok(DayImage {
        day,
        path: PathBuf::from(path),
    })
}

fn parse_accommodation(value: &str) -> Result<Accommodation, String> {
    value.parse()
}

fn parse_location(value: &str) -> Result<Location, String> {
    value.parse()
}

/// Update an itinerary; only the fields that differ are sent
#[derive(Args)]
pub struct UpdateItineraryArgs {
    #[arg(help = "Unique identifier of the itinerary to update")]
    pub id: String,
    #[arg(
        short,
        long,
        help = "JSON form to start from; flags below are applied on top"
    )]
    pub file: Option<PathBuf>,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(long)]
    pub overview: Option<String>,
    #[arg(long, help = "Duration in days")]
    pub duration: Option<i64>,
    #[arg(short, long)]
    pub price: Option<i64>,
    #[arg(long, help = "Discount in percent")]
    pub discount: Option<f64>,
    #[arg(long)]
    pub arrival_city: Option<String>,
    #[arg(long)]
    pub departure_city: Option<String>,
    #[arg(long, value_parser = parse_accommodation, help = "budget, mid or luxury")]
    pub accommodation: Option<Accommodation>,
    #[arg(long, value_parser = parse_location)]
    pub location: Option<Location>,
    #[arg(long, value_delimiter = ',', help = "Tags as comma-separated list")]
    pub tags: Option<Vec<String>>,
    #[arg(long = "include", help = "Replace the included cost lines (repeatable)")]
    pub cost_inclusive: Vec<String>,
    #[arg(long = "exclude", help = "Replace the excluded cost lines (repeatable)")]
    pub cost_exclusive: Vec<String>,
    #[arg(long = "image", help = "New itinerary image, replaces the gallery (repeatable)")]
    pub images: Vec<PathBuf>,
    #[arg(
        long = "day-image",
        value_parser = parse_day_image,
        help = "New image for one day as DAY:PATH (repeatable)"
    )]
    pub day_images: Vec<DayImage>,
    #[arg(long, help = "Print the patch that would be sent without sending it")]
    pub dry_run: bool,
}

/// Edits parsed from [`UpdateItineraryArgs`], applied to the live form.
pub struct ItineraryEdits {
    pub base: Option<ItineraryForm>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub duration: Option<i64>,
    pub price: Option<i64>,
    pub discount: Option<f64>,
    pub arrival_city: Option<String>,
    pub departure_city: Option<String>,
    pub accommodation: Option<Accommodation>,
    pub location: Option<Location>,
    pub tags: Option<Vec<String>>,
    pub cost_inclusive: Vec<String>,
    pub cost_exclusive: Vec<String>,
    pub images: Vec<PathBuf>,
    pub day_images: Vec<DayImage>,
}

impl UpdateItineraryArgs {
    /// Split into the target and its edits; `base` is the parsed `--file`.
    pub fn into_edits(self, base: Option<ItineraryForm>) -> (Id, ItineraryEdits) {
        (
            Id { id: self.id },
            ItineraryEdits {
                base,
                title: self.title,
                overview: self.overview,
                duration: self.duration,
                price: self.price,
                discount: self.discount,
                arrival_city: self.arrival_city,
                departure_city: self.departure_city,
                accommodation: self.accommodation,
                location: self.location,
                tags: self.tags,
                cost_inclusive: self.cost_inclusive,
                cost_exclusive: self.cost_exclusive,
                images: self.images,
                day_images: self.day_images,
            },
        )
    }
}

impl ItineraryEdits {
    /// Apply the edits to `form`.
    ///
    /// # Errors
    ///
    /// `AdminError::InvalidInput` for a `--day-image` naming a day the form
    /// does not have; `form` is left untouched in that case.
    pub fn apply(self, form: &mut ItineraryForm) -> Result<(), AdminError> {
        let days = self.base.as_ref().map_or(&form.days, |base| &base.days);
        if let Some(image) = self
            .day_images
            .iter()
            .find(|image| !days.iter().any(|day| day.day == image.day))
        {
            return Err(AdminError::invalid_input("day-image").with_reason(format!(
                "The itinerary has no day {} (for {})",
                image.day,
                image.path.display()
            )));
        }

        if let Some(mut base) = self.base {
            // A form file never removes stored images.
            base.existing_images = form.existing_images.clone();
            // Nor does it clear a choice it leaves out.
            base.accommodation = base.accommodation.or(form.accommodation);
            base.location = base.location.or(form.location);
            for day in &mut base.days {
                if day.existing_images.is_empty() {
                    if let Some(current) = form.days.iter().find(|d| d.day == day.day) {
                        day.existing_images = current.existing_images.clone();
                    }
                }
            }
            *form = base;
        }

        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(overview) = self.overview {
            form.overview = overview;
        }
        if let Some(duration) = self.duration {
            form.duration = duration;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(discount) = self.discount {
            form.discount = discount;
        }
        if let Some(city) = self.arrival_city {
            form.arrival_city = city;
        }
        if let Some(city) = self.departure_city {
            form.departure_city = city;
        }
        if self.accommodation.is_some() {
            form.accommodation = self.accommodation;
        }
        if self.location.is_some() {
            form.location = self.location;
        }
        if let Some(tags) = self.tags {
            form.tags = tags;
        }
        if !self.cost_inclusive.is_empty() {
            form.cost_inclusive = self.cost_inclusive;
        }
        if !self.cost_exclusive.is_empty() {
            form.cost_exclusive = self.cost_exclusive;
        }
        form.new_images.extend(self.images.into_iter().map(NewImage::new));
        for image in self.day_images {
            if let Some(day) = form.day_mut(image.day) {
                day.new_images.push(NewImage::new(image.path));
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum ItineraryCommands {
    /// List all itineraries
    #[command(aliases = ["l", "ls"])]
    List(ListArgs),
    /// Show an itinerary with its days
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Create an itinerary from a JSON form file
    #[command(alias = "c")]
    Create(CreateItineraryArgs),
    /// Update an itinerary
    #[command(alias = "u")]
    Update(UpdateItineraryArgs),
    /// Delete an itinerary permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Blogs
// ============================================================================

/// Publish a blog post
#[derive(Args)]
pub struct CreateBlogArgs {
    #[arg(short, long)]
    pub title: String,
    #[arg(short, long, help = "Post body (markdown)")]
    pub content: String,
    #[arg(short, long, help = "Cover image (jpeg, png or webp)")]
    pub image: PathBuf,
}

impl From<CreateBlogArgs> for BlogForm {
    fn from(val: CreateBlogArgs) -> Self {
        BlogForm {
            title: val.title,
            content: val.content,
            image_url: String::new(),
            new_image: Some(NewImage::new(val.image)),
        }
    }
}

/// Update a blog post; only the fields that differ are sent
#[derive(Args)]
pub struct UpdateBlogArgs {
    #[arg(help = "Unique identifier of the post to update")]
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
    #[arg(short, long, help = "Replacement cover image")]
    pub image: Option<PathBuf>,
}

/// Edits parsed from [`UpdateBlogArgs`].
pub struct BlogEdits {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<PathBuf>,
}

impl UpdateBlogArgs {
    pub fn into_edits(self) -> (Id, BlogEdits) {
        (
            Id { id: self.id },
            BlogEdits {
                title: self.title,
                content: self.content,
                image: self.image,
            },
        )
    }
}

impl BlogEdits {
    pub fn apply(self, form: &mut BlogForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(content) = self.content {
            form.content = content;
        }
        if let Some(image) = self.image {
            form.new_image = Some(NewImage::new(image));
        }
    }
}

#[derive(Subcommand)]
pub enum BlogCommands {
    /// List all blog posts
    #[command(aliases = ["l", "ls"])]
    List(ListArgs),
    /// Show a blog post
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Publish a blog post
    #[command(alias = "c")]
    Create(CreateBlogArgs),
    /// Update a blog post
    #[command(alias = "u")]
    Update(UpdateBlogArgs),
    /// Delete a blog post permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Staff
// ============================================================================

fn parse_member(value: &str) -> Result<NewStaffMember, String> {
    let parts: Vec<&str> = value.split(',').collect();
    match parts.as_slice() {
        [first_name, last_name, email] => Ok(NewStaffMember {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }),
        _ => Err(format!("expected \"First,Last,email\", got '{value}'")),
    }
}

/// Create staff accounts in one request
#[derive(Args)]
pub struct CreateStaffArgs {
    #[arg(
        short,
        long = "member",
        required = true,
        value_parser = parse_member,
        help = "Staff member as \"First,Last,email\" (repeatable)"
    )]
    pub members: Vec<NewStaffMember>,
}

impl From<CreateStaffArgs> for CreateStaff {
    fn from(val: CreateStaffArgs) -> Self {
        CreateStaff { staff: val.members }
    }
}

/// Update your own profile; only the fields that differ are sent
#[derive(Args)]
pub struct UpdateProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, help = "New password, at least 6 characters")]
    pub password: Option<String>,
}

impl UpdateProfileArgs {
    pub fn apply(self, form: &mut ProfileForm) {
        if let Some(first_name) = self.first_name {
            form.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            form.last_name = last_name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(password) = self.password {
            form.password = password;
        }
    }
}

#[derive(Subcommand)]
pub enum StaffCommands {
    /// List staff accounts
    #[command(aliases = ["l", "ls"])]
    List,
    /// Create staff accounts
    #[command(alias = "c")]
    Create(CreateStaffArgs),
    /// Delete a staff account permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
    /// Show your own profile
    #[command(alias = "p")]
    Profile,
    /// Update your own profile
    #[command(alias = "up")]
    UpdateProfile(UpdateProfileArgs),
}

// ============================================================================
// Reports
// ============================================================================

/// Booking metrics over one page of bookings
#[derive(Args)]
pub struct OverviewArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 100)]
    pub page_size: u32,
}

impl From<OverviewArgs> for ListBookings {
    fn from(val: OverviewArgs) -> Self {
        ListBookings {
            page: val.page,
            page_size: val.page_size,
        }
    }
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Bookings, revenue and payment status
    #[command(alias = "o")]
    Overview(OverviewArgs),
    /// Blog counters
    Blogs,
    /// Itinerary catalogue breakdown
    Itineraries,
}
