//! Itinerary form state and its validation rules.

use serde::{Deserialize, Serialize};

use super::{clean_items, NewImage};
use crate::models::{Accommodation, DayPlan, Image, Itinerary, Location};
use crate::validation::{rules, FieldErrors, Schema};

/// One day of the plan as edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayForm {
    /// Day number within the itinerary
    pub day: i64,
    pub title: String,
    pub details: String,
    /// Images already stored for this day
    #[serde(default)]
    pub existing_images: Vec<Image>,
    /// Files picked for this day, uploaded on submit
    #[serde(default)]
    pub new_images: Vec<NewImage>,
}

impl DayForm {
    pub fn new(day: i64, title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            day,
            title: title.into(),
            details: details.into(),
            ..Self::default()
        }
    }

    fn from_plan(plan: &DayPlan) -> Self {
        Self {
            day: plan.day_number,
            title: plan.title.clone(),
            details: plan.details.clone(),
            existing_images: plan.images.clone(),
            new_images: Vec::new(),
        }
    }

    fn check(&self, errors: &mut FieldErrors) {
        rules::positive(
            errors,
            "day",
            self.day,
            "Day number must be a positive integer",
        );
        rules::non_empty(errors, "title", &self.title, "Day name is required");
        rules::non_empty(errors, "details", &self.details, "Day details are required");
        for (index, image) in self.new_images.iter().enumerate() {
            rules::image_file(errors, &format!("images[{index}]"), image.path());
        }
    }
}

/// Live, editable mirror of an [`Itinerary`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItineraryForm {
    pub title: String,
    pub overview: String,
    pub duration: i64,
    pub price: i64,
    #[serde(default)]
    pub discount: f64,
    pub arrival_city: String,
    pub departure_city: String,
    /// `None` when the stored value is missing or not recognised
    #[serde(default)]
    pub accommodation: Option<Accommodation>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cost_inclusive: Vec<String>,
    #[serde(default)]
    pub cost_exclusive: Vec<String>,
    #[serde(default)]
    pub days: Vec<DayForm>,
    /// Images already stored for the itinerary
    #[serde(default)]
    pub existing_images: Vec<Image>,
    /// Files picked for the itinerary, uploaded on submit
    #[serde(default)]
    pub new_images: Vec<NewImage>,
}

impl ItineraryForm {
    /// Initialise a form from a fetched snapshot.
    ///
    /// Missing or unknown accommodation and location values stay `None`,
    /// so choosing any option afterwards counts as an edit.
    pub fn from_snapshot(snapshot: &Itinerary) -> Self {
        let accommodation = snapshot
            .accommodation
            .parse::<Accommodation>()
            .map_err(|e| log::debug!("Itinerary {}: {e}", snapshot.id))
            .ok();
        let location = snapshot
            .location
            .parse::<Location>()
            .map_err(|e| log::debug!("Itinerary {}: {e}", snapshot.id))
            .ok();

        Self {
            title: snapshot.title.clone(),
            overview: snapshot.overview.clone(),
            duration: snapshot.duration,
            price: snapshot.price,
            discount: snapshot.discount,
            arrival_city: snapshot.arrival_city.clone(),
            departure_city: snapshot.departure_city.clone(),
            accommodation,
            location,
            tags: snapshot.tag_list(),
            cost_inclusive: snapshot.cost_inclusive.clone(),
            cost_exclusive: snapshot.cost_exclusive.clone(),
            days: snapshot.days.iter().map(DayForm::from_plan).collect(),
            existing_images: snapshot.images.clone(),
            new_images: Vec::new(),
        }
    }

    /// Whether any file (itinerary or day level) is waiting to be uploaded.
    pub fn has_pending_files(&self) -> bool {
        !self.new_images.is_empty() || self.days.iter().any(|day| !day.new_images.is_empty())
    }

    /// The day with the given number, if present.
    pub fn day_mut(&mut self, day: i64) -> Option<&mut DayForm> {
        self.days.iter_mut().find(|form| form.day == day)
    }

    /// Copy with pending files dropped, used once they have been persisted.
    pub fn without_pending_files(&self) -> Self {
        let mut form = self.clone();
        form.new_images.clear();
        for day in &mut form.days {
            day.new_images.clear();
        }
        form
    }

    /// Rules shared by create and update.
    fn check_fields(&self, errors: &mut FieldErrors) {
        rules::non_empty(errors, "title", &self.title, "Title is required");
        rules::non_empty(errors, "overview", &self.overview, "The overview is required");
        rules::positive(
            errors,
            "duration",
            self.duration,
            "Duration must be a positive number",
        );
        rules::positive(errors, "price", self.price, "Price must be a positive number");
        rules::non_negative(
            errors,
            "discount",
            self.discount,
            "The discount cannot be negative",
        );
        rules::non_empty(
            errors,
            "arrival_city",
            &self.arrival_city,
            "The arrival city is required",
        );
        rules::non_empty(
            errors,
            "departure_city",
            &self.departure_city,
            "The departure city is required",
        );

        for (index, image) in self.new_images.iter().enumerate() {
            rules::image_file(errors, &format!("images[{index}]"), image.path());
        }

        for (index, day) in self.days.iter().enumerate() {
            let mut day_errors = FieldErrors::new();
            day.check(&mut day_errors);
            errors.merge_nested(&format!("days[{index}]"), day_errors);
        }
    }
}

impl Schema for ItineraryForm {
    /// Update rules: every value the form holds must be well-formed, but
    /// images and tags may stay as they were.
    fn check(&self, errors: &mut FieldErrors) {
        self.check_fields(errors);
    }
}

/// An itinerary form being submitted for creation.
///
/// Creation is stricter than update: images, tags, and days are required and
/// every cost line must be filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NewItinerary(pub ItineraryForm);

impl Schema for NewItinerary {
    fn check(&self, errors: &mut FieldErrors) {
        let form = &self.0;
        form.check_fields(errors);

        if form.new_images.is_empty() {
            errors.add("images", "Requires at least one image");
        }
        if clean_items(&form.tags).is_empty() {
            errors.add("tags", "At least one tag is required");
        }
        if form.days.is_empty() {
            errors.add("days", "There should be at least one day added");
        }
        if form.accommodation.is_none() {
            errors.add("accommodation", "Accommodation type is required");
        }
        if form.location.is_none() {
            errors.add("location", "Location is required");
        }
        for (index, item) in form.cost_inclusive.iter().enumerate() {
            rules::non_empty(
                errors,
                &format!("cost_inclusive[{index}]"),
                item,
                "Item cannot be empty",
            );
        }
        for (index, item) in form.cost_exclusive.iter().enumerate() {
            rules::non_empty(
                errors,
                &format!("cost_exclusive[{index}]"),
                item,
                "Item cannot be empty",
            );
        }
    }
}
