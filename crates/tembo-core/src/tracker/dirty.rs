//! Baseline-versus-current comparison.
//!
//! [`Diffable::diff`] is a pure function of two form values. Nothing is
//! cached between calls, so editing a field and reverting it leaves the
//! field clean.

use std::collections::BTreeSet;

use super::fields::{BlogField, ItineraryField, ProfileField, TrackedField};
use crate::forms::{clean_items, BlogForm, DayForm, ItineraryForm, ProfileForm};

/// Set of fields whose current value differs from the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtySet<F: Ord>(BTreeSet<F>);

impl<F: TrackedField> DirtySet<F> {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Every field of the form, as used for create payloads.
    pub fn all() -> Self {
        F::ALL.iter().copied().collect()
    }

    pub fn insert(&mut self, field: F) {
        self.0.insert(field);
    }

    /// Insert `field` when `changed` holds.
    pub fn mark(&mut self, field: F, changed: bool) {
        if changed {
            self.0.insert(field);
        }
    }

    pub fn contains(&self, field: &F) -> bool {
        self.0.contains(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.0.iter().copied()
    }

    /// Payload keys of the dirty fields.
    pub fn external_names(&self) -> Vec<&'static str> {
        self.0.iter().map(|field| field.external_name()).collect()
    }
}

impl<F: TrackedField> Default for DirtySet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TrackedField> FromIterator<F> for DirtySet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A form value that can be compared against its baseline.
pub trait Diffable {
    type Field: TrackedField;

    /// Fields of `current` that differ from `self`, the baseline.
    fn diff(&self, current: &Self) -> DirtySet<Self::Field>;
}

/// Order-insensitive comparison key for string collections.
fn unordered(items: &[String]) -> Vec<String> {
    let mut items = clean_items(items);
    items.sort();
    items
}

fn day_changed(baseline: Option<&DayForm>, current: &DayForm) -> bool {
    let Some(baseline) = baseline else {
        return true;
    };
    !current.new_images.is_empty()
        || baseline.day != current.day
        || baseline.title != current.title
        || baseline.details != current.details
        || baseline.existing_images != current.existing_images
}

impl Diffable for ItineraryForm {
    type Field = ItineraryField;

    fn diff(&self, current: &Self) -> DirtySet<ItineraryField> {
        use ItineraryField::*;

        let mut dirty = DirtySet::new();
        dirty.mark(Title, self.title != current.title);
        dirty.mark(Overview, self.overview != current.overview);
        dirty.mark(Duration, self.duration != current.duration);
        dirty.mark(Price, self.price != current.price);
        dirty.mark(Discount, self.discount != current.discount);
        dirty.mark(ArrivalCity, self.arrival_city != current.arrival_city);
        dirty.mark(DepartureCity, self.departure_city != current.departure_city);
        dirty.mark(Accommodation, self.accommodation != current.accommodation);
        dirty.mark(Location, self.location != current.location);
        dirty.mark(Tags, unordered(&self.tags) != unordered(&current.tags));
        dirty.mark(
            CostInclusive,
            unordered(&self.cost_inclusive) != unordered(&current.cost_inclusive),
        );
        dirty.mark(
            CostExclusive,
            unordered(&self.cost_exclusive) != unordered(&current.cost_exclusive),
        );

        // Day order is part of the value.
        let days_changed = self.days.len() != current.days.len()
            || current
                .days
                .iter()
                .enumerate()
                .any(|(index, day)| day_changed(self.days.get(index), day));
        dirty.mark(Days, days_changed);

        // Existing images are never cleared implicitly; only new files count.
        dirty.mark(Images, !current.new_images.is_empty());
        dirty
    }
}

impl Diffable for BlogForm {
    type Field = BlogField;

    fn diff(&self, current: &Self) -> DirtySet<BlogField> {
        let mut dirty = DirtySet::new();
        dirty.mark(BlogField::Title, self.title != current.title);
        dirty.mark(BlogField::Content, self.content != current.content);
        dirty.mark(BlogField::Image, current.new_image.is_some());
        dirty
    }
}

impl Diffable for ProfileForm {
    type Field = ProfileField;

    fn diff(&self, current: &Self) -> DirtySet<ProfileField> {
        let mut dirty = DirtySet::new();
        dirty.mark(
            ProfileField::FirstName,
            self.first_name.trim() != current.first_name.trim(),
        );
        dirty.mark(
            ProfileField::LastName,
            self.last_name.trim() != current.last_name.trim(),
        );
        dirty.mark(ProfileField::Email, self.email.trim() != current.email.trim());
        dirty.mark(ProfileField::Password, !current.password.is_empty());
        dirty
    }
}
