//! Field identifiers and their mapping onto backend payload keys.

use std::fmt;

/// A field the dirty tracker can report on.
pub trait TrackedField: Copy + Ord + fmt::Debug + 'static {
    /// Every field of the form, in payload order.
    const ALL: &'static [Self];

    /// Name of the field in the form layer.
    fn form_name(self) -> &'static str;

    /// Key of the field in the backend payload.
    fn external_name(self) -> &'static str;
}

/// Top-level fields of an itinerary form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItineraryField {
    Title,
    Overview,
    Duration,
    Price,
    Discount,
    ArrivalCity,
    DepartureCity,
    Accommodation,
    Location,
    Tags,
    CostInclusive,
    CostExclusive,
    Days,
    Images,
}

/// `(field, form name, payload key)` for every itinerary field.
pub const ITINERARY_FIELD_MAPPING: [(ItineraryField, &str, &str); 14] = [
    (ItineraryField::Title, "title", "title"),
    (ItineraryField::Overview, "overview", "overview"),
    (ItineraryField::Duration, "duration", "duration"),
    (ItineraryField::Price, "price", "price"),
    (ItineraryField::Discount, "discount", "discount"),
    (ItineraryField::ArrivalCity, "arrivalCity", "arrival_city"),
    (ItineraryField::DepartureCity, "departureCity", "departure_city"),
    (ItineraryField::Accommodation, "accommodation", "accommodation"),
    (ItineraryField::Location, "location", "location"),
    (ItineraryField::Tags, "tags", "tags"),
    (ItineraryField::CostInclusive, "costIncluded", "cost_inclusive"),
    (ItineraryField::CostExclusive, "costExcluded", "cost_exclusive"),
    (ItineraryField::Days, "days", "days"),
    (ItineraryField::Images, "images", "images"),
];

impl ItineraryField {
    fn mapping(self) -> (&'static str, &'static str) {
        // The table is indexed by discriminant.
        let (_, form, external) = ITINERARY_FIELD_MAPPING[self as usize];
        (form, external)
    }
}

impl TrackedField for ItineraryField {
    const ALL: &'static [Self] = &[
        ItineraryField::Title,
        ItineraryField::Overview,
        ItineraryField::Duration,
        ItineraryField::Price,
        ItineraryField::Discount,
        ItineraryField::ArrivalCity,
        ItineraryField::DepartureCity,
        ItineraryField::Accommodation,
        ItineraryField::Location,
        ItineraryField::Tags,
        ItineraryField::CostInclusive,
        ItineraryField::CostExclusive,
        ItineraryField::Days,
        ItineraryField::Images,
    ];

    fn form_name(self) -> &'static str {
        self.mapping().0
    }

    fn external_name(self) -> &'static str {
        self.mapping().1
    }
}

/// Top-level fields of a blog form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlogField {
    Title,
    Content,
    /// Sent as `image_url` plus `image_public_id`
    Image,
}

impl TrackedField for BlogField {
    const ALL: &'static [Self] = &[BlogField::Title, BlogField::Content, BlogField::Image];

    fn form_name(self) -> &'static str {
        match self {
            BlogField::Title => "title",
            BlogField::Content => "content",
            BlogField::Image => "image",
        }
    }

    fn external_name(self) -> &'static str {
        match self {
            BlogField::Title => "title",
            BlogField::Content => "content",
            BlogField::Image => "image_url",
        }
    }
}

/// Fields of the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Password,
}

impl TrackedField for ProfileField {
    const ALL: &'static [Self] = &[
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::Password,
    ];

    fn form_name(self) -> &'static str {
        self.external_name()
    }

    fn external_name(self) -> &'static str {
        match self {
            ProfileField::FirstName => "first_name",
            ProfileField::LastName => "last_name",
            ProfileField::Email => "email",
            ProfileField::Password => "password",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_table_matches_discriminants() {
        for (index, field) in ItineraryField::ALL.iter().enumerate() {
            assert_eq!(ITINERARY_FIELD_MAPPING[index].0, *field);
        }
        assert_eq!(ItineraryField::ALL.len(), ITINERARY_FIELD_MAPPING.len());
    }

    #[test]
    fn test_city_fields_map_to_snake_case() {
        assert_eq!(ItineraryField::ArrivalCity.form_name(), "arrivalCity");
        assert_eq!(ItineraryField::ArrivalCity.external_name(), "arrival_city");
        assert_eq!(ItineraryField::DepartureCity.external_name(), "departure_city");
    }
}
