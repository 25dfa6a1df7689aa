//! Wire models returned by the REST backend.
//!
//! These are the snapshots the rest of the crate works from: an
//! [`Itinerary`] fetched from `/itineraries/{id}` is the baseline every
//! itinerary edit is diffed against. Display implementations live in
//! [`crate::display::models`].

pub mod ack;
pub mod blog;
pub mod booking;
pub mod itinerary;
pub mod options;
pub mod staff;

pub use ack::WriteAck;
pub use blog::Blog;
pub use booking::{Booking, BookingItinerary, BookingsPage};
pub use itinerary::{DayPlan, Image, ImageRef, Itinerary, UploadedImage};
pub use options::{Accommodation, Location, PaymentStatus};
pub use staff::{LoginResponse, Manager, StaffInfo, StaffList, StaffMember, StaffProfile};

/// Serde helpers for loosely-typed backend fields.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    /// Accept either `"42"` or `42` for identifier fields.
    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        })
    }

    /// Optional identifier accepting either representation.
    pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(
            Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
                StringOrNumber::String(s) => s,
                StringOrNumber::Int(n) => n.to_string(),
                StringOrNumber::Float(n) => n.to_string(),
            }),
        )
    }

    /// Treat `null` like an absent value for collections and strings.
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
