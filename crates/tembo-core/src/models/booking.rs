//! Bookings, used only for read-only reporting.

use serde::{Deserialize, Serialize};

use super::de::{null_as_default, string_or_number};
use super::PaymentStatus;

/// Itinerary summary embedded in each booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingItinerary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrival_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub departure_city: String,
}

/// A customer booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default)]
    pub number_of_rooms: u32,
    #[serde(default)]
    pub number_of_adults: u32,
    #[serde(default)]
    pub number_of_children: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub confirmation_code: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub itinerary: BookingItinerary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Booking {
    pub fn guests(&self) -> u32 {
        self.number_of_adults + self.number_of_children
    }
}

/// One page of `/bookings/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookingsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub current_page: u64,
    #[serde(default)]
    pub page_size: u64,
}
