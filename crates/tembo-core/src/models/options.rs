//! Closed value sets used by itineraries and bookings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Accommodation class offered on an itinerary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Accommodation {
    #[default]
    Budget,
    Mid,
    Luxury,
}

impl Accommodation {
    pub const ALL: [Accommodation; 3] = [
        Accommodation::Budget,
        Accommodation::Mid,
        Accommodation::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Accommodation::Budget => "Budget",
            Accommodation::Mid => "Mid",
            Accommodation::Luxury => "Luxury",
        }
    }
}

impl FromStr for Accommodation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(Accommodation::Budget),
            "mid" | "mid-range" | "midrange" => Ok(Accommodation::Mid),
            "luxury" => Ok(Accommodation::Luxury),
            _ => Err(format!(
                "Invalid accommodation: {s}. Must be 'Budget', 'Mid', or 'Luxury'"
            )),
        }
    }
}

/// Destination country (or pair) an itinerary runs in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Location {
    #[default]
    Kenya,
    Tanzania,
    #[serde(rename = "Kenya & Tanzania")]
    KenyaAndTanzania,
    Uganda,
}

impl Location {
    pub const ALL: [Location; 4] = [
        Location::Kenya,
        Location::Tanzania,
        Location::KenyaAndTanzania,
        Location::Uganda,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Kenya => "Kenya",
            Location::Tanzania => "Tanzania",
            Location::KenyaAndTanzania => "Kenya & Tanzania",
            Location::Uganda => "Uganda",
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kenya" => Ok(Location::Kenya),
            "tanzania" => Ok(Location::Tanzania),
            "kenya & tanzania" | "kenya and tanzania" | "kenya-tanzania" => {
                Ok(Location::KenyaAndTanzania)
            }
            "uganda" => Ok(Location::Uganda),
            _ => Err(format!(
                "Invalid location: {s}. Must be 'Kenya', 'Tanzania', 'Kenya & Tanzania', or 'Uganda'"
            )),
        }
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }

    /// Status with an icon, for list output.
    pub fn with_icon(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "✓ Completed",
            PaymentStatus::Pending => "○ Pending",
            PaymentStatus::Failed => "✗ Failed",
            PaymentStatus::Cancelled => "– Cancelled",
        }
    }
}
