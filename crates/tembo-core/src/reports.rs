//! Aggregates shown on the overview screens.

use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;
use serde::Serialize;

use crate::display::datetime::parse_backend_time;
use crate::models::{Blog, Booking, Itinerary, PaymentStatus};

const RECENT_BOOKINGS: usize = 5;

/// Booking metrics for the home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessOverview {
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub total_guests: u64,
    pub completed_payments: usize,
    pub pending_payments: usize,
    pub failed_payments: usize,
    pub average_booking_value: f64,
    /// Percentage of bookings with a completed payment
    pub completion_rate: f64,
    pub status_counts: BTreeMap<PaymentStatus, usize>,
    pub recent: Vec<Booking>,
}

impl BusinessOverview {
    /// Metrics over one page of bookings, which the backend returns newest
    /// first.
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let total_bookings = bookings.len();
        let total_revenue: f64 = bookings.iter().map(|b| b.total_amount).sum();
        let total_guests: u64 = bookings.iter().map(|b| u64::from(b.guests())).sum();

        let mut status_counts = BTreeMap::new();
        for booking in bookings {
            *status_counts.entry(booking.payment_status).or_insert(0) += 1;
        }
        let count = |status: PaymentStatus| status_counts.get(&status).copied().unwrap_or(0);
        let completed_payments = count(PaymentStatus::Completed);
        let pending_payments = count(PaymentStatus::Pending);
        let failed_payments = count(PaymentStatus::Failed);

        let (average_booking_value, completion_rate) = if total_bookings > 0 {
            (
                total_revenue / total_bookings as f64,
                completed_payments as f64 / total_bookings as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_bookings,
            total_revenue,
            total_guests,
            completed_payments,
            pending_payments,
            failed_payments,
            average_booking_value,
            completion_rate,
            status_counts,
            recent: bookings.iter().take(RECENT_BOOKINGS).cloned().collect(),
        }
    }
}

/// Blog counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub total: usize,
    pub this_month: usize,
    pub authors: usize,
}

impl BlogStats {
    /// Counts relative to `today`; a post counts for this month when its
    /// creation date falls in the same calendar month and year.
    pub fn compute(blogs: &[Blog], today: Date) -> Self {
        let this_month = blogs
            .iter()
            .filter_map(|blog| parse_backend_time(&blog.created_at))
            .filter(|created| created.year() == today.year() && created.month() == today.month())
            .count();
        let authors: BTreeSet<&str> = blogs.iter().map(|blog| blog.author_name.as_str()).collect();
        Self {
            total: blogs.len(),
            this_month,
            authors: authors.len(),
        }
    }
}

/// Itinerary catalogue breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryStats {
    pub count: usize,
    pub by_location: BTreeMap<String, usize>,
    pub by_accommodation: BTreeMap<String, usize>,
    pub average_price: f64,
}

impl ItineraryStats {
    pub fn compute(itineraries: &[Itinerary]) -> Self {
        let mut by_location = BTreeMap::new();
        let mut by_accommodation = BTreeMap::new();
        for itinerary in itineraries {
            *by_location.entry(label(&itinerary.location)).or_insert(0) += 1;
            *by_accommodation
                .entry(label(&itinerary.accommodation))
                .or_insert(0) += 1;
        }
        let average_price = if itineraries.is_empty() {
            0.0
        } else {
            itineraries.iter().map(|i| i.price as f64).sum::<f64>() / itineraries.len() as f64
        };
        Self {
            count: itineraries.len(),
            by_location,
            by_accommodation,
            average_price,
        }
    }
}

fn label(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "Unspecified".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use serde_json::json;

    fn booking(status: &str, amount: f64, adults: u32, children: u32) -> Booking {
        serde_json::from_value(json!({
            "id": 1,
            "full_name": "Wanjiku Kamau",
            "email": "wanjiku@example.com",
            "phone_number": "+254700000000",
            "start_date": "2025-07-01",
            "number_of_rooms": 1,
            "number_of_adults": adults,
            "number_of_children": children,
            "country": "Kenya",
            "currency": "USD",
            "total_amount": amount,
            "payment_method": "card",
            "payment_status": status,
            "itinerary": { "id": 3, "title": "Mara Classic" },
            "created_at": "2025-06-01T09:00:00"
        }))
        .unwrap()
    }

    fn blog(author: &str, created_at: &str) -> Blog {
        serde_json::from_value(json!({
            "id": 1,
            "title": "Migration season",
            "content": "...",
            "image_url": "https://cdn/x.jpg",
            "author_name": author,
            "author_email": "a@tembo.co.ke",
            "created_at": created_at
        }))
        .unwrap()
    }

    #[test]
    fn test_overview_metrics() {
        let bookings = vec![
            booking("COMPLETED", 1000.0, 2, 1),
            booking("PENDING", 500.0, 1, 0),
            booking("FAILED", 300.0, 2, 0),
            booking("COMPLETED", 200.0, 1, 2),
        ];
        let overview = BusinessOverview::from_bookings(&bookings);
        assert_eq!(overview.total_bookings, 4);
        assert_eq!(overview.total_revenue, 2000.0);
        assert_eq!(overview.total_guests, 9);
        assert_eq!(overview.completed_payments, 2);
        assert_eq!(overview.pending_payments, 1);
        assert_eq!(overview.failed_payments, 1);
        assert_eq!(overview.average_booking_value, 500.0);
        assert_eq!(overview.completion_rate, 50.0);
        assert_eq!(overview.recent.len(), 4);
    }

    #[test]
    fn test_overview_of_nothing() {
        let overview = BusinessOverview::from_bookings(&[]);
        assert_eq!(overview.average_booking_value, 0.0);
        assert_eq!(overview.completion_rate, 0.0);
        assert!(overview.status_counts.is_empty());
    }

    #[test]
    fn test_blog_stats_this_month() {
        let blogs = vec![
            blog("Amani", "2025-06-03T10:00:00"),
            blog("Amani", "2025-06-28T22:15:00Z"),
            blog("Neema", "2024-06-10T08:00:00"),
            blog("Neema", "not a date"),
        ];
        let stats = BlogStats::compute(&blogs, date(2025, 6, 30));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.this_month, 2);
        assert_eq!(stats.authors, 2);
    }
}
