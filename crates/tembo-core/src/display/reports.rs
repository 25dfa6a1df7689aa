//! Markdown for the overview reports.

use std::fmt;

use crate::reports::{BlogStats, BusinessOverview, ItineraryStats};

impl fmt::Display for BusinessOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Business Overview")?;
        writeln!(f)?;
        writeln!(f, "| Metric | Value |")?;
        writeln!(f, "|:-|-:|")?;
        writeln!(f, "| Total bookings | {} |", self.total_bookings)?;
        writeln!(f, "| Total revenue | {:.2} |", self.total_revenue)?;
        writeln!(f, "| Total guests | {} |", self.total_guests)?;
        writeln!(f, "| Average booking value | {:.2} |", self.average_booking_value)?;
        writeln!(f, "| Completion rate | {:.1}% |", self.completion_rate)?;
        writeln!(f, "| Completed payments | {} |", self.completed_payments)?;
        writeln!(f, "| Pending payments | {} |", self.pending_payments)?;
        writeln!(f, "| Failed payments | {} |", self.failed_payments)?;

        if !self.status_counts.is_empty() {
            writeln!(f, "\n## Payment Status")?;
            writeln!(f)?;
            for (status, count) in &self.status_counts {
                writeln!(f, "- {}: {count}", status.with_icon())?;
            }
        }

        writeln!(f, "\n## Recent Bookings")?;
        writeln!(f)?;
        if self.recent.is_empty() {
            writeln!(f, "No bookings yet.")?;
        }
        for booking in &self.recent {
            write!(f, "{booking}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BlogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Blog Statistics")?;
        writeln!(f)?;
        writeln!(f, "- Total posts: {}", self.total)?;
        writeln!(f, "- Published this month: {}", self.this_month)?;
        writeln!(f, "- Authors: {}", self.authors)
    }
}

impl fmt::Display for ItineraryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Itinerary Statistics")?;
        writeln!(f)?;
        writeln!(f, "- Itineraries: {}", self.count)?;
        writeln!(f, "- Average price: ${:.0}", self.average_price)?;
        if !self.by_location.is_empty() {
            writeln!(f, "\n## By Location")?;
            writeln!(f)?;
            for (location, count) in &self.by_location {
                writeln!(f, "- {location}: {count}")?;
            }
        }
        if !self.by_accommodation.is_empty() {
            writeln!(f, "\n## By Accommodation")?;
            writeln!(f)?;
            for (accommodation, count) in &self.by_accommodation {
                writeln!(f, "- {accommodation}: {count}")?;
            }
        }
        Ok(())
    }
}
