//! Display implementations for the wire models.
//!
//! Every implementation writes markdown for the terminal renderer.

use std::fmt;

use super::datetime::BackendTime;
use crate::models::{
    Accommodation, Blog, Booking, DayPlan, Itinerary, Location, PaymentStatus, StaffMember,
    StaffProfile,
};
use crate::session::StaffIdentity;

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Duration: {} days", self.duration)?;
        if self.discount > 0.0 {
            writeln!(
                f,
                "- Price: ${} (${} after {}% off)",
                self.price,
                self.discounted_price(),
                self.discount
            )?;
        } else {
            writeln!(f, "- Price: ${}", self.price)?;
        }
        writeln!(f, "- Route: {} → {}", self.arrival_city, self.departure_city)?;
        if !self.location.is_empty() {
            writeln!(f, "- Location: {}", self.location)?;
        }
        if !self.accommodation.is_empty() {
            writeln!(f, "- Accommodation: {}", self.accommodation)?;
        }
        let tags = self.tag_list();
        if !tags.is_empty() {
            writeln!(f, "- Tags: {}", tags.join(", "))?;
        }
        writeln!(f, "- Images: {}", self.images.len())?;

        if !self.overview.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.overview)?;
        }

        if !self.cost_inclusive.is_empty() {
            writeln!(f, "\n## Included")?;
            writeln!(f)?;
            for item in &self.cost_inclusive {
                writeln!(f, "- {item}")?;
            }
        }
        if !self.cost_exclusive.is_empty() {
            writeln!(f, "\n## Excluded")?;
            writeln!(f)?;
            for item in &self.cost_exclusive {
                writeln!(f, "- {item}")?;
            }
        }

        if self.days.is_empty() {
            writeln!(f, "\nNo days planned yet.")?;
        } else {
            writeln!(f, "\n## Days")?;
            writeln!(f)?;
            for day in &self.days {
                write!(f, "{day}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Day {}: {}", self.day_number, self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.details)?;
        if !self.images.is_empty() {
            writeln!(f)?;
            writeln!(f, "_{} image(s)_", self.images.len())?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Blog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        if !self.author_name.is_empty() {
            writeln!(f, "- Author: {} <{}>", self.author_name, self.author_email)?;
        }
        writeln!(f, "- Published: {}", BackendTime(&self.created_at))?;
        if !self.image_url.is_empty() {
            writeln!(f, "- Cover: {}", self.image_url)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.content)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** ({}): {} {:.2}, {}, {} guest(s), {}",
            self.full_name,
            self.itinerary.title,
            self.currency,
            self.total_amount,
            self.payment_status.with_icon(),
            self.guests(),
            BackendTime(&self.created_at)
        )
    }
}

impl fmt::Display for StaffMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** <{}>", self.full_name(), self.email)?;
        if !self.role.is_empty() {
            write!(f, ", {}", self.role)?;
        }
        if let Some(manager) = &self.manager {
            write!(f, " (reports to {})", manager.name)?;
        }
        writeln!(f, " [ID: {}]", self.id)
    }
}

impl fmt::Display for StaffProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.full_name())?;
        writeln!(f)?;
        writeln!(f, "- Email: {}", self.email)?;
        if !self.role.is_empty() {
            writeln!(f, "- Role: {}", self.role)?;
        }
        writeln!(f, "- Member since: {}", BackendTime(&self.created_at))?;
        writeln!(f, "- Last updated: {}", BackendTime(&self.updated_at))
    }
}

impl fmt::Display for StaffIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)?;
        if !self.role.is_empty() {
            write!(f, " ({})", self.role)?;
        }
        Ok(())
    }
}
