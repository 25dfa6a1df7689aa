//! Collection wrapper types for list output.
//!
//! Each wrapper formats a list compactly and handles the empty case.

use std::fmt;

use super::datetime::BackendTime;
use crate::models::{Blog, BookingsPage, Itinerary, StaffList};

/// Itinerary catalogue, one summary line per itinerary.
pub struct Itineraries(pub Vec<Itinerary>);

impl Itineraries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Itinerary> {
        self.0.iter()
    }
}

impl fmt::Display for Itineraries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No itineraries found.");
        }
        for itinerary in &self.0 {
            writeln!(f, "## {} (ID: {})", itinerary.title, itinerary.id)?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Duration**: {} days, **Price**: ${}",
                itinerary.duration,
                itinerary.discounted_price()
            )?;
            if !itinerary.location.is_empty() {
                writeln!(f, "- **Location**: {}", itinerary.location)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Blog posts, newest as served.
pub struct Blogs(pub Vec<Blog>);

impl Blogs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Blogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No blogs found.");
        }
        for blog in &self.0 {
            writeln!(f, "## {} (ID: {})", blog.title, blog.id)?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Author**: {}, {}",
                blog.author_name,
                BackendTime(&blog.created_at)
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The staff directory.
pub struct StaffDirectory<'a>(pub &'a StaffList);

impl<'a> fmt::Display for StaffDirectory<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.staff.is_empty() {
            return writeln!(f, "No staff members found.");
        }
        writeln!(f, "{} staff member(s)", self.0.staff_count.max(self.0.staff.len() as u64))?;
        writeln!(f)?;
        for member in &self.0.staff {
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

/// One page of bookings with its position.
pub struct BookingPage<'a>(pub &'a BookingsPage);

impl<'a> fmt::Display for BookingPage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if page.bookings.is_empty() {
            return writeln!(f, "No bookings found.");
        }
        writeln!(
            f,
            "Page {} of {} ({} booking(s) in total)",
            page.current_page,
            page.pages.max(1),
            page.total
        )?;
        writeln!(f)?;
        for booking in &page.bookings {
            write!(f, "{booking}")?;
        }
        Ok(())
    }
}
