//! Overview report handlers.

use std::sync::Arc;

use jiff::Zoned;

use super::Dashboard;
use crate::cache::QueryKey;
use crate::models::BookingsPage;
use crate::error::Result;
use crate::params::ListBookings;
use crate::reports::{BlogStats, BusinessOverview, ItineraryStats};
use crate::routes::Route;

impl Dashboard {
    /// One page of bookings.
    pub async fn bookings(&self, params: &ListBookings) -> Result<Arc<BookingsPage>> {
        self.require(&Route::Home)?;
        let key = QueryKey::Bookings {
            page: params.page,
            page_size: params.page_size,
        };
        Ok(self
            .cache
            .fetch(key, || self.client.list_bookings(params))
            .await?)
    }

    /// Handle the home screen: booking metrics over one page of bookings.
    pub async fn business_overview(&self, params: &ListBookings) -> Result<BusinessOverview> {
        let page = self.bookings(params).await?;
        Ok(BusinessOverview::from_bookings(&page.bookings))
    }

    /// Blog counters, with "this month" taken from the local clock.
    pub async fn blog_stats(&self) -> Result<BlogStats> {
        let blogs = self.load_blogs().await?;
        Ok(BlogStats::compute(&blogs, Zoned::now().date()))
    }

    pub async fn itinerary_stats(&self) -> Result<ItineraryStats> {
        let itineraries = self.load_itineraries().await?;
        Ok(ItineraryStats::compute(&itineraries))
    }
}
