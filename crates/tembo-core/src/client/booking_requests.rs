//! Booking endpoints.

use super::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::BookingsPage;
use crate::params::ListBookings;

const BOOKINGS_PATH: &str = "/bookings/";

impl ApiClient {
    /// One page of bookings, newest first.
    pub async fn list_bookings(&self, params: &ListBookings) -> Result<BookingsPage, ApiError> {
        let request = ApiRequest::get(BOOKINGS_PATH)
            .query("page", params.page)
            .query("page_size", params.page_size);
        self.execute(&request).await?.json()
    }
}
