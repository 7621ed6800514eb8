//! GetBookingHandler - read accessor for downstream collaborators.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::BookingRepository;

/// Query for a single booking.
#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub booking_id: BookingId,
}

/// Handler for booking lookups.
pub struct GetBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl GetBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, query: GetBookingQuery) -> Result<Booking, BookingError> {
        self.bookings
            .find_by_id(&query.booking_id)
            .await
            .map_err(|e| BookingError::storage_unavailable(e.to_string()))?
            .ok_or(BookingError::NotFound(query.booking_id))
    }
}
