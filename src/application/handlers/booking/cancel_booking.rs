//! CancelBookingHandler - releases a reserved date range.
//!
//! Cancellation is how availability is freed: the exclusion guarantee only
//! constrains pending and confirmed rows, so flipping the status releases
//! the range for the next guest.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::{BookingRepository, RepositoryError};

/// Command to cancel an existing booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for cancelling bookings.
pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl CancelBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<Booking, BookingError> {
        // 1. Load the booking
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await
            .map_err(map_repository_error)?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        // 2. Apply the lifecycle rule on the aggregate
        let current = booking.status;
        booking.cancel().map_err(|_| {
            BookingError::invalid_state(current.to_string(), "cancel")
        })?;

        // 3. Persist the transition
        self.bookings
            .update_status(&booking.id, booking.status)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(
            booking_id = %booking.id,
            listing_id = %booking.listing_id,
            stay = %booking.stay,
            "booking cancelled, date range released"
        );

        Ok(booking)
    }
}

fn map_repository_error(err: RepositoryError) -> BookingError {
    match err {
        RepositoryError::NotFound(id) => BookingError::not_found(id),
        other => BookingError::storage_unavailable(other.to_string()),
    }
}
