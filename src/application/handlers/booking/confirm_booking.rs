//! ConfirmBookingHandler - host approval for request-to-book listings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::{BookingRepository, RepositoryError};

/// Command to confirm a pending booking.
#[derive(Debug, Clone)]
pub struct ConfirmBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for host confirmation.
pub struct ConfirmBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ConfirmBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, cmd: ConfirmBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await
            .map_err(map_repository_error)?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        let current = booking.status;
        booking.confirm().map_err(|_| {
            BookingError::invalid_state(current.to_string(), "confirm")
        })?;

        self.bookings
            .update_status(&booking.id, booking.status)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(booking_id = %booking.id, "booking confirmed by host");

        Ok(booking)
    }
}

fn map_repository_error(err: RepositoryError) -> BookingError {
    match err {
        RepositoryError::NotFound(id) => BookingError::not_found(id),
        other => BookingError::storage_unavailable(other.to_string()),
    }
}
