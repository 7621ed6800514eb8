//! ListListingBookingsHandler - all bookings on a listing, for collaborators
//! that need the calendar (payments, messaging, host dashboards).

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::ListingId;
use crate::ports::BookingRepository;

/// Query for a listing's bookings, ordered by check-in.
#[derive(Debug, Clone)]
pub struct ListListingBookingsQuery {
    pub listing_id: ListingId,
}

/// Handler for listing-calendar lookups.
pub struct ListListingBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListListingBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        query: ListListingBookingsQuery,
    ) -> Result<Vec<Booking>, BookingError> {
        self.bookings
            .find_for_listing(&query.listing_id)
            .await
            .map_err(|e| BookingError::storage_unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingRepository;
    use crate::domain::booking::{BookingStatus, GuestCounts};
    use crate::domain::foundation::{BookingId, Currency, GuestId, StayRange};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn booking(listing_id: ListingId, day: u32) -> Booking {
        Booking::create(
            BookingId::new(),
            listing_id,
            GuestId::new(),
            StayRange::new(
                NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, day + 2).unwrap(),
            )
            .unwrap(),
            GuestCounts::new(2, 0, 0).unwrap(),
            dec!(200.00),
            dec!(180.00),
            Currency::usd(),
            BookingStatus::Confirmed,
        )
    }

    #[tokio::test]
    async fn returns_only_that_listings_bookings_in_order() {
        let repo = Arc::new(InMemoryBookingRepository::new());
        let listing_id = ListingId::new();

        repo.insert_booking(&booking(listing_id, 10)).await.unwrap();
        repo.insert_booking(&booking(listing_id, 1)).await.unwrap();
        repo.insert_booking(&booking(ListingId::new(), 1)).await.unwrap();

        let handler = ListListingBookingsHandler::new(repo);
        let found = handler
            .handle(ListListingBookingsQuery { listing_id })
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[0].stay.check_in() < found[1].stay.check_in());
    }
}
