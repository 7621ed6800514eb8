//! In-memory BookingRepository adapter.
//!
//! Enforces the same exclusion guarantee as the PostgreSQL schema: the
//! overlap check and the insert happen under one write lock, so concurrent
//! inserts serialize exactly the way concurrent transactions do against the
//! real constraint. That makes this adapter a faithful stand-in for
//! concurrency tests, not just a hash map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, ListingId, StayRange, Timestamp};
use crate::ports::{BookingRepository, RepositoryError};

/// In-memory booking store with exclusion semantics.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl InMemoryBookingRepository {
    /// Create an empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings, any status.
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    /// True when no bookings are stored.
    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }

    fn conflicts(bookings: &HashMap<BookingId, Booking>, candidate: &Booking) -> bool {
        bookings.values().any(|existing| {
            existing.id != candidate.id
                && existing.listing_id == candidate.listing_id
                && existing.status.holds_dates()
                && existing.stay.overlaps(&candidate.stay)
        })
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn check_overlap(
        &self,
        listing_id: &ListingId,
        stay: &StayRange,
    ) -> Result<bool, RepositoryError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().any(|existing| {
            existing.listing_id == *listing_id
                && existing.status.holds_dates()
                && existing.stay.overlaps(stay)
        }))
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepositoryError> {
        // Check and insert under one write lock: the in-memory equivalent
        // of the database's atomic constraint check.
        let mut bookings = self.bookings.write().await;
        if Self::conflicts(&bookings, booking) {
            return Err(RepositoryError::SlotTaken);
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), RepositoryError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .get_mut(id)
            .ok_or(RepositoryError::NotFound(*id))?;
        booking.status = status;
        if status == BookingStatus::Cancelled {
            booking.cancelled_at = Some(Timestamp::now());
        }
        booking.updated_at = Timestamp::now();
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.read().await.get(id).cloned())
    }

    async fn find_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| b.listing_id == *listing_id)
            .cloned()
            .collect();
        result.sort_by_key(|b| b.stay.check_in());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::GuestCounts;
    use crate::domain::foundation::{Currency, GuestId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn stay(check_in: (i32, u32, u32), check_out: (i32, u32, u32)) -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
            NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
        )
        .unwrap()
    }

    fn booking(listing_id: ListingId, range: StayRange, status: BookingStatus) -> Booking {
        Booking::create(
            BookingId::new(),
            listing_id,
            GuestId::new(),
            range,
            GuestCounts::new(2, 0, 0).unwrap(),
            dec!(500.00),
            dec!(450.00),
            Currency::usd(),
            status,
        )
    }

    #[tokio::test]
    async fn insert_then_overlapping_insert_is_rejected() {
        let repo = InMemoryBookingRepository::new();
        let listing_id = ListingId::new();

        let first = booking(listing_id, stay((2025, 6, 1), (2025, 6, 5)), BookingStatus::Confirmed);
        repo.insert_booking(&first).await.unwrap();

        let second = booking(listing_id, stay((2025, 6, 3), (2025, 6, 7)), BookingStatus::Pending);
        let err = repo.insert_booking(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::SlotTaken));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn adjacent_ranges_coexist() {
        let repo = InMemoryBookingRepository::new();
        let listing_id = ListingId::new();

        repo.insert_booking(&booking(
            listing_id,
            stay((2025, 6, 1), (2025, 6, 5)),
            BookingStatus::Confirmed,
        ))
        .await
        .unwrap();

        repo.insert_booking(&booking(
            listing_id,
            stay((2025, 6, 5), (2025, 6, 10)),
            BookingStatus::Confirmed,
        ))
        .await
        .unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn same_range_on_different_listings_coexists() {
        let repo = InMemoryBookingRepository::new();
        let range = stay((2025, 6, 1), (2025, 6, 5));

        repo.insert_booking(&booking(ListingId::new(), range, BookingStatus::Confirmed))
            .await
            .unwrap();
        repo.insert_booking(&booking(ListingId::new(), range, BookingStatus::Confirmed))
            .await
            .unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn cancelled_booking_does_not_block_range() {
        let repo = InMemoryBookingRepository::new();
        let listing_id = ListingId::new();
        let range = stay((2025, 6, 1), (2025, 6, 5));

        let first = booking(listing_id, range, BookingStatus::Pending);
        repo.insert_booking(&first).await.unwrap();
        repo.update_status(&first.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        repo.insert_booking(&booking(listing_id, range, BookingStatus::Pending))
            .await
            .unwrap();
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn update_status_of_missing_booking_is_not_found() {
        let repo = InMemoryBookingRepository::new();
        let err = repo
            .update_status(&BookingId::new(), BookingStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_for_listing_orders_by_check_in() {
        let repo = InMemoryBookingRepository::new();
        let listing_id = ListingId::new();

        repo.insert_booking(&booking(
            listing_id,
            stay((2025, 7, 1), (2025, 7, 5)),
            BookingStatus::Confirmed,
        ))
        .await
        .unwrap();
        repo.insert_booking(&booking(
            listing_id,
            stay((2025, 6, 1), (2025, 6, 5)),
            BookingStatus::Confirmed,
        ))
        .await
        .unwrap();

        let all = repo.find_for_listing(&listing_id).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].stay.check_in() < all[1].stay.check_in());
    }
}
