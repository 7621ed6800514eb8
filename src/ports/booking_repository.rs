//! Booking repository port (write side).
//!
//! The transactional boundary around booking mutations. Implementations must
//! guarantee, independently of any application code path, that no two
//! persisted bookings for the same listing with date-holding statuses can
//! have overlapping `[check_in, check_out)` ranges. The application-level
//! `check_overlap` is a fast-path courtesy check only; a check-then-insert
//! without the storage-level guarantee races under concurrency.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, ListingId, StayRange};

/// Failures surfaced by booking persistence.
///
/// `SlotTaken` is its own variant because callers must be able to tell a
/// lost availability race from an outage: the former is a normal business
/// outcome, the latter an operational incident.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The storage-level exclusion guarantee rejected the write: another
    /// active booking holds an overlapping range on the same listing.
    #[error("date range conflicts with an existing booking")]
    SlotTaken,

    /// No booking with the given id.
    #[error("booking {0} not found")]
    NotFound(BookingId),

    /// Connectivity or transaction infrastructure failure. Transient.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A persisted row could not be mapped back into the aggregate.
    #[error("corrupt booking row: {0}")]
    Corrupt(String),
}

/// Repository port for Booking aggregate persistence.
///
/// Implementations must ensure:
/// - `insert_booking` is atomic: the row is fully committed or not at all
/// - the range-exclusion guarantee holds for every committed row set
/// - `SlotTaken` is distinguishable from every other failure kind
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Best-effort check whether any active booking overlaps `stay`.
    ///
    /// Non-authoritative: a `false` here can still lose the race at insert
    /// time. Used to fail fast before opening a write transaction.
    async fn check_overlap(
        &self,
        listing_id: &ListingId,
        stay: &StayRange,
    ) -> Result<bool, RepositoryError>;

    /// Persist a new booking inside a single transaction.
    ///
    /// # Errors
    ///
    /// - `SlotTaken` when the exclusion guarantee rejects the row
    /// - `Unavailable` on connectivity failure
    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepositoryError>;

    /// Update the lifecycle status of an existing booking.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the booking doesn't exist
    /// - `Unavailable` on connectivity failure
    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), RepositoryError>;

    /// Fetch a booking by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError>;

    /// All bookings for a listing, any status, ordered by check-in.
    ///
    /// Read accessor for downstream collaborators (payments, messaging).
    async fn find_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Booking>, RepositoryError>;
}
