//! Booking aggregate entity.
//!
//! The one aggregate this engine creates and mutates. A booking claims a
//! half-open date range on a listing; while it is Pending or Confirmed no
//! other booking may claim an overlapping range on the same listing.
//!
//! # Design Decisions
//!
//! - **Exact decimals**: all monetary values are `Decimal`, never floats
//! - **Never deleted**: bookings transition to Cancelled or Completed;
//!   rows stay for the audit trail
//! - **No persistence here**: the aggregate knows nothing about storage;
//!   the availability constraint is enforced by the repository layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, Currency, DomainError, ErrorCode, GuestId, ListingId, StayRange, Timestamp,
};

use super::{BookingStatus, GuestCounts, PaymentStatus};

/// Booking aggregate - one guest's reserved stay on one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for this booking.
    pub id: BookingId,

    /// Listing the stay is reserved on.
    pub listing_id: ListingId,

    /// Guest who made the reservation.
    pub guest_id: GuestId,

    /// The half-open `[check_in, check_out)` date range.
    pub stay: StayRange,

    /// Party composition.
    pub guests: GuestCounts,

    /// Total the guest pays, including fees and deposit.
    pub total_amount: Decimal,

    /// What the host receives after platform fees.
    pub payout_amount: Decimal,

    /// Currency both amounts are quoted in.
    pub currency: Currency,

    /// Lifecycle status.
    pub status: BookingStatus,

    /// Payment lifecycle, driven by the payment collaborator.
    pub payment_status: PaymentStatus,

    /// When the booking was created.
    pub created_at: Timestamp,

    /// When the booking was last updated.
    pub updated_at: Timestamp,

    /// When the booking was cancelled (if cancelled).
    pub cancelled_at: Option<Timestamp>,
}

impl Booking {
    /// Creates a new booking in the given initial status.
    ///
    /// Instant-book listings start Confirmed; request-to-book listings start
    /// Pending. Either way the date range is held from this moment.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: BookingId,
        listing_id: ListingId,
        guest_id: GuestId,
        stay: StayRange,
        guests: GuestCounts,
        total_amount: Decimal,
        payout_amount: Decimal,
        currency: Currency,
        status: BookingStatus,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            listing_id,
            guest_id,
            stay,
            guests,
            total_amount,
            payout_amount,
            currency,
            status,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    /// Number of nights in the stay.
    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }

    /// Confirm a pending booking (host approval).
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Confirmed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel this booking, releasing its date range.
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Cancelled)?;
        self.cancelled_at = Some(Timestamp::now());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the stay finished after checkout has passed.
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Completed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn transition_to(&mut self, next: BookingStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot move booking from {} to {}", self.status, next),
            ));
        }
        self.status = next;
        Ok(())
    }
}
