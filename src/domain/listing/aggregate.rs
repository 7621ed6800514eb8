//! Listing aggregate entity.
//!
//! Read-mostly in this core: the reservation flow loads a listing to decide
//! whether it can be booked and what the stay costs. Publication workflow
//! (drafting, review, suspension) lives elsewhere.
//!
//! # Invariants
//!
//! - Monetary fields are exact decimals, never floats
//! - `min_stay_nights >= 1`; `max_stay_nights`, when set, `>= min_stay_nights`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, HostId, ListingId, Timestamp};

use super::{BookingMode, ListingStatus};

/// Listing aggregate - a property that guests can reserve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier for this listing.
    pub id: ListingId,

    /// Host who owns the property.
    pub host_id: HostId,

    /// Publication status; only Active listings are reservable.
    pub status: ListingStatus,

    /// Whether reservations confirm instantly or await host approval.
    pub booking_mode: BookingMode,

    /// Nightly base price.
    pub base_price: Decimal,

    /// Flat cleaning fee added to every stay.
    pub cleaning_fee: Decimal,

    /// Platform service fee as a percentage of the nightly total, if charged.
    pub service_fee_percent: Option<Decimal>,

    /// Refundable security deposit collected with the booking.
    pub security_deposit: Decimal,

    /// Currency all of the above are quoted in.
    pub currency: Currency,

    /// Minimum stay length in nights.
    pub min_stay_nights: u32,

    /// Maximum stay length in nights, if the host caps it.
    pub max_stay_nights: Option<u32>,

    /// When the listing was created.
    pub created_at: Timestamp,

    /// When the listing was last updated.
    pub updated_at: Timestamp,
}

impl Listing {
    /// True when guests may reserve against this listing.
    pub fn is_bookable(&self) -> bool {
        self.status.is_bookable()
    }
}
