//! Booking lifecycle and payment statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a booking sits in its lifecycle.
///
/// Pending and Confirmed bookings hold their date range; Cancelled and
/// Completed bookings do not. The availability constraint only considers
/// the holding statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, awaiting host confirmation.
    Pending,
    /// Confirmed by the host (or instantly at creation).
    Confirmed,
    /// Cancelled; the date range is released.
    Cancelled,
    /// Stay finished; the date range is in the past.
    Completed,
}

impl BookingStatus {
    /// True when a booking in this status occupies its date range.
    pub fn holds_dates(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// True when the lifecycle permits moving from this status to `next`.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Payment lifecycle, driven by an external payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No charge captured yet.
    Pending,
    /// Payment captured.
    Captured,
    /// Payment refunded after cancellation.
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Captured => "captured",
            PaymentStatus::Refunded => "refunded",
        };
        write!(f, "{}", s)
    }
}
