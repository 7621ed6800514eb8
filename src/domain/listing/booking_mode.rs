//! How reservations against a listing get confirmed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmation policy for new reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingMode {
    /// Reservations confirm automatically on creation.
    Instant,
    /// Reservations wait for explicit host approval.
    Request,
}

impl BookingMode {
    pub fn is_instant(&self) -> bool {
        matches!(self, BookingMode::Instant)
    }
}

impl fmt::Display for BookingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingMode::Instant => "instant",
            BookingMode::Request => "request",
        };
        write!(f, "{}", s)
    }
}
