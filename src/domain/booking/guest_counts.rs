//! Guest party composition value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Largest party a single booking may carry. Matches the listing-side cap
/// enforced at publication time.
const MAX_PARTY_SIZE: u32 = 16;

/// Who is staying: adults, children, and infants.
///
/// At least one adult is required. Infants count toward the party for
/// record-keeping but hosts commonly exempt them from occupancy limits;
/// that policy lives with the listing, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    adults: u32,
    children: u32,
    infants: u32,
}

impl GuestCounts {
    /// Creates guest counts, requiring at least one adult.
    pub fn new(adults: u32, children: u32, infants: u32) -> Result<Self, ValidationError> {
        if adults == 0 {
            return Err(ValidationError::out_of_range(
                "adults",
                1,
                MAX_PARTY_SIZE as i64,
                0,
            ));
        }
        let total = adults + children + infants;
        if total > MAX_PARTY_SIZE {
            return Err(ValidationError::out_of_range(
                "guests",
                1,
                MAX_PARTY_SIZE as i64,
                total as i64,
            ));
        }
        Ok(Self {
            adults,
            children,
            infants,
        })
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn infants(&self) -> u32 {
        self.infants
    }

    /// Total headcount across all age bands.
    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}
