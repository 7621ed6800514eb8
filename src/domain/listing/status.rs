//! Listing publication status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a listing sits in its publication lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Being drafted by the host; not visible to guests.
    Draft,
    /// Live and reservable.
    Active,
    /// Taken down by moderation or the host; not reservable.
    Suspended,
}

impl ListingStatus {
    /// True when guests may reserve against this listing.
    pub fn is_bookable(&self) -> bool {
        matches!(self, ListingStatus::Active)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Active => "active",
            ListingStatus::Suspended => "suspended",
        };
        write!(f, "{}", s)
    }
}
