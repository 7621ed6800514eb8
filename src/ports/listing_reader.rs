//! Listing read port.
//!
//! The reservation flow only ever reads listings; publication and editing
//! are owned by another part of the platform. Implementations must supply
//! every pricing and stay-bounds attribute on the aggregate.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ListingId};
use crate::domain::listing::Listing;

/// Read-side port for Listing lookups.
#[async_trait]
pub trait ListingReader: Send + Sync {
    /// Fetch a listing by id.
    ///
    /// Returns `None` if no listing exists with that id.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` on infrastructure failure
    async fn get_listing(&self, id: &ListingId) -> Result<Option<Listing>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ListingReader) {}
    }
}
