//! In-memory ListingReader adapter.
//!
//! Useful for testing and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ListingId};
use crate::domain::listing::Listing;
use crate::ports::ListingReader;

/// In-memory listing store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingReader {
    listings: Arc<RwLock<HashMap<ListingId, Listing>>>,
}

impl InMemoryListingReader {
    /// Create an empty in-memory reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a listing.
    pub async fn put(&self, listing: Listing) {
        self.listings.write().await.insert(listing.id, listing);
    }
}

#[async_trait]
impl ListingReader for InMemoryListingReader {
    async fn get_listing(&self, id: &ListingId) -> Result<Option<Listing>, DomainError> {
        Ok(self.listings.read().await.get(id).cloned())
    }
}
