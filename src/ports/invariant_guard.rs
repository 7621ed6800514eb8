//! Storage invariant verification port.
//!
//! Asks the storage layer whether the range-exclusion guarantee actually
//! exists. A deployment where the guarantee is missing would accept
//! double-bookings silently, which is strictly worse than refusing to boot;
//! the startup path treats a negative answer as fatal in production.

use async_trait::async_trait;
use thiserror::Error;

/// Why invariant verification failed.
#[derive(Debug, Clone, Error)]
pub enum GuardError {
    /// The storage layer is reachable but the guarantee is not in place.
    /// This error must never be caught-and-ignored.
    #[error("storage invariant unenforced: missing {missing}")]
    InvariantUnenforced { missing: String },

    /// Could not reach storage to verify anything.
    #[error("invariant verification failed: {0}")]
    Unavailable(String),
}

/// Port for verifying storage-level invariants before serving traffic.
#[async_trait]
pub trait InvariantGuard: Send + Sync {
    /// Verifies that the exclusion guarantee and everything it depends on
    /// exist in the connected storage backend.
    ///
    /// # Errors
    ///
    /// - `InvariantUnenforced` when the constraint or a capability it
    ///   requires is missing
    /// - `Unavailable` when storage cannot be reached
    async fn verify(&self) -> Result<(), GuardError>;
}
