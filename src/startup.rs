//! Boot-time invariant validation.
//!
//! A process that serves reservations with the exclusion guarantee missing
//! will silently double-book; a process that refuses to start will page
//! someone. The guard makes the second thing happen. The hosting process
//! must call [`StartupGuard::validate_invariants_or_fail`] before opening
//! its request listener.

use std::sync::Arc;

use crate::config::Environment;
use crate::ports::{GuardError, InvariantGuard};

/// Gates process startup on storage invariant verification.
pub struct StartupGuard {
    guard: Arc<dyn InvariantGuard>,
}

impl StartupGuard {
    pub fn new(guard: Arc<dyn InvariantGuard>) -> Self {
        Self { guard }
    }

    /// Verifies the storage guarantee, failing hard in production.
    ///
    /// In non-production environments a missing guarantee degrades to a
    /// warning so local setups without the full schema still run. An
    /// unreachable storage backend is fatal everywhere; there is nothing
    /// meaningful to degrade to.
    ///
    /// # Errors
    ///
    /// - `InvariantUnenforced` (production only): the constraint or a
    ///   capability it depends on is missing. Never catch and ignore this.
    /// - `Unavailable`: storage could not be reached to verify.
    pub async fn validate_invariants_or_fail(
        &self,
        environment: &Environment,
    ) -> Result<(), GuardError> {
        match self.guard.verify().await {
            Ok(()) => {
                tracing::info!("storage invariants verified, safe to serve reservations");
                Ok(())
            }
            Err(GuardError::InvariantUnenforced { missing })
                if *environment != Environment::Production =>
            {
                tracing::warn!(
                    %missing,
                    "storage invariant unenforced; continuing because this is not production"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "refusing to start");
                Err(err)
            }
        }
    }
}
