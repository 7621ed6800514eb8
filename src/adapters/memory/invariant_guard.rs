//! Stub InvariantGuard adapter.
//!
//! The in-memory booking repository enforces exclusion inside its own lock,
//! so the enforced stub is honest when paired with it. The unenforced stub
//! exists to exercise the refuse-to-boot path.

use async_trait::async_trait;

use crate::ports::{GuardError, InvariantGuard};

/// Invariant guard with a fixed answer.
#[derive(Debug, Clone)]
pub struct StubInvariantGuard {
    enforced: bool,
}

impl StubInvariantGuard {
    /// A guard that reports the guarantee is in place.
    pub fn enforced() -> Self {
        Self { enforced: true }
    }

    /// A guard that reports the guarantee is missing.
    pub fn unenforced() -> Self {
        Self { enforced: false }
    }
}

#[async_trait]
impl InvariantGuard for StubInvariantGuard {
    async fn verify(&self) -> Result<(), GuardError> {
        if self.enforced {
            Ok(())
        } else {
            Err(GuardError::InvariantUnenforced {
                missing: "exclusion constraint (stub)".to_string(),
            })
        }
    }
}
