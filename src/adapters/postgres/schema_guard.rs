//! PostgreSQL implementation of InvariantGuard.
//!
//! Interrogates the system catalogs for the two things the availability
//! guarantee depends on: the `btree_gist` extension (required for equality
//! on `listing_id` inside a gist index) and the `bookings_no_overlap`
//! exclusion constraint itself.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::ports::{GuardError, InvariantGuard};

use super::booking_repository::NO_OVERLAP_CONSTRAINT;

/// Verifies the booking exclusion guarantee against a live database.
pub struct PostgresSchemaGuard {
    pool: PgPool,
}

impl PostgresSchemaGuard {
    /// Creates a new PostgresSchemaGuard with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn extension_exists(&self, name: &str) -> Result<bool, GuardError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM pg_extension WHERE extname = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| GuardError::Unavailable(e.to_string()))?;
        Ok(exists)
    }

    async fn exclusion_constraint_exists(&self, name: &str) -> Result<bool, GuardError> {
        // contype 'x' is an exclusion constraint; anything else with the
        // same name does not count.
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM pg_constraint
                WHERE conname = $1
                  AND contype = 'x'
                  AND conrelid = 'bookings'::regclass
            )
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GuardError::Unavailable(e.to_string()))?;
        Ok(exists)
    }
}

#[async_trait]
impl InvariantGuard for PostgresSchemaGuard {
    async fn verify(&self) -> Result<(), GuardError> {
        if !self.extension_exists("btree_gist").await? {
            return Err(GuardError::InvariantUnenforced {
                missing: "btree_gist extension".to_string(),
            });
        }

        if !self.exclusion_constraint_exists(NO_OVERLAP_CONSTRAINT).await? {
            return Err(GuardError::InvariantUnenforced {
                missing: format!("{} exclusion constraint", NO_OVERLAP_CONSTRAINT),
            });
        }

        tracing::debug!("booking exclusion guarantee verified");
        Ok(())
    }
}
