//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresListingReader` - read-side listing lookups
//! - `PostgresBookingRepository` - booking persistence; maps the exclusion
//!   constraint violation to `RepositoryError::SlotTaken`
//! - `PostgresSchemaGuard` - boot-time verification of the constraint

mod booking_repository;
mod listing_reader;
mod schema_guard;

pub use booking_repository::{PostgresBookingRepository, NO_OVERLAP_CONSTRAINT};
pub use listing_reader::PostgresListingReader;
pub use schema_guard::PostgresSchemaGuard;
