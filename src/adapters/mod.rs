//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed persistence and schema verification
//! - `memory` - in-memory implementations for tests and local development
//! - `clock` - system and fixed time sources

pub mod clock;
pub mod memory;
pub mod postgres;
