//! Stayhaven - Booking reservation and availability-consistency engine.
//!
//! Decides whether a requested stay can be reserved, prices it, and commits
//! the reservation so that no two concurrent requests can ever hold
//! overlapping date ranges on the same listing. Mutual exclusion is
//! delegated entirely to a storage-level range-exclusion constraint; the
//! startup guard refuses to serve traffic if that constraint is missing.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
