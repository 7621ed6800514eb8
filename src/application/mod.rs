//! Application layer - use-case orchestration.
//!
//! Handlers wire domain rules to ports. They hold `Arc<dyn Port>` references
//! injected at construction; no handler owns infrastructure.

pub mod handlers;
