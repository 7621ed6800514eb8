//! Pricing domain - pure stay cost calculation.

mod quote;

pub use quote::{price_stay, PriceBreakdown};
