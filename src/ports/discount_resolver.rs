//! Coupon resolution port.
//!
//! Maps a coupon code to the flat discount it grants, if any. Campaign
//! management and redemption accounting live outside this engine; the
//! reservation flow only needs the amount to feed the price calculation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Outcome of resolving a coupon code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CouponResolution {
    /// Code is live and grants a flat discount amount.
    Valid { discount: Decimal },

    /// Code is unknown, expired, or exhausted.
    Invalid { reason: String },
}

/// Port for resolving coupon codes.
#[async_trait]
pub trait DiscountResolver: Send + Sync {
    /// Resolves a coupon code to its discount.
    ///
    /// # Returns
    ///
    /// - `Ok(Valid { discount })` - code applies
    /// - `Ok(Invalid { reason })` - code does not apply, with a reason
    /// - `Err(DomainError)` - infrastructure failure
    async fn resolve(&self, code: &str) -> Result<CouponResolution, DomainError>;
}
