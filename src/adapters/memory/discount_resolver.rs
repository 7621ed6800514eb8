//! In-memory DiscountResolver adapter.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{CouponResolution, DiscountResolver};

/// Coupon table held in memory. Codes are matched case-insensitively,
/// the way guests actually type them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscountResolver {
    coupons: Arc<RwLock<HashMap<String, Decimal>>>,
}

impl InMemoryDiscountResolver {
    /// Create an empty resolver; every code resolves Invalid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a coupon code with a flat discount amount.
    pub async fn put(&self, code: impl Into<String>, discount: Decimal) {
        self.coupons
            .write()
            .await
            .insert(code.into().to_ascii_uppercase(), discount);
    }
}

#[async_trait]
impl DiscountResolver for InMemoryDiscountResolver {
    async fn resolve(&self, code: &str) -> Result<CouponResolution, DomainError> {
        let coupons = self.coupons.read().await;
        match coupons.get(&code.to_ascii_uppercase()) {
            Some(discount) => Ok(CouponResolution::Valid {
                discount: *discount,
            }),
            None => Ok(CouponResolution::Invalid {
                reason: "unknown coupon code".to_string(),
            }),
        }
    }
}
