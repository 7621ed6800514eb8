//! Stay pricing.
//!
//! Pure arithmetic over a listing's pricing attributes. All values are exact
//! decimals; rounding drift across fee components would be a correctness bug
//! in a money pipeline, so floats are banned here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingError;
use crate::domain::foundation::Currency;
use crate::domain::listing::Listing;

/// Itemized cost of a stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Nightly rate times the number of nights.
    pub base_total: Decimal,

    /// Flat cleaning fee.
    pub cleaning_fee: Decimal,

    /// Platform service fee (percentage of the nightly total).
    pub service_fee: Decimal,

    /// `base_total + cleaning_fee + service_fee`.
    pub subtotal: Decimal,

    /// Discount applied, clamped so it never exceeds the subtotal.
    pub discount_amount: Decimal,

    /// Refundable deposit collected with the booking.
    pub security_deposit: Decimal,

    /// What the guest pays: `subtotal - discount + deposit`.
    pub total: Decimal,

    /// What the host receives: subtotal less discount and platform fee,
    /// never negative. The deposit is held, not paid out.
    pub payout: Decimal,

    /// Currency every amount above is quoted in.
    pub currency: Currency,
}

/// Prices a stay of `nights` nights against a listing.
///
/// # Errors
///
/// Returns `InvalidStayLength` when `nights` is below the listing's minimum
/// or above its maximum (when one is set).
pub fn price_stay(
    listing: &Listing,
    nights: u32,
    discount: Decimal,
) -> Result<PriceBreakdown, BookingError> {
    if nights < listing.min_stay_nights {
        return Err(BookingError::invalid_stay_length(
            nights,
            listing.min_stay_nights,
            listing.max_stay_nights,
        ));
    }
    if let Some(max) = listing.max_stay_nights {
        if nights > max {
            return Err(BookingError::invalid_stay_length(
                nights,
                listing.min_stay_nights,
                listing.max_stay_nights,
            ));
        }
    }

    let base_total = listing.base_price * Decimal::from(nights);
    let service_fee = listing
        .service_fee_percent
        .map(|pct| base_total * pct / Decimal::from(100))
        .unwrap_or(Decimal::ZERO);
    let subtotal = base_total + listing.cleaning_fee + service_fee;

    let discount_amount = discount.max(Decimal::ZERO).min(subtotal);

    let total = subtotal - discount_amount + listing.security_deposit;
    let payout = (subtotal - discount_amount - service_fee).max(Decimal::ZERO);

    Ok(PriceBreakdown {
        base_total,
        cleaning_fee: listing.cleaning_fee,
        service_fee,
        subtotal,
        discount_amount,
        security_deposit: listing.security_deposit,
        total,
        payout,
        currency: listing.currency.clone(),
    })
}
