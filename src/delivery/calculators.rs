//! Core delivery fee calculation.
//!
//! Pure functions for pricing math - no I/O, no shared state. Safe to call
//! from any number of threads at once.

use rust_decimal::prelude::*;

use super::distance;
use super::error::PricingError;
use super::models::{DistanceTier, FeeResult, OrderContext};
use super::ranges;

/// Minor currency units per major unit (cents per euro).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Meters of distance covered by one step of a tier's `b` multiplier.
pub const METERS_PER_DISTANCE_STEP: i64 = 10;

/// Round to a whole number of minor units, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use delivery_fee::delivery::round_minor_units;
///
/// assert_eq!(round_minor_units(dec!(52.5)).unwrap(), 53);
/// assert_eq!(round_minor_units(dec!(52.49)).unwrap(), 52);
/// ```
pub fn round_minor_units(amount: Decimal) -> Result<i64, PricingError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| PricingError::AmountOutOfRange(amount.to_string()))
}

/// Convert a cart value in major units to minor units.
pub fn cart_value_to_minor_units(cart_value: Decimal) -> Result<i64, PricingError> {
    let scaled = cart_value
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .ok_or_else(|| PricingError::AmountOutOfRange(cart_value.to_string()))?;
    round_minor_units(scaled)
}

/// Surcharge bringing a small cart up to the venue's order minimum.
pub fn small_order_surcharge(cart_value: i64, order_minimum: i64) -> Result<i64, PricingError> {
    let shortfall = order_minimum
        .checked_sub(cart_value)
        .ok_or_else(|| out_of_range("small order surcharge", cart_value))?;
    Ok(shortfall.max(0))
}

/// Delivery fee for a priced tier: `base + a + round(b * distance / 10)`.
pub fn tier_delivery_fee(
    base_price: i64,
    a: i64,
    b: Decimal,
    delivery_distance: u64,
) -> Result<i64, PricingError> {
    let steps = Decimal::from(delivery_distance) / Decimal::from(METERS_PER_DISTANCE_STEP);
    let distance_term = b
        .checked_mul(steps)
        .ok_or_else(|| out_of_range("distance fee", delivery_distance))?;
    let distance_fee = round_minor_units(distance_term)?;
    base_price
        .checked_add(a)
        .and_then(|fee| fee.checked_add(distance_fee))
        .ok_or_else(|| out_of_range("delivery fee", base_price))
}

fn out_of_range(what: &str, value: impl std::fmt::Display) -> PricingError {
    PricingError::AmountOutOfRange(format!("{} overflows at {}", what, value))
}

/// Calculate the full fee breakdown for an order.
///
/// The distance is rounded to whole meters first; tier lookup and the
/// per-distance term both use the rounded value. Orders beyond the last
/// priced tier come back as [`FeeResult::undeliverable`].
pub fn calculate_fee(order: &OrderContext) -> Result<FeeResult, PricingError> {
    let meters = distance::haversine_meters(
        order.user_latitude,
        order.user_longitude,
        order.venue_latitude,
        order.venue_longitude,
    );
    let delivery_distance = distance::round_meters(meters);

    let (a, b) = match ranges::resolve(delivery_distance, &order.distance_ranges)? {
        DistanceTier::Priced { a, b, .. } => (a, b),
        DistanceTier::Terminal { .. } => return Ok(FeeResult::undeliverable(delivery_distance)),
    };

    let cart_value = cart_value_to_minor_units(order.cart_value)?;
    let small_order_fee = small_order_surcharge(cart_value, order.order_minimum)?;
    let delivery_fee = tier_delivery_fee(order.base_price, a, b, delivery_distance)?;
    let total_price = cart_value
        .checked_add(small_order_fee)
        .and_then(|total| total.checked_add(delivery_fee))
        .ok_or_else(|| out_of_range("total price", cart_value))?;

    Ok(FeeResult {
        delivery_fee,
        delivery_distance,
        small_order_fee,
        total_price,
        deliverable: true,
    })
}
