//! Delivery quote service.
//!
//! Glues request validation and venue lookup to the pure fee calculator.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{AppError, Result};
use crate::venues::{Venue, VenueStore};

use super::calculators::calculate_fee;
use super::models::{FeeResult, OrderContext};
use super::requests::{DeliveryFeeRequest, ValidatedOrder};

/// Fee breakdown plus when it was calculated
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryQuote {
    pub venue_slug: String,
    pub fees: FeeResult,
    pub calculated_at: DateTime<Utc>,
}

/// Combine a validated order with its venue's pricing.
pub fn order_context(order: &ValidatedOrder, venue: &Venue) -> OrderContext {
    OrderContext {
        cart_value: order.cart_value,
        user_latitude: order.user_latitude,
        user_longitude: order.user_longitude,
        venue_latitude: venue.latitude,
        venue_longitude: venue.longitude,
        order_minimum: venue.order_minimum,
        base_price: venue.base_price,
        distance_ranges: venue.distance_ranges.clone(),
    }
}

/// Validate a request, look up its venue and price the order.
///
/// # Returns
/// `DeliveryQuote` with breakdown; `fees.deliverable` is false when the
/// customer is outside the venue's delivery area.
pub async fn quote_delivery(venues: &VenueStore, request: DeliveryFeeRequest) -> Result<DeliveryQuote> {
    let order = request.validate().map_err(AppError::Validation)?;
    let venue = venues.get(&order.venue_slug).await?;

    let fees = calculate_fee(&order_context(&order, &venue))?;

    info!(
        venue = %venue.slug,
        distance_m = fees.delivery_distance,
        deliverable = fees.deliverable,
        delivery_fee = fees.delivery_fee,
        small_order_fee = fees.small_order_fee,
        total_price = fees.total_price,
        "Delivery fee calculated"
    );

    Ok(DeliveryQuote {
        venue_slug: venue.slug.clone(),
        fees,
        calculated_at: Utc::now(),
    })
}
