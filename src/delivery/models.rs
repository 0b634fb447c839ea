//! Input and output types for the fee calculator.
//!
//! Monetary amounts are integer minor units (cents) except the cart value,
//! which arrives in major units exactly as the customer entered it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of a venue's distance pricing schedule.
///
/// `max == 0` marks the terminal entry: no delivery from `min` onwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    /// Inclusive lower bound in meters
    pub min: u64,
    /// Exclusive upper bound in meters, 0 for the terminal entry
    pub max: u64,
    /// Flat addition in minor units
    pub a: i64,
    /// Multiplier applied per 10 meters of delivery distance
    pub b: Decimal,
}

impl DistanceRange {
    pub fn priced(min: u64, max: u64, a: i64, b: Decimal) -> Self {
        Self { min, max, a, b }
    }

    pub fn terminal(min: u64) -> Self {
        Self {
            min,
            max: 0,
            a: 0,
            b: Decimal::ZERO,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.max == 0
    }

    /// Tagged view of this entry.
    pub fn tier(&self) -> DistanceTier {
        if self.is_terminal() {
            DistanceTier::Terminal { min: self.min }
        } else {
            DistanceTier::Priced {
                min: self.min,
                max: self.max,
                a: self.a,
                b: self.b,
            }
        }
    }
}

/// A schedule entry with the sentinel decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceTier {
    /// Deliverable for distances in `[min, max)`
    Priced { min: u64, max: u64, a: i64, b: Decimal },
    /// No delivery at or beyond `min`
    Terminal { min: u64 },
}

impl DistanceTier {
    pub fn contains(&self, distance: u64) -> bool {
        match *self {
            DistanceTier::Priced { min, max, .. } => distance >= min && distance < max,
            DistanceTier::Terminal { min } => distance >= min,
        }
    }
}

/// Everything needed to price one order.
#[derive(Debug, Clone)]
pub struct OrderContext {
    /// Cart value in major units (e.g. euros)
    pub cart_value: Decimal,
    pub user_latitude: f64,
    pub user_longitude: f64,
    pub venue_latitude: f64,
    pub venue_longitude: f64,
    /// Cart value below which the small order surcharge applies, minor units
    pub order_minimum: i64,
    /// Base delivery fee, minor units
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}

/// Fee breakdown for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeResult {
    pub delivery_fee: i64,
    /// Rounded great-circle distance in meters
    pub delivery_distance: u64,
    pub small_order_fee: i64,
    pub total_price: i64,
    pub deliverable: bool,
}

impl FeeResult {
    /// Result for an order beyond the venue's delivery area.
    pub fn undeliverable(delivery_distance: u64) -> Self {
        Self {
            delivery_fee: 0,
            delivery_distance,
            small_order_fee: 0,
            total_price: 0,
            deliverable: false,
        }
    }
}
