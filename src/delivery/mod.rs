//! Delivery pricing module.
//!
//! The fee calculation itself (`calculators`, `distance`, `ranges`) is pure and
//! synchronous. `services` and `routes` wrap it for the HTTP API.

pub mod calculators;
pub mod distance;
pub mod error;
pub mod models;
pub mod ranges;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_fee, round_minor_units};
pub use error::PricingError;
pub use models::{DistanceRange, DistanceTier, FeeResult, OrderContext};
pub use routes::router;
pub use services::{quote_delivery, DeliveryQuote};
