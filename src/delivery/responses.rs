//! Response DTOs for the delivery fee endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::services::DeliveryQuote;

/// Response for a delivery fee calculation, amounts in minor units
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeResponse {
    pub delivery_fee: i64,
    pub delivery_distance: u64,
    pub small_order_fee: i64,
    pub total_price: i64,
    pub deliverable: bool,
    pub calculated_at: DateTime<Utc>,
}

impl From<DeliveryQuote> for DeliveryFeeResponse {
    fn from(quote: DeliveryQuote) -> Self {
        let fees = quote.fees;
        Self {
            delivery_fee: fees.delivery_fee,
            delivery_distance: fees.delivery_distance,
            small_order_fee: fees.small_order_fee,
            total_price: fees.total_price,
            deliverable: fees.deliverable,
            calculated_at: quote.calculated_at,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub venues_cached: u64,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
