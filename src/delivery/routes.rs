//! HTTP routes for delivery pricing

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::DeliveryFeeRequest;
use super::responses::{DeliveryFeeResponse, HealthResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/delivery-fee", post(delivery_fee))
        .route("/health", get(health))
}

/// Calculate the delivery fee for a cart
pub async fn delivery_fee(
    State(state): State<AppState>,
    Json(request): Json<DeliveryFeeRequest>,
) -> Result<Json<DeliveryFeeResponse>> {
    let quote = services::quote_delivery(&state.venues, request).await?;
    Ok(Json(quote.into()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        venues_cached: state.venues.stats().venues_cached,
    })
}
