//! Delivery fee calculator.
//!
//! Prices an order from the cart value, the customer's and venue's
//! coordinates and the venue's distance-tiered schedule, and serves the
//! result over a small JSON API.

pub mod config;
pub mod delivery;
pub mod error;
pub mod venues;

use axum::Router;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::venues::VenueStore;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub venues: VenueStore,
}

impl AppState {
    pub fn new(venues: VenueStore) -> Self {
        Self { venues }
    }
}

/// Build the application router with middleware.
pub fn app(state: AppState) -> Router {
    delivery::router()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
