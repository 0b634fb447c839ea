//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::delivery::requests::FieldErrors;
use crate::delivery::responses::ErrorResponse;
use crate::delivery::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Venue not found: {0}")]
    VenueNotFound(String),

    #[error("Invalid request: {} field(s) rejected", .0.len())]
    Validation(FieldErrors),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Venue catalog read error: {0}")]
    CatalogIo(#[from] std::io::Error),

    #[error("Venue catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match &self {
            AppError::VenueNotFound(slug) => {
                tracing::debug!("Unknown venue slug: {}", slug);
                (
                    StatusCode::NOT_FOUND,
                    "venue_not_found",
                    "Please check the venue slug.".to_string(),
                    None,
                )
            }
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                "One or more fields are invalid.".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::Pricing(PricingError::AmountOutOfRange(detail)) => {
                tracing::warn!("Amount out of range: {}", detail);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "amount_out_of_range",
                    "Cart value is too large to price.".to_string(),
                    None,
                )
            }
            AppError::Pricing(e) => {
                tracing::error!("Pricing error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "pricing",
                    "Venue pricing is misconfigured".to_string(),
                    None,
                )
            }
            AppError::CatalogIo(e) => {
                tracing::error!("Venue catalog read error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal error".to_string(),
                    None,
                )
            }
            AppError::CatalogParse(e) => {
                tracing::error!("Venue catalog parse error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal error".to_string(),
                    None,
                )
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
