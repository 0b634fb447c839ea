//! Pricing calculation error types

/// Errors from the fee calculator.
///
/// An order beyond the delivery area is not an error; see
/// [`FeeResult::undeliverable`](super::models::FeeResult::undeliverable).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Malformed distance schedule: {message}")]
    MalformedSchedule { message: String, errors: Vec<String> },

    #[error("No distance range covers {distance} m")]
    NoMatchingRange { distance: u64 },

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
}
