//! Request DTOs for the delivery fee endpoint.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Field name -> message for every rejected field
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Request to calculate a delivery fee.
///
/// Fields are optional so that a missing value is reported per field rather
/// than as a body parse failure. `cart_value` is the raw text the customer typed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeRequest {
    #[serde(default)]
    pub venue_slug: Option<String>,
    #[serde(default)]
    pub cart_value: Option<String>,
    #[serde(default)]
    pub user_latitude: Option<f64>,
    #[serde(default)]
    pub user_longitude: Option<f64>,
}

/// A request whose fields all passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub venue_slug: String,
    /// Major units
    pub cart_value: Decimal,
    pub user_latitude: f64,
    pub user_longitude: f64,
}

impl DeliveryFeeRequest {
    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<ValidatedOrder, FieldErrors> {
        let mut errors = FieldErrors::new();

        let venue_slug = match self.venue_slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => Some(slug.to_string()),
            _ => {
                errors.insert("venueSlug", "Venue slug is required.".to_string());
                None
            }
        };

        let cart_value = match validate_cart_value(self.cart_value.as_deref()) {
            Ok(value) => Some(value),
            Err(message) => {
                errors.insert("cartValue", message.to_string());
                None
            }
        };

        let user_latitude = match validate_coordinate(self.user_latitude, 90.0, "Latitude") {
            Ok(value) => Some(value),
            Err(message) => {
                errors.insert("userLatitude", message);
                None
            }
        };

        let user_longitude = match validate_coordinate(self.user_longitude, 180.0, "Longitude") {
            Ok(value) => Some(value),
            Err(message) => {
                errors.insert("userLongitude", message);
                None
            }
        };

        match (venue_slug, cart_value, user_latitude, user_longitude) {
            (Some(venue_slug), Some(cart_value), Some(user_latitude), Some(user_longitude)) => {
                Ok(ValidatedOrder {
                    venue_slug,
                    cart_value,
                    user_latitude,
                    user_longitude,
                })
            }
            _ => Err(errors),
        }
    }
}

fn validate_cart_value(raw: Option<&str>) -> Result<Decimal, &'static str> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err("Cart value cannot be empty.");
    }
    if !is_plain_decimal(raw) {
        return Err("Cart value must be a valid number.");
    }
    let value = Decimal::from_str(&normalize_decimal(raw))
        .map_err(|_| "Cart value must be a valid number.")?;
    if value <= Decimal::ZERO {
        return Err("Cart value must be greater than 0.");
    }
    Ok(value)
}

fn validate_coordinate(value: Option<f64>, limit: f64, label: &str) -> Result<f64, String> {
    match value {
        None => Err(format!("{} cannot be empty.", label)),
        Some(v) if !v.is_finite() => Err(format!("{} must be a number.", label)),
        Some(v) if !(-limit..=limit).contains(&v) => {
            Err(format!("{} must be between -{} and {}.", label, limit, limit))
        }
        Some(v) => Ok(v),
    }
}

/// Optional sign, digits with at most one decimal point, at least one digit.
/// No exponents, separators or whitespace.
fn is_plain_decimal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let mut digits = 0;
    let mut points = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

/// Rewrite forms like "+.5" or "3." as "0.5" and "3".
fn normalize_decimal(s: &str) -> String {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };
    let body = body.strip_suffix('.').unwrap_or(body);
    if body.starts_with('.') {
        format!("{}0{}", sign, body)
    } else {
        format!("{}{}", sign, body)
    }
}
