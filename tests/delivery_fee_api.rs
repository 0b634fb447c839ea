//! End-to-end tests for the delivery fee API against the sample catalog.

use std::path::PathBuf;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use delivery_fee::venues::VenueStore;
use delivery_fee::{app, AppState};

const HELSINKI: &str = "home-assignment-venue-helsinki";
const STOCKHOLM: &str = "home-assignment-venue-stockholm";

fn test_app() -> Router {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/venues.json");
    app(AppState::new(VenueStore::new(path, Duration::from_secs(60), 100)))
}

async fn post_fee(body: Value) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/delivery-fee")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn order(cart_value: &str, lat: f64, lon: f64) -> Value {
    json!({
        "venueSlug": HELSINKI,
        "cartValue": cart_value,
        "userLatitude": lat,
        "userLongitude": lon,
    })
}

#[tokio::test]
async fn short_distance_order() {
    let (status, body) = post_fee(order("10", 60.17094, 24.93087)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryFee"], 190);
    assert_eq!(body["deliveryDistance"], 177);
    assert_eq!(body["smallOrderFee"], 0);
    assert_eq!(body["totalPrice"], 1190);
    assert_eq!(body["deliverable"], true);
    assert!(body["calculatedAt"].is_string());
}

#[tokio::test]
async fn small_order_surcharge() {
    let (status, body) = post_fee(order("5", 60.17094, 24.93087)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryFee"], 190);
    assert_eq!(body["deliveryDistance"], 177);
    assert_eq!(body["smallOrderFee"], 500);
    assert_eq!(body["totalPrice"], 1190);
}

#[tokio::test]
async fn second_tier_order() {
    let (status, body) = post_fee(order("10", 60.170751, 24.918719)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryFee"], 290);
    assert_eq!(body["deliveryDistance"], 525);
    assert_eq!(body["totalPrice"], 1290);
}

#[tokio::test]
async fn stockholm_multiplier_tier() {
    let mut body = order("10", 59.353462, 18.0314984);
    body["venueSlug"] = json!(STOCKHOLM);
    let (status, body) = post_fee(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryDistance"], 752);
    // 199 + 100 + round(752 / 10)
    assert_eq!(body["deliveryFee"], 374);
    assert_eq!(body["smallOrderFee"], 0);
    assert_eq!(body["totalPrice"], 1374);
    assert_eq!(body["deliverable"], true);
}

#[tokio::test]
async fn stockholm_first_tier() {
    let mut body = order("4", 59.351016, 18.0314984);
    body["venueSlug"] = json!(STOCKHOLM);
    let (status, body) = post_fee(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryDistance"], 480);
    assert_eq!(body["deliveryFee"], 199);
    assert_eq!(body["smallOrderFee"], 600);
    assert_eq!(body["totalPrice"], 1199);
}

#[tokio::test]
async fn huge_cart_value_is_rejected() {
    for cart_value in ["92233720368547758", "99999999999999999999"] {
        let (status, body) = post_fee(order(cart_value, 60.17094, 24.93087)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", cart_value);
        assert_eq!(body["error_type"], "amount_out_of_range");
    }
}

#[tokio::test]
async fn outside_delivery_area() {
    let (status, body) = post_fee(order("10", 60.1754347, 24.8248982)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deliveryFee"], 0);
    assert_eq!(body["deliveryDistance"], 5740);
    assert_eq!(body["smallOrderFee"], 0);
    assert_eq!(body["totalPrice"], 0);
    assert_eq!(body["deliverable"], false);
}

#[tokio::test]
async fn validation_errors_are_per_field() {
    let (status, body) = post_fee(json!({
        "venueSlug": "",
        "cartValue": "-10",
        "userLatitude": 95.0,
    }))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "validation");
    assert_eq!(body["details"]["venueSlug"], "Venue slug is required.");
    assert_eq!(body["details"]["cartValue"], "Cart value must be greater than 0.");
    assert_eq!(
        body["details"]["userLatitude"],
        "Latitude must be between -90 and 90."
    );
    assert_eq!(body["details"]["userLongitude"], "Longitude cannot be empty.");
}

#[tokio::test]
async fn unknown_venue() {
    let mut body = order("10", 60.17094, 24.93087);
    body["venueSlug"] = json!("no-such-venue");
    let (status, body) = post_fee(body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "venue_not_found");
    assert_eq!(body["message"], "Please check the venue slug.");
}

#[tokio::test]
async fn health_reports_cache() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["venuesCached"].is_u64());
    assert!(body.get("venues_cached").is_none());
}
