//! IP location integration tests
//!
//! Runs the IP lookup client against a throwaway endpoint:
//! - Both coordinate spellings are accepted
//! - Refused lookups map to `Denied`
//! - Every failure degrades to "no location" in the best-effort wrapper

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use fashion_advisor::external::IpLocationClient;
use fashion_advisor::services::locate_best_effort;
use fashion_advisor::LocationError;
use serde_json::{json, Value};
use shared::Coordinates;

// ============================================================================
// Fake Lookup Endpoint
// ============================================================================

async fn spawn_endpoint(status: StatusCode, body: Value) -> String {
    let router = Router::new().route(
        "/json/",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    format!("http://{}/json/", addr)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[tokio::test]
async fn test_latitude_longitude_spelling() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({"city": "Chiang Mai", "latitude": 18.7883, "longitude": 98.9853}),
    )
    .await;
    let client = IpLocationClient::new(endpoint).unwrap();

    let coords = client.locate().await.unwrap();
    assert_eq!(coords, Coordinates::new(18.7883, 98.9853));
}

#[tokio::test]
async fn test_lat_lon_spelling() {
    let endpoint = spawn_endpoint(StatusCode::OK, json!({"lat": 13.7563, "lon": 100.5018})).await;
    let client = IpLocationClient::new(endpoint).unwrap();

    let coords = client.locate().await.unwrap();
    assert_eq!(coords, Coordinates::new(13.7563, 100.5018));
}

#[tokio::test]
async fn test_forbidden_is_denied() {
    let endpoint = spawn_endpoint(StatusCode::FORBIDDEN, json!({"error": "quota"})).await;
    let client = IpLocationClient::new(endpoint).unwrap();

    let err = client.locate().await.unwrap_err();
    assert!(matches!(err, LocationError::Denied));
}

#[tokio::test]
async fn test_unauthorized_is_denied() {
    let endpoint = spawn_endpoint(StatusCode::UNAUTHORIZED, json!({})).await;
    let client = IpLocationClient::new(endpoint).unwrap();

    assert!(matches!(client.locate().await, Err(LocationError::Denied)));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let endpoint = spawn_endpoint(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
    let client = IpLocationClient::new(endpoint).unwrap();

    assert!(matches!(client.locate().await, Err(LocationError::Unavailable(_))));
}

#[tokio::test]
async fn test_missing_coordinates_is_unavailable() {
    let endpoint = spawn_endpoint(StatusCode::OK, json!({"latitude": 18.0})).await;
    let client = IpLocationClient::new(endpoint).unwrap();

    assert!(matches!(client.locate().await, Err(LocationError::Unavailable(_))));
}

#[tokio::test]
async fn test_denied_lookup_degrades_to_none() {
    let endpoint = spawn_endpoint(StatusCode::FORBIDDEN, json!({})).await;
    let client = IpLocationClient::new(endpoint).unwrap();

    assert_eq!(locate_best_effort(&client, Duration::from_secs(5)).await, None);
}
