//! # Integration Tests for skyscope-api
//!
//! Drives the assembled router with `oneshot`: tier resolution from bearer
//! credentials, country and country-pair denials, credential issue and
//! verification, envelope shapes, and the service endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use skyscope_api::state::{AppConfig, AppState};
use skyscope_core::{AirlineRecord, AirportRecord, RouteRecord, Tier};
use skyscope_credential::CredentialIssuer;
use skyscope_crypto::Ed25519KeyPair;
use skyscope_dataset::{Catalog, Datasets};
use skyscope_policy::{PolicyTable, TierPolicy};

// -- Fixtures -----------------------------------------------------------------

fn airline(id: u32, name: &str, country: &str) -> AirlineRecord {
    AirlineRecord {
        id,
        name: name.to_string(),
        alias: None,
        iata: None,
        icao: None,
        callsign: None,
        country: country.to_string(),
        active: true,
    }
}

fn airport(id: u32, code: &str, country: &str) -> AirportRecord {
    AirportRecord {
        id,
        name: format!("{code} Airport"),
        city: code.to_string(),
        country: country.to_string(),
        iata: Some(code.to_string()),
        icao: None,
        latitude: 0.0,
        longitude: 0.0,
        altitude: 0,
        timezone: None,
    }
}

fn route(airline: &str, src: &str, dst: &str) -> RouteRecord {
    RouteRecord {
        airline: airline.to_string(),
        airline_id: None,
        source_airport: src.to_string(),
        source_airport_id: None,
        destination_airport: dst.to_string(),
        destination_airport_id: None,
        codeshare: false,
        stops: 0,
        equipment: vec!["738".to_string()],
    }
}

fn datasets() -> Datasets {
    Datasets {
        airlines: vec![
            airline(596, "El Al Israel Airlines", "Israel"),
            airline(24, "American Airlines", "United States"),
            airline(321, "Aeromexico", "Mexico"),
            airline(3320, "Lufthansa", "Germany"),
            airline(9, "Nowhere Air", "Unknown"),
        ],
        airports: vec![
            airport(1590, "TLV", "Israel"),
            airport(3797, "JFK", "United States"),
            airport(1824, "MEX", "Mexico"),
            airport(340, "FRA", "Germany"),
            airport(2279, "NRT", "Japan"),
        ],
        routes: vec![
            route("LY", "TLV", "JFK"),
            route("AA", "JFK", "TLV"),
            route("AM", "MEX", "JFK"),
            route("LH", "FRA", "TLV"),
            route("JL", "NRT", "MEX"),
            route("XX", "ZZZ", "TLV"),
        ],
    }
}

fn test_state() -> AppState {
    let catalog = Catalog::new(datasets(), Arc::new(PolicyTable::standard()));
    let issuer = CredentialIssuer::new(Ed25519KeyPair::from_seed(&[7u8; 32]), 3600).unwrap();
    AppState::new(catalog, issuer)
}

fn test_app() -> axum::Router {
    skyscope_api::app(test_state())
}

fn bearer(state: &AppState, tier: Tier) -> String {
    let issued = state.issuer.issue(tier, Utc::now()).unwrap().unwrap();
    format!("Bearer {}", issued.token)
}

async fn get(app: axum::Router, uri: &str, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// -- Tier resolution ----------------------------------------------------------

#[tokio::test]
async fn no_credential_sees_israel_only() {
    let (status, body) = get(test_app(), "/api/airlines/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["tier"], "free");
    assert_eq!(body["countries"], json!(["Israel"]));
    assert_eq!(body["metadata"]["count"], 1);
}

#[tokio::test]
async fn free_airlines_grouped_by_country() {
    let (status, body) = get(test_app(), "/api/airlines", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.keys().collect::<Vec<_>>(), ["Israel"]);
    assert_eq!(data["Israel"][0]["name"], "El Al Israel Airlines");
    assert_eq!(body["metadata"]["dataset"], "airlines");
    assert_eq!(body["metadata"]["totalCountries"], 1);
    assert_eq!(body["metadata"]["totalRecords"], 1);
}

#[tokio::test]
async fn pro_credential_widens_countries() {
    let state = test_state();
    let auth = bearer(&state, Tier::Pro);
    let (status, body) = get(skyscope_api::app(state), "/api/airlines/countries", Some(&auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "pro");
    assert_eq!(body["metadata"]["count"], 11);
    assert_eq!(body["countries"][0], "Israel");
}

#[tokio::test]
async fn elite_lists_every_resolved_country() {
    let state = test_state();
    let auth = bearer(&state, Tier::Elite);
    let (status, body) = get(skyscope_api::app(state), "/api/airlines/countries", Some(&auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["countries"],
        json!(["Germany", "Israel", "Mexico", "United States"])
    );
}

#[tokio::test]
async fn expired_credential_is_served_as_free() {
    let state = test_state();
    let issued = state
        .issuer
        .issue(Tier::Elite, Utc::now() - Duration::hours(3))
        .unwrap()
        .unwrap();
    let auth = format!("Bearer {}", issued.token);
    let (status, body) = get(skyscope_api::app(state), "/api/airlines/countries", Some(&auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "free");
}

#[tokio::test]
async fn garbage_credential_is_served_as_free() {
    let (status, body) = get(test_app(), "/api/airports/countries", Some("Bearer not-a-token")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "free");
}

// -- Country access -----------------------------------------------------------

#[tokio::test]
async fn pro_denied_mexico_with_reason() {
    let state = test_state();
    let auth = bearer(&state, Tier::Pro);
    let (status, body) = get(skyscope_api::app(state), "/api/airlines/country/Mexico", Some(&auth)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "ACCESS_DENIED");
    assert_eq!(
        body["error"]["message"],
        "Country 'Mexico' is not accessible with pro tier"
    );
}

#[tokio::test]
async fn elite_reads_mexico() {
    let state = test_state();
    let auth = bearer(&state, Tier::Elite);
    let (status, body) = get(skyscope_api::app(state), "/api/airlines/country/Mexico", Some(&auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["country"], "Mexico");
    assert_eq!(body["metadata"]["count"], 1);
    assert_eq!(body["data"][0]["name"], "Aeromexico");
}

#[tokio::test]
async fn country_match_is_case_sensitive() {
    let (status, _) = get(test_app(), "/api/airports/country/israel", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn accessible_country_without_records_is_empty() {
    let state = test_state();
    let auth = bearer(&state, Tier::Pro);
    let (status, body) = get(skyscope_api::app(state), "/api/airports/country/Greece", Some(&auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["metadata"]["count"], 0);
}

// -- Routes -------------------------------------------------------------------

#[tokio::test]
async fn free_routes_grouped_by_source_country() {
    let (status, body) = get(test_app(), "/api/routes", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_object().unwrap();
    // FRA-TLV and JFK-TLV are visible through their Israeli destination;
    // ZZZ-TLV has no resolvable source and is not grouped at all.
    assert_eq!(
        data.keys().collect::<Vec<_>>(),
        ["Germany", "Israel", "United States"]
    );
    assert_eq!(body["metadata"]["totalRecords"], 3);
    let ly = &data["Israel"][0];
    assert_eq!(ly["sourceAirport"], "TLV");
    assert_eq!(ly["sourceCountry"], "Israel");
    assert_eq!(ly["destinationCountry"], "United States");
}

#[tokio::test]
async fn routes_by_country_touch_either_end() {
    let (status, body) = get(test_app(), "/api/routes/country/Israel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["count"], 4);
}

#[tokio::test]
async fn free_denied_route_pair() {
    let (status, body) = get(test_app(), "/api/routes/between/Israel/United%20States", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"]["message"],
        "Access to routes between 'Israel' and 'United States' requires a higher subscription tier"
    );
}

#[tokio::test]
async fn pro_reads_route_pair_in_one_direction() {
    let state = test_state();
    let auth = bearer(&state, Tier::Pro);
    let (status, body) = get(
        skyscope_api::app(state),
        "/api/routes/between/Israel/United%20States",
        Some(&auth),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["sourceCountry"], "Israel");
    assert_eq!(body["metadata"]["destinationCountry"], "United States");
    assert_eq!(body["metadata"]["count"], 1);
    assert_eq!(body["data"][0]["airline"], "LY");
}

#[tokio::test]
async fn pro_denied_pair_when_one_side_outside_list() {
    let state = test_state();
    let auth = bearer(&state, Tier::Pro);
    let (status, _) = get(
        skyscope_api::app(state),
        "/api/routes/between/Mexico/United%20States",
        Some(&auth),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// -- Statistics ---------------------------------------------------------------

#[tokio::test]
async fn statistics_use_dataset_specific_keys() {
    let (status, body) = get(test_app(), "/api/routes/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["statistics"];
    assert_eq!(stats["totalRoutes"], 3);
    assert_eq!(stats["totalCountries"], 3);
    assert_eq!(
        stats["countriesWithData"],
        json!(["Germany", "Israel", "United States"])
    );
    assert_eq!(body["metadata"]["dataset"], "routes");

    let (_, body) = get(test_app(), "/api/airports/statistics", None).await;
    assert_eq!(body["statistics"]["totalAirports"], 1);
}

// -- Credentials --------------------------------------------------------------

#[tokio::test]
async fn issue_then_verify_round_trip() {
    let state = test_state();
    let (status, issued) = post_json(
        skyscope_api::app(state.clone()),
        "/api/auth/token",
        r#"{"tier":"ELITE"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(issued["tier"], "elite");
    let token = issued["token"].as_str().unwrap();
    assert!(token.starts_with("elite:"));

    let (status, verified) = post_json(
        skyscope_api::app(state.clone()),
        "/api/auth/verify",
        &json!({ "token": token }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["valid"], true);
    assert_eq!(verified["tier"], "elite");
    assert_eq!(verified["expiresAt"], issued["expiresAt"]);

    let auth = format!("Bearer {token}");
    let (_, body) = get(skyscope_api::app(state), "/api/airlines/country/Mexico", Some(&auth)).await;
    assert_eq!(body["tier"], "elite");
}

#[tokio::test]
async fn free_tier_gets_no_token() {
    let (status, body) = post_json(test_app(), "/api/auth/token", r#"{"tier":"free"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "free");
    assert!(body["token"].is_null());
    assert!(body["expiresAt"].is_null());
}

#[tokio::test]
async fn unknown_tier_string_is_bad_request() {
    let (status, body) = post_json(test_app(), "/api/auth/token", r#"{"tier":"platinum"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TIER");
}

#[tokio::test]
async fn empty_tier_is_validation_error() {
    let (status, body) = post_json(test_app(), "/api/auth/token", r#"{"tier":"  "}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = post_json(test_app(), "/api/auth/token", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn verify_reports_precise_failure() {
    let (status, body) = post_json(
        test_app(),
        "/api/auth/verify",
        r#"{"token":"pro:not-a-number:abcd"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
    assert_eq!(body["error"]["details"]["reason"], "MALFORMED");
}

#[tokio::test]
async fn verify_reports_expiry() {
    let state = test_state();
    let issued = state
        .issuer
        .issue(Tier::Pro, Utc::now() - Duration::hours(2))
        .unwrap()
        .unwrap();
    let (status, body) = post_json(
        skyscope_api::app(state),
        "/api/auth/verify",
        &json!({ "token": issued.token }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["details"]["reason"], "EXPIRED");
}

// -- Tier policies ------------------------------------------------------------

#[tokio::test]
async fn tiers_listing_shows_every_policy() {
    let (status, body) = get(test_app(), "/api/auth/tiers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "free");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["tier"], "free");
    assert_eq!(data[0]["countries"], json!(["Israel"]));
    assert_eq!(data[2]["tier"], "elite");
    assert_eq!(data[2]["unrestricted"], true);
    assert!(data[2].get("countries").is_none());
}

#[tokio::test]
async fn single_tier_lookup() {
    let (status, body) = get(test_app(), "/api/auth/tiers/pro", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tier"], "pro");
    assert_eq!(body["data"]["countries"].as_array().unwrap().len(), 11);

    let (status, body) = get(test_app(), "/api/auth/tiers/gold", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TIER");
}

#[tokio::test]
async fn missing_policy_is_hidden_internal_error() {
    let table = PolicyTable::from_entries([(Tier::Free, TierPolicy::countries(["Israel"]))]);
    let catalog = Catalog::new(datasets(), Arc::new(table));
    let state = AppState::new(
        catalog,
        CredentialIssuer::new(Ed25519KeyPair::from_seed(&[7u8; 32]), 3600).unwrap(),
    );
    let auth = bearer(&state, Tier::Pro);
    let (status, body) = get(skyscope_api::app(state), "/api/airlines", Some(&auth)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "An internal error occurred");
}

// -- Service endpoints --------------------------------------------------------

#[tokio::test]
async fn health_reports_dataset_sizes() {
    let (status, body) = get(test_app(), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "ok", "datasets": { "airlines": 5, "airports": 5, "routes": 6 } })
    );
}

#[tokio::test]
async fn welcome_lists_endpoints() {
    let (status, body) = get(test_app(), "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "GET /api/routes/between/{source}/{destination}"));
}

#[tokio::test]
async fn metrics_without_recorder_is_not_found() {
    let (status, _) = get(test_app(), "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_is_not_found_envelope() {
    let (status, body) = get(test_app(), "/api/flights", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn openapi_document_lists_paths() {
    let (status, body) = get(test_app(), "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/routes/between/{source}/{destination}"));
    assert!(paths.contains_key("/api/auth/token"));
    assert!(paths.contains_key("/health"));
}

// -- Bootstrap ----------------------------------------------------------------

#[tokio::test]
async fn bootstrap_loads_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("airlines.dat"),
        "596,\"El Al Israel Airlines\",\\N,\"LY\",\"ELY\",\"ELAL\",\"Israel\",\"Y\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("airports.dat"),
        "1590,\"Ben Gurion\",\"Tel-aviv\",\"Israel\",\"TLV\",\"LLBG\",32.01,34.88,135,2,\"E\",\"Asia/Jerusalem\"\n",
    )
    .unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let state = AppState::bootstrap(&config).unwrap();
    let (status, body) = get(skyscope_api::app(state), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["datasets"],
        json!({ "airlines": 1, "airports": 1, "routes": 0 })
    );
}
