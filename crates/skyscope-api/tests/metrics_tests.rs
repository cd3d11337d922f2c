//! # Metrics Exposition
//!
//! Runs in its own test binary: the Prometheus recorder is process-global,
//! so counts asserted here only see the requests made here.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

use skyscope_api::state::AppState;
use skyscope_core::{AirlineRecord, Tier};
use skyscope_credential::CredentialIssuer;
use skyscope_crypto::Ed25519KeyPair;
use skyscope_dataset::{Catalog, Datasets};
use skyscope_policy::PolicyTable;

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

async fn call(app: &axum::Router, uri: &str, authorization: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn requests_and_denials_are_counted_by_tier() {
    let handle = PrometheusBuilder::new().install_recorder().unwrap();

    let datasets = Datasets {
        airlines: vec![
            airline(596, "El Al Israel Airlines", "Israel"),
            airline(321, "Aeromexico", "Mexico"),
        ],
        ..Datasets::default()
    };
    let catalog = Catalog::new(datasets, Arc::new(PolicyTable::standard()));
    let issuer = CredentialIssuer::new(Ed25519KeyPair::from_seed(&[11u8; 32]), 3600).unwrap();
    let state = AppState::new(catalog, issuer).with_metrics(handle);
    let pro = state.issuer.issue(Tier::Pro, Utc::now()).unwrap().unwrap();
    let auth = format!("Bearer {}", pro.token);
    let app = skyscope_api::app(state);

    let (status, _) = call(&app, "/api/airlines/country/Mexico", Some(&auth)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, "/api/airlines/countries", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, exposition) = call(&app, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);

    assert!(
        exposition.contains(r#"skyscope_access_denied_total{tier="pro"} 1"#),
        "{exposition}"
    );
    assert!(!exposition.contains(r#"skyscope_access_denied_total{tier="free"}"#));

    let request_line = |tier: &str, status: &str| {
        exposition.lines().any(|line| {
            line.starts_with("skyscope_http_requests_total{")
                && line.contains(&format!(r#"tier="{tier}""#))
                && line.contains(&format!(r#"status="{status}""#))
                && line.ends_with(" 1")
        })
    };
    assert!(request_line("pro", "403"), "{exposition}");
    assert!(request_line("free", "200"), "{exposition}");
}
