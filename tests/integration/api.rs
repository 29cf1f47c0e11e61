//! Dashboard router exercised end to end.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use solarmine::catalog::MinerCatalog;
use solarmine::config::AppConfig;
use solarmine::dashboard::{build_router, DashboardState};
use solarmine::types::MinerModel;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_configured_defaults_drive_empty_request() {
    let cfg = AppConfig::parse(
        r#"
        [defaults]
        miner_model = "Whatsminer M60S"
        miner_qty = 2
        "#,
    )
    .unwrap();
    assert_eq!(cfg.defaults.miner_model, MinerModel::WhatsminerM60S);

    let app = build_router(Arc::new(DashboardState::new(
        MinerCatalog::standard(),
        cfg.defaults,
    )));
    let (status, json) = get(app, "/api/calculate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["total_hashrate_th"].as_f64().unwrap(), 372.0);
    assert_eq!(json["inputs"]["miner_model"], "Whatsminer M60S");
}

#[tokio::test]
async fn test_slug_model_and_overrides() {
    let app = build_router(Arc::new(DashboardState::new(
        MinerCatalog::standard(),
        Default::default(),
    )));
    let (status, json) = get(
        app,
        "/api/calculate?miner_model=whatsminer-m60s&miner_qty=1&grid_cost_per_kwh=0&solar_size_kw=42",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["daily_cost"].as_f64().unwrap(), 0.0);
    assert_eq!(json["summary"][4]["value"], "42.00 kWp");
}

#[tokio::test]
async fn test_zero_quantity_rejected() {
    let app = build_router(Arc::new(DashboardState::new(
        MinerCatalog::standard(),
        Default::default(),
    )));
    let (status, json) = get(app, "/api/calculate?miner_qty=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "miner_qty");
}

#[tokio::test]
async fn test_undecodable_query_gets_json_error() {
    for uri in [
        "/api/calculate?grid_cost_per_kwh=abc",
        "/api/calculate?miner_qty=1.5",
    ] {
        let app = build_router(Arc::new(DashboardState::new(
            MinerCatalog::standard(),
            Default::default(),
        )));
        let (status, json) = get(app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["field"], "query", "{uri}");
        assert!(json["error"].as_str().unwrap().starts_with("Malformed input"), "{uri}");
    }
}
