//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`
//! and is read-only: every request evaluates from scratch.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::catalog::{CatalogEntry, MinerCatalog};
use crate::engine::{self, Report};
use crate::error::InputError;
use crate::types::{MinerModel, SiteInputs};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub catalog: MinerCatalog,
    /// Values used for any input a request leaves out.
    pub defaults: SiteInputs,
}

impl DashboardState {
    pub fn new(catalog: MinerCatalog, defaults: SiteInputs) -> Self {
        Self { catalog, defaults }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string for `/api/calculate`. Missing fields take the configured default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateQuery {
    pub solar_size_kw: Option<f64>,
    pub miner_model: Option<String>,
    pub miner_qty: Option<i64>,
    pub grid_cost_per_kwh: Option<f64>,
    pub btc_price_usd: Option<f64>,
    pub hashprice_per_th_per_day: Option<f64>,
}

impl CalculateQuery {
    /// Merge with `defaults`, resolving the model name against the catalog.
    pub fn resolve(&self, defaults: &SiteInputs) -> Result<SiteInputs, InputError> {
        let miner_model = match &self.miner_model {
            Some(name) => name.parse::<MinerModel>()?,
            None => defaults.miner_model,
        };
        let miner_qty = match self.miner_qty {
            Some(q) => u32::try_from(q).map_err(|_| InputError::InvalidQuantity(q))?,
            None => defaults.miner_qty,
        };

        Ok(SiteInputs {
            solar_size_kw: self.solar_size_kw.unwrap_or(defaults.solar_size_kw),
            miner_model,
            miner_qty,
            grid_cost_per_kwh: self.grid_cost_per_kwh.unwrap_or(defaults.grid_cost_per_kwh),
            btc_price_usd: self.btc_price_usd.unwrap_or(defaults.btc_price_usd),
            hashprice_per_th_per_day: self
                .hashprice_per_th_per_day
                .unwrap_or(defaults.hashprice_per_th_per_day),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub report: Report,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub field: &'static str,
}

/// A rejected request, rendered as `400 {"error": ..., "field": ...}`.
#[derive(Debug)]
pub struct ApiError(pub InputError);

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.0.to_string(),
            field: self.0.field(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/calculate
///
/// Undecodable query strings (`miner_qty=1.5`, `grid_cost_per_kwh=abc`)
/// are reported through the same JSON error body as range violations.
pub async fn get_calculate(
    State(state): State<AppState>,
    query: Result<Query<CalculateQuery>, QueryRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let report = query
        .map_err(|rejection| InputError::Malformed(rejection.body_text()))
        .and_then(|Query(query)| query.resolve(&state.defaults))
        .and_then(|inputs| engine::evaluate(&state.catalog, &inputs))
        .map_err(|e| {
            warn!(error = %e, field = e.field(), "Rejected calculation request");
            ApiError(e)
        })?;

    Ok(Json(CalculateResponse {
        report,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /api/miners
pub async fn get_miners(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.catalog.entries())
}

/// GET /api/defaults
pub async fn get_defaults(State(state): State<AppState>) -> Json<SiteInputs> {
    Json(state.defaults.clone())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        Arc::new(DashboardState::new(MinerCatalog::standard(), SiteInputs::default()))
    }

    #[test]
    fn test_empty_query_resolves_to_defaults() {
        let inputs = CalculateQuery::default().resolve(&SiteInputs::default()).unwrap();
        assert_eq!(inputs, SiteInputs::default());
    }

    #[test]
    fn test_query_overrides_defaults() {
        let query = CalculateQuery {
            miner_model: Some("Whatsminer M60S".into()),
            miner_qty: Some(2),
            grid_cost_per_kwh: Some(0.05),
            ..Default::default()
        };
        let inputs = query.resolve(&SiteInputs::default()).unwrap();
        assert_eq!(inputs.miner_model, MinerModel::WhatsminerM60S);
        assert_eq!(inputs.miner_qty, 2);
        assert_eq!(inputs.grid_cost_per_kwh, 0.05);
        assert_eq!(inputs.hashprice_per_th_per_day, 0.08);
    }

    #[test]
    fn test_query_unknown_model() {
        let query = CalculateQuery {
            miner_model: Some("S9".into()),
            ..Default::default()
        };
        assert_eq!(
            query.resolve(&SiteInputs::default()),
            Err(InputError::UnknownModel("S9".into()))
        );
    }

    #[test]
    fn test_query_negative_quantity() {
        let query = CalculateQuery {
            miner_qty: Some(-3),
            ..Default::default()
        };
        assert_eq!(
            query.resolve(&SiteInputs::default()),
            Err(InputError::InvalidQuantity(-3))
        );
    }

    #[test]
    fn test_error_response_serializes() {
        let resp = ErrorResponse {
            error: "Unknown miner model: S9".into(),
            field: "miner_model",
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("miner_model"));
        assert!(json.contains("S9"));
    }

    #[tokio::test]
    async fn test_get_calculate_handler() {
        let Json(resp) = get_calculate(State(test_state()), Ok(Query(CalculateQuery::default())))
            .await
            .unwrap();
        assert!((resp.report.result.daily_revenue - 16.0).abs() < 1e-9);
        assert!(resp.report.profitable);
        assert!(!resp.generated_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_calculate_rejects_zero_quantity() {
        let query = CalculateQuery {
            miner_qty: Some(0),
            ..Default::default()
        };
        let err = get_calculate(State(test_state()), Ok(Query(query))).await.unwrap_err();
        assert_eq!(err.0, InputError::InvalidQuantity(0));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_miners_handler() {
        let Json(miners) = get_miners(State(test_state())).await;
        assert_eq!(miners.len(), 2);
        assert_eq!(miners[1].model, MinerModel::WhatsminerM60S);
    }

    #[tokio::test]
    async fn test_get_defaults_handler() {
        let Json(defaults) = get_defaults(State(test_state())).await;
        assert_eq!(defaults.miner_qty, 1);
    }
}
