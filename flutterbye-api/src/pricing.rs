use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Timelike;
use flutterbye_catalog::{
    decimal_from_f64, CatalogError, DemandLevel, PricingError, PricingField, PricingRequest, PricingResult,
    Violation,
};
use flutterbye_store::{PerformanceSample, ProductPerformance, TrackError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Wire form of a pricing request. Fields stay untyped JSON so that a
/// missing or mistyped value is reported as invalid input on that field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub product_type: Option<Value>,
    /// Overrides the catalog price for `product_type`
    #[serde(alias = "currentPrice")]
    pub product_base_price: Option<Value>,
    pub demand_level: Option<Value>,
    pub hour_of_day: Option<Value>,
    pub user_value_score: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct BatchEstimateRequest {
    pub requests: Vec<EstimateRequest>,
}

#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PricingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEstimateResponse {
    pub results: Vec<BatchItem>,
    pub total_recommendations: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub product_type: String,
    pub price: f64,
    #[serde(default, alias = "conversion")]
    pub converted: bool,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub message: String,
    pub performance: ProductPerformance,
}

fn wrong_type(field: PricingField, expected: &'static str) -> PricingError {
    PricingError::InvalidInput { field, violation: Violation::WrongType { expected } }
}

fn text_field(field: PricingField, value: &Value) -> Result<&str, PricingError> {
    value.as_str().ok_or_else(|| wrong_type(field, "a string"))
}

fn decimal_field(field: PricingField, value: &Value) -> Result<Decimal, PricingError> {
    let number = value.as_f64().ok_or_else(|| wrong_type(field, "a number"))?;
    decimal_from_f64(field, number)
}

fn hour_field(value: &Value) -> Result<u32, PricingError> {
    let hour = value
        .as_i64()
        .ok_or_else(|| wrong_type(PricingField::HourOfDay, "a whole number"))?;
    u32::try_from(hour).map_err(|_| PricingError::InvalidInput {
        field: PricingField::HourOfDay,
        violation: Violation::OutOfRange { min: "0".into(), max: "23".into() },
    })
}

impl EstimateRequest {
    /// Resolve wire fields into a typed request. `current_hour` fills in a
    /// missing `hourOfDay`.
    pub fn resolve(&self, state: &AppState, current_hour: u32) -> Result<PricingRequest, AppError> {
        let product_base_price = match (&self.product_base_price, &self.product_type) {
            (Some(price), _) => decimal_field(PricingField::ProductBasePrice, price)?,
            (None, Some(product)) => {
                state.catalog.base_price(text_field(PricingField::ProductType, product)?)?
            }
            (None, None) => return Err(PricingError::missing(PricingField::ProductType).into()),
        };

        let demand_level = match &self.demand_level {
            Some(level) => DemandLevel::from_str(text_field(PricingField::DemandLevel, level)?)?,
            None => DemandLevel::default(),
        };

        let hour_of_day = match &self.hour_of_day {
            Some(hour) => hour_field(hour)?,
            None => current_hour,
        };

        let user_value_score = match &self.user_value_score {
            Some(score) => decimal_field(PricingField::UserValueScore, score)?,
            None => return Err(PricingError::missing(PricingField::UserValueScore).into()),
        };

        Ok(PricingRequest {
            product_base_price,
            demand_level,
            hour_of_day,
            user_value_score,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pricing/estimate", post(estimate))
        .route("/pricing/batch", post(estimate_batch))
        .route("/pricing/track", post(track))
        .route("/pricing/performance", get(list_performance))
        .route("/pricing/performance/{product_type}", get(get_performance))
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

fn price(state: &AppState, req: &EstimateRequest, current_hour: u32) -> Result<PricingResult, AppError> {
    let outcome = req.resolve(state, current_hour).and_then(|request| {
        let result = if state.estimator.config().confidence_jitter {
            state.estimator.estimate_with_rng(&request, &mut rand::thread_rng())
        } else {
            state.estimator.estimate(&request)
        };
        result.map_err(AppError::from)
    });

    state.metrics.record_estimate(outcome.is_ok());
    outcome
}

/// POST /pricing/estimate
pub async fn estimate(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<EstimateRequest>, AppError>,
) -> Result<Json<PricingResult>, AppError> {
    let result = price(&state, &req, local_hour())?;

    tracing::info!(
        "Priced {} at {} ({}x)",
        req.product_type.as_ref().and_then(serde_json::Value::as_str).unwrap_or("custom"),
        result.suggested_price,
        result.price_multiplier
    );

    Ok(Json(result))
}

/// POST /pricing/batch
/// Invalid items are reported in place; the rest are still priced.
pub async fn estimate_batch(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<BatchEstimateRequest>, AppError>,
) -> Json<BatchEstimateResponse> {
    let hour = local_hour();

    let results: Vec<BatchItem> = req
        .requests
        .iter()
        .enumerate()
        .map(|(index, item)| match price(&state, item, hour) {
            Ok(result) => BatchItem { index, result: Some(result), error: None },
            Err(err) => BatchItem { index, result: None, error: Some(err.body()) },
        })
        .collect();

    let total_recommendations = results.iter().filter(|r| r.result.is_some()).count();
    tracing::info!("Batch priced {}/{} requests", total_recommendations, results.len());

    Json(BatchEstimateResponse { results, total_recommendations })
}

/// POST /pricing/track
pub async fn track(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<TrackRequest>, AppError>,
) -> Result<Json<TrackResponse>, AppError> {
    // Only catalog products are tallied
    if state.catalog.get(&req.product_type).is_none() {
        return Err(CatalogError::UnknownProduct(req.product_type).into());
    }

    let price = if req.price.is_finite() {
        Decimal::from_str(&req.price.to_string()).map_err(|_| TrackError::InvalidPrice)?
    } else {
        return Err(TrackError::InvalidPrice.into());
    };

    let performance = state
        .tracker
        .record(PerformanceSample {
            product_type: req.product_type,
            price,
            converted: req.converted,
        })
        .await?;
    state.metrics.tracked.inc();

    Ok(Json(TrackResponse {
        success: true,
        message: "Pricing performance tracked".to_string(),
        performance,
    }))
}

/// GET /pricing/performance
pub async fn list_performance(State(state): State<AppState>) -> Json<Vec<ProductPerformance>> {
    Json(state.tracker.summaries().await)
}

/// GET /pricing/performance/{product_type}
pub async fn get_performance(
    State(state): State<AppState>,
    Path(product_type): Path<String>,
) -> Result<Json<ProductPerformance>, AppError> {
    state
        .tracker
        .summary(&product_type)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No pricing performance tracked for {}", product_type)))
}
