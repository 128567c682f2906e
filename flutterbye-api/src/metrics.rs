use axum::{extract::State, routing::get, Router};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::{error::AppError, state::AppState};

/// Service counters, kept in a per-state registry
pub struct Metrics {
    registry: Registry,
    pub estimates: IntCounterVec,
    pub tracked: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let estimates = IntCounterVec::new(
            Opts::new("flutterbye_pricing_estimates_total", "Price estimates by outcome"),
            &["outcome"],
        )?;
        let tracked = IntCounter::new(
            "flutterbye_pricing_tracked_total",
            "Pricing outcomes recorded by the performance tracker",
        )?;

        registry.register(Box::new(estimates.clone()))?;
        registry.register(Box::new(tracked.clone()))?;

        Ok(Self { registry, estimates, tracked })
    }

    pub fn record_estimate(&self, ok: bool) {
        let outcome = if ok { "ok" } else { "invalid" };
        self.estimates.with_label_values(&[outcome]).inc();
    }

    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(render_metrics))
}

async fn render_metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state.metrics.render().map_err(|e| AppError::Internal(e.into()))
}
