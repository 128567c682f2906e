use chrono::{DateTime, Utc};
use flutterbye_catalog::MAX_BASE_PRICE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    #[error("price must be greater than 0")]
    InvalidPrice,
    #[error("price must not exceed {}", MAX_BASE_PRICE)]
    PriceTooHigh,
    #[error("price total for {0} can no longer be tracked")]
    TallyOverflow(String),
    #[error("productType is required")]
    MissingProduct,
}

/// Observed outcome of showing a price to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub product_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub converted: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_type: String,
    pub observations: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub last_price: Decimal,
    pub last_recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Tally {
    observations: u64,
    conversions: u64,
    price_sum: Decimal,
    last_price: Decimal,
    last_recorded_at: DateTime<Utc>,
}

impl Tally {
    fn summarize(&self, product_type: &str) -> ProductPerformance {
        let conversion_rate = if self.observations == 0 {
            0.0
        } else {
            self.conversions as f64 / self.observations as f64
        };
        let average_price = if self.observations == 0 {
            Decimal::ZERO
        } else {
            (self.price_sum / Decimal::from(self.observations)).round_dp(2)
        };

        ProductPerformance {
            product_type: product_type.to_string(),
            observations: self.observations,
            conversions: self.conversions,
            conversion_rate,
            average_price,
            last_price: self.last_price,
            last_recorded_at: self.last_recorded_at,
        }
    }
}

/// In-memory price/conversion tally per product
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    tallies: RwLock<HashMap<String, Tally>>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, sample: PerformanceSample) -> Result<ProductPerformance, TrackError> {
        if sample.product_type.trim().is_empty() {
            return Err(TrackError::MissingProduct);
        }
        if sample.price <= Decimal::ZERO {
            return Err(TrackError::InvalidPrice);
        }
        if sample.price > MAX_BASE_PRICE {
            return Err(TrackError::PriceTooHigh);
        }

        let now = Utc::now();
        let mut tallies = self.tallies.write().await;
        let tally = tallies
            .entry(sample.product_type.clone())
            .or_insert_with(|| Tally {
                observations: 0,
                conversions: 0,
                price_sum: Decimal::ZERO,
                last_price: sample.price,
                last_recorded_at: now,
            });

        let price_sum = tally
            .price_sum
            .checked_add(sample.price)
            .ok_or_else(|| TrackError::TallyOverflow(sample.product_type.clone()))?;

        tally.observations += 1;
        if sample.converted {
            tally.conversions += 1;
        }
        tally.price_sum = price_sum;
        tally.last_price = sample.price;
        tally.last_recorded_at = now;

        info!(
            "Tracked pricing outcome for {}: price={} converted={}",
            sample.product_type, sample.price, sample.converted
        );

        Ok(tally.summarize(&sample.product_type))
    }

    pub async fn summary(&self, product_type: &str) -> Option<ProductPerformance> {
        let tallies = self.tallies.read().await;
        tallies.get(product_type).map(|t| t.summarize(product_type))
    }

    pub async fn summaries(&self) -> Vec<ProductPerformance> {
        let tallies = self.tallies.read().await;
        let mut out: Vec<ProductPerformance> = tallies
            .iter()
            .map(|(product, tally)| tally.summarize(product))
            .collect();
        out.sort_by(|a, b| a.product_type.cmp(&b.product_type));
        out
    }
}
