use std::sync::Arc;
use flutterbye_catalog::{PricingEstimator, ProductCatalog};
use flutterbye_store::{Config, PerformanceTracker};

use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<PricingEstimator>,
    pub catalog: Arc<ProductCatalog>,
    pub tracker: Arc<PerformanceTracker>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(estimator: PricingEstimator, catalog: ProductCatalog) -> Result<Self, prometheus::Error> {
        Ok(Self {
            estimator: Arc::new(estimator),
            catalog: Arc::new(catalog),
            tracker: Arc::new(PerformanceTracker::new()),
            metrics: Arc::new(Metrics::new()?),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = config.catalog.build_catalog()?;
        let estimator = PricingEstimator::new(config.pricing.clone());
        Ok(Self::new(estimator, catalog)?)
    }
}
