pub mod product;
pub mod pricing;

pub use product::{BillingCycle, CatalogError, Product, ProductCatalog};
pub use pricing::{
    DemandLevel, PricingBreakdown, PricingConfig, PricingError, PricingEstimator, PricingField,
    PricingRequest, PricingResult, RevenueImpact, TimeWindow, Violation,
    decimal_from_f64, round_price, MAX_BASE_PRICE, MIN_BASE_PRICE,
};
