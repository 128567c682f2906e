use flutterbye_catalog::{PricingConfig, Product, ProductCatalog, MAX_BASE_PRICE, MIN_BASE_PRICE};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Catalog overrides. An empty product list keeps the built-in catalog.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub base_price: f64,
}

impl CatalogConfig {
    pub fn build_catalog(&self) -> Result<ProductCatalog, config::ConfigError> {
        if self.products.is_empty() {
            return Ok(ProductCatalog::default());
        }

        let products = self
            .products
            .iter()
            .map(|entry| {
                let price = Decimal::from_str(&entry.base_price.to_string())
                    .ok()
                    .filter(|p| (MIN_BASE_PRICE..=MAX_BASE_PRICE).contains(p))
                    .ok_or_else(|| {
                        config::ConfigError::Message(format!(
                            "catalog product '{}' needs a base_price between {} and {}",
                            entry.id, MIN_BASE_PRICE, MAX_BASE_PRICE
                        ))
                    })?;
                Ok(Product::new(&entry.id, &entry.name, &entry.category, price))
            })
            .collect::<Result<Vec<_>, config::ConfigError>>()?;

        Ok(ProductCatalog::from_products(products))
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FLUTTERBYE__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("FLUTTERBYE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
