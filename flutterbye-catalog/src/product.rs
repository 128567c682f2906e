use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillingCycle {
    Monthly,
    OneTime,
}

/// Sellable add-on in the Flutterbye catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(default = "default_billing_cycle")]
    pub billing_cycle: BillingCycle,
}

fn default_billing_cycle() -> BillingCycle { BillingCycle::OneTime }

impl Product {
    pub fn new(id: &str, name: &str, category: &str, base_price: Decimal) -> Self {
        let billing_cycle = if category == "subscription" {
            BillingCycle::Monthly
        } else {
            BillingCycle::OneTime
        };

        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            base_price,
            billing_cycle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown product type: {0}")]
    UnknownProduct(String),
}

/// Static product type -> base price lookup
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: HashMap<String, Product>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::from_products(vec![
            Product::new("token_creation", "Advanced Token Creation", "feature", dec!(9.99)),
            Product::new("premium_features", "FLBY Premium Subscription", "subscription", dec!(29.99)),
            Product::new("ai_enhancement", "AI Content Enhancement", "ai-service", dec!(19.99)),
            Product::new("marketplace_access", "Premium Marketplace Access", "access", dec!(14.99)),
            Product::new("bulk_tokens", "Bulk Token Creation Package", "package", dec!(49.99)),
            Product::new("enterprise_suite", "Enterprise Suite", "enterprise", dec!(199.99)),
        ])
    }
}

impl ProductCatalog {
    /// Later entries replace earlier ones with the same id
    pub fn from_products(products: Vec<Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self { products }
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn base_price(&self, id: &str) -> Result<Decimal, CatalogError> {
        self.get(id)
            .map(|p| p.base_price)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))
    }

    pub fn list(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
