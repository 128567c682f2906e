use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const PEAK_EVENING_HOURS: std::ops::RangeInclusive<u32> = 18..=22;
const BUSINESS_HOURS: std::ops::RangeInclusive<u32> = 9..=17;

const USER_MULTIPLIER_FLOOR: Decimal = dec!(0.8);
const USER_MULTIPLIER_SPAN: Decimal = dec!(0.4);

/// Smallest base price whose lowest adjustment still rounds to a whole cent
pub const MIN_BASE_PRICE: Decimal = dec!(0.01);
pub const MAX_BASE_PRICE: Decimal = dec!(1000000000);

const HIGH_UPLIFT_THRESHOLD: Decimal = dec!(1.20);
const MODERATE_UPLIFT_THRESHOLD: Decimal = dec!(1.05);

/// Coarse market demand bucket
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl DemandLevel {
    pub fn multiplier(self) -> Decimal {
        match self {
            DemandLevel::Low => dec!(0.90),
            DemandLevel::Medium => dec!(1.10),
            DemandLevel::High => dec!(1.30),
        }
    }

    /// Higher demand tolerates higher prices at a lower conversion rate
    pub fn expected_conversion_rate(self) -> f64 {
        match self {
            DemandLevel::Low => 0.18,
            DemandLevel::Medium => 0.15,
            DemandLevel::High => 0.12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DemandLevel::Low => "low",
            DemandLevel::Medium => "medium",
            DemandLevel::High => "high",
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemandLevel {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(DemandLevel::Low),
            "medium" => Ok(DemandLevel::Medium),
            "high" => Ok(DemandLevel::High),
            _ => Err(PricingError::InvalidInput {
                field: PricingField::DemandLevel,
                violation: Violation::Unrecognized {
                    value: s.to_string(),
                    expected: "low, medium, high",
                },
            }),
        }
    }
}

/// Hour-of-day bracket used for the time multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TimeWindow {
    PeakEvening,
    BusinessHours,
    OffPeak,
}

impl TimeWindow {
    /// Peak evening is matched before business hours so that widened
    /// brackets keep their precedence.
    pub fn classify(hour: u32) -> Self {
        if PEAK_EVENING_HOURS.contains(&hour) {
            TimeWindow::PeakEvening
        } else if BUSINESS_HOURS.contains(&hour) {
            TimeWindow::BusinessHours
        } else {
            TimeWindow::OffPeak
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            TimeWindow::PeakEvening => dec!(1.20),
            TimeWindow::BusinessHours => dec!(1.10),
            TimeWindow::OffPeak => dec!(1.00),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::PeakEvening => "peak evening",
            TimeWindow::BusinessHours => "business hours",
            TimeWindow::OffPeak => "off-peak",
        }
    }
}

/// Qualitative bucket for how much a multiplier lifts the price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RevenueImpact {
    #[serde(rename = "high uplift")]
    HighUplift,
    #[serde(rename = "moderate uplift")]
    ModerateUplift,
    #[serde(rename = "cost-optimized")]
    CostOptimized,
}

impl RevenueImpact {
    pub fn from_multiplier(multiplier: Decimal) -> Self {
        if multiplier > HIGH_UPLIFT_THRESHOLD {
            RevenueImpact::HighUplift
        } else if multiplier > MODERATE_UPLIFT_THRESHOLD {
            RevenueImpact::ModerateUplift
        } else {
            RevenueImpact::CostOptimized
        }
    }
}

/// Input fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingField {
    ProductType,
    ProductBasePrice,
    DemandLevel,
    HourOfDay,
    UserValueScore,
}

impl PricingField {
    /// Wire name of the field
    pub fn as_str(self) -> &'static str {
        match self {
            PricingField::ProductType => "productType",
            PricingField::ProductBasePrice => "productBasePrice",
            PricingField::DemandLevel => "demandLevel",
            PricingField::HourOfDay => "hourOfDay",
            PricingField::UserValueScore => "userValueScore",
        }
    }
}

impl fmt::Display for PricingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing,
    NotANumber,
    NotPositive,
    WrongType { expected: &'static str },
    OutOfRange { min: String, max: String },
    Unrecognized { value: String, expected: &'static str },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing => write!(f, "is required"),
            Violation::NotANumber => write!(f, "must be a finite decimal number"),
            Violation::NotPositive => write!(f, "must be greater than 0"),
            Violation::WrongType { expected } => write!(f, "must be {}", expected),
            Violation::OutOfRange { min, max } => write!(f, "must be between {} and {}", min, max),
            Violation::Unrecognized { value, expected } => {
                write!(f, "'{}' is not one of {}", value, expected)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("{field} {violation}")]
    InvalidInput { field: PricingField, violation: Violation },
}

impl PricingError {
    pub fn missing(field: PricingField) -> Self {
        PricingError::InvalidInput { field, violation: Violation::Missing }
    }

    pub fn field(&self) -> PricingField {
        match self {
            PricingError::InvalidInput { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub product_base_price: Decimal,
    pub demand_level: DemandLevel,
    pub hour_of_day: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub user_value_score: Decimal,
}

/// Individual factors behind a price multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub demand_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub time_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub user_multiplier: Decimal,
    pub time_window: TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub suggested_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_multiplier: Decimal,
    pub reasoning: String,
    /// Presentation heuristic, not a calibrated probability
    pub confidence: f64,
    pub expected_conversion_rate: f64,
    #[serde(rename = "revenueImpactLabel")]
    pub revenue_impact: RevenueImpact,
    pub breakdown: PricingBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Add a random offset to the reported confidence
    #[serde(default)]
    pub confidence_jitter: bool,

    #[serde(default = "default_base_confidence")]
    pub base_confidence: f64,

    /// Upper bound (exclusive) of the confidence offset
    #[serde(default = "default_max_jitter")]
    pub max_jitter: f64,
}

fn default_base_confidence() -> f64 { 0.85 }
fn default_max_jitter() -> f64 { 0.10 }

impl PricingConfig {
    pub fn clamped(self) -> Self {
        let clamp_unit = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            confidence_jitter: self.confidence_jitter,
            base_confidence: clamp_unit(self.base_confidence),
            max_jitter: clamp_unit(self.max_jitter),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            confidence_jitter: false,
            base_confidence: default_base_confidence(),
            max_jitter: default_max_jitter(),
        }
    }
}

/// Dynamic pricing estimator.
///
/// Combines three independent multipliers (demand, time of day, user value)
/// into a single price adjustment. Estimation is pure; the only optional
/// nondeterminism is the confidence jitter, which draws from a caller-supplied
/// random source.
#[derive(Debug, Clone, Default)]
pub struct PricingEstimator {
    config: PricingConfig,
}

impl PricingEstimator {
    /// Out-of-range confidence settings are clamped into [0, 1]
    pub fn new(config: PricingConfig) -> Self {
        Self { config: config.clamped() }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Estimate with the fixed base confidence
    pub fn estimate(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        validate(request)?;
        self.compute(request, self.config.base_confidence)
    }

    /// Estimate with `base_confidence + U[0, max_jitter)` drawn from `rng`
    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &PricingRequest,
        rng: &mut R,
    ) -> Result<PricingResult, PricingError> {
        validate(request)?;
        let jitter = if self.config.max_jitter > 0.0 {
            rng.gen_range(0.0..self.config.max_jitter)
        } else {
            0.0
        };
        self.compute(request, (self.config.base_confidence + jitter).min(1.0))
    }

    /// Expects a request that already passed `validate`
    fn compute(&self, request: &PricingRequest, confidence: f64) -> Result<PricingResult, PricingError> {
        let demand_multiplier = request.demand_level.multiplier();
        let time_window = TimeWindow::classify(request.hour_of_day);
        let time_multiplier = time_window.multiplier();
        let user_multiplier = USER_MULTIPLIER_FLOOR + request.user_value_score * USER_MULTIPLIER_SPAN;

        let price_multiplier = demand_multiplier
            .checked_mul(time_multiplier)
            .and_then(|m| m.checked_mul(user_multiplier))
            .ok_or_else(base_price_out_of_range)?
            .normalize();
        let suggested_price = request
            .product_base_price
            .checked_mul(price_multiplier)
            .map(round_price)
            .ok_or_else(base_price_out_of_range)?;

        let score_pct = (request.user_value_score * dec!(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize();

        let reasoning = format!(
            "{} demand during {} with a {}% user value score gives a {}x price multiplier",
            capitalize(request.demand_level.as_str()),
            time_window.label(),
            score_pct,
            price_multiplier.round_dp(3).normalize(),
        );

        tracing::debug!(
            demand = %request.demand_level,
            hour = request.hour_of_day,
            multiplier = %price_multiplier,
            price = %suggested_price,
            "Estimated dynamic price"
        );

        Ok(PricingResult {
            suggested_price,
            price_multiplier,
            reasoning,
            confidence,
            expected_conversion_rate: request.demand_level.expected_conversion_rate(),
            revenue_impact: RevenueImpact::from_multiplier(price_multiplier),
            breakdown: PricingBreakdown {
                demand_multiplier,
                time_multiplier,
                user_multiplier: user_multiplier.normalize(),
                time_window,
            },
        })
    }
}

/// Round half-up to whole cents
pub fn round_price(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a wire float into an exact decimal using its shortest decimal form
pub fn decimal_from_f64(field: PricingField, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::InvalidInput { field, violation: Violation::NotANumber });
    }
    Decimal::from_str(&value.to_string())
        .map_err(|_| PricingError::InvalidInput { field, violation: Violation::NotANumber })
}

fn base_price_out_of_range() -> PricingError {
    PricingError::InvalidInput {
        field: PricingField::ProductBasePrice,
        violation: Violation::OutOfRange {
            min: MIN_BASE_PRICE.to_string(),
            max: MAX_BASE_PRICE.to_string(),
        },
    }
}

fn validate(request: &PricingRequest) -> Result<(), PricingError> {
    if request.product_base_price <= Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: PricingField::ProductBasePrice,
            violation: Violation::NotPositive,
        });
    }
    if request.product_base_price < MIN_BASE_PRICE || request.product_base_price > MAX_BASE_PRICE {
        return Err(base_price_out_of_range());
    }
    if request.hour_of_day > 23 {
        return Err(PricingError::InvalidInput {
            field: PricingField::HourOfDay,
            violation: Violation::OutOfRange { min: "0".into(), max: "23".into() },
        });
    }
    if request.user_value_score < Decimal::ZERO || request.user_value_score > Decimal::ONE {
        return Err(PricingError::InvalidInput {
            field: PricingField::UserValueScore,
            violation: Violation::OutOfRange { min: "0".into(), max: "1".into() },
        });
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(base: Decimal, demand: DemandLevel, hour: u32, score: Decimal) -> PricingRequest {
        PricingRequest {
            product_base_price: base,
            demand_level: demand,
            hour_of_day: hour,
            user_value_score: score,
        }
    }

    #[test]
    fn test_high_demand_peak_loyal_user() {
        let engine = PricingEstimator::default();
        let result = engine
            .estimate(&request(dec!(10.00), DemandLevel::High, 20, dec!(1.0)))
            .unwrap();

        assert_eq!(result.breakdown.demand_multiplier, dec!(1.30));
        assert_eq!(result.breakdown.time_multiplier, dec!(1.20));
        assert_eq!(result.breakdown.user_multiplier, dec!(1.2));
        assert_eq!(result.price_multiplier, dec!(1.872));
        assert_eq!(result.suggested_price, dec!(18.72));
        assert_eq!(result.revenue_impact, RevenueImpact::HighUplift);
        assert_eq!(result.expected_conversion_rate, 0.12);
    }

    #[test]
    fn test_low_demand_off_peak_new_user() {
        let engine = PricingEstimator::default();
        let result = engine
            .estimate(&request(dec!(5.00), DemandLevel::Low, 3, dec!(0.0)))
            .unwrap();

        assert_eq!(result.price_multiplier, dec!(0.72));
        assert_eq!(result.suggested_price, dec!(3.60));
        assert_eq!(result.revenue_impact, RevenueImpact::CostOptimized);
        assert_eq!(result.expected_conversion_rate, 0.18);
    }

    #[test]
    fn test_medium_demand_business_hours() {
        let engine = PricingEstimator::default();
        let result = engine
            .estimate(&request(dec!(15.00), DemandLevel::Medium, 12, dec!(0.5)))
            .unwrap();

        assert_eq!(result.price_multiplier, dec!(1.21));
        assert_eq!(result.suggested_price, dec!(18.15));
        assert_eq!(result.revenue_impact, RevenueImpact::HighUplift);
        assert_eq!(result.expected_conversion_rate, 0.15);
        assert!(result.reasoning.contains("Medium demand"));
        assert!(result.reasoning.contains("business hours"));
        assert!(result.reasoning.contains("50%"));
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let engine = PricingEstimator::default();
        let err = engine
            .estimate(&request(dec!(-1), DemandLevel::Medium, 10, dec!(0.5)))
            .unwrap_err();
        assert_eq!(err.field(), PricingField::ProductBasePrice);
    }

    #[test]
    fn test_rejections() {
        let engine = PricingEstimator::default();

        let zero_price = engine.estimate(&request(dec!(0), DemandLevel::Medium, 10, dec!(0.5)));
        assert_eq!(zero_price.unwrap_err().field(), PricingField::ProductBasePrice);

        let late = engine.estimate(&request(dec!(10), DemandLevel::Medium, 24, dec!(0.5)));
        assert_eq!(late.unwrap_err().field(), PricingField::HourOfDay);

        let over = engine.estimate(&request(dec!(10), DemandLevel::Medium, 10, dec!(1.5)));
        assert_eq!(over.unwrap_err().field(), PricingField::UserValueScore);

        let under = engine.estimate(&request(dec!(10), DemandLevel::Medium, 10, dec!(-0.1)));
        assert_eq!(under.unwrap_err().field(), PricingField::UserValueScore);

        let extreme = "extreme".parse::<DemandLevel>().unwrap_err();
        assert_eq!(extreme.field(), PricingField::DemandLevel);
        assert_eq!(extreme.to_string(), "demandLevel 'extreme' is not one of low, medium, high");
    }

    #[test]
    fn test_huge_base_price_rejected() {
        let engine = PricingEstimator::default();
        let err = engine
            .estimate(&request(dec!(50000000000000000000000000000), DemandLevel::High, 20, dec!(1.0)))
            .unwrap_err();
        assert_eq!(err.field(), PricingField::ProductBasePrice);
        assert_eq!(err.to_string(), "productBasePrice must be between 0.01 and 1000000000");

        let at_cap = engine
            .estimate(&request(MAX_BASE_PRICE, DemandLevel::High, 20, dec!(1.0)))
            .unwrap();
        assert_eq!(at_cap.suggested_price, dec!(1872000000));
    }

    #[test]
    fn test_sub_cent_base_price_rejected() {
        let engine = PricingEstimator::default();
        let err = engine
            .estimate(&request(dec!(0.001), DemandLevel::Low, 3, dec!(0)))
            .unwrap_err();
        assert_eq!(err.field(), PricingField::ProductBasePrice);

        // 0.01 * 0.72 rounds up to a cent
        let cheapest = engine
            .estimate(&request(MIN_BASE_PRICE, DemandLevel::Low, 3, dec!(0)))
            .unwrap();
        assert_eq!(cheapest.suggested_price, dec!(0.01));
    }

    #[test]
    fn test_hour_boundaries() {
        assert_eq!(TimeWindow::classify(8), TimeWindow::OffPeak);
        assert_eq!(TimeWindow::classify(9), TimeWindow::BusinessHours);
        assert_eq!(TimeWindow::classify(17), TimeWindow::BusinessHours);
        assert_eq!(TimeWindow::classify(18), TimeWindow::PeakEvening);
        assert_eq!(TimeWindow::classify(22), TimeWindow::PeakEvening);
        assert_eq!(TimeWindow::classify(23), TimeWindow::OffPeak);
        assert_eq!(TimeWindow::classify(0), TimeWindow::OffPeak);

        assert_eq!(TimeWindow::classify(17).multiplier(), dec!(1.10));
        assert_eq!(TimeWindow::classify(18).multiplier(), dec!(1.20));
        assert_eq!(TimeWindow::classify(23).multiplier(), dec!(1.00));
    }

    #[test]
    fn test_multiplier_range_and_formula() {
        let engine = PricingEstimator::default();
        let base = dec!(12.34);
        let scores = [dec!(0), dec!(0.1), dec!(0.25), dec!(0.5), dec!(0.77), dec!(1)];

        for demand in [DemandLevel::Low, DemandLevel::Medium, DemandLevel::High] {
            for hour in 0..24 {
                for score in scores {
                    let result = engine.estimate(&request(base, demand, hour, score)).unwrap();
                    assert!(result.price_multiplier >= dec!(0.72));
                    assert!(result.price_multiplier <= dec!(1.872));

                    let expected = demand.multiplier()
                        * TimeWindow::classify(hour).multiplier()
                        * (dec!(0.8) + score * dec!(0.4));
                    assert_eq!(result.price_multiplier, expected.normalize());
                    assert_eq!(result.suggested_price, round_price(base * expected));
                }
            }
        }
    }

    #[test]
    fn test_price_non_decreasing_in_user_score() {
        let engine = PricingEstimator::default();
        let mut last = Decimal::ZERO;
        for step in 0..=20 {
            let score = Decimal::from(step) / dec!(20);
            let result = engine
                .estimate(&request(dec!(29.99), DemandLevel::High, 14, score))
                .unwrap();
            assert!(result.suggested_price >= last);
            last = result.suggested_price;
        }
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let engine = PricingEstimator::default();
        let req = request(dec!(19.99), DemandLevel::Medium, 19, dec!(0.42));
        assert_eq!(engine.estimate(&req).unwrap(), engine.estimate(&req).unwrap());
        assert_eq!(engine.estimate(&req).unwrap().confidence, 0.85);
    }

    #[test]
    fn test_revenue_impact_thresholds() {
        assert_eq!(RevenueImpact::from_multiplier(dec!(1.21)), RevenueImpact::HighUplift);
        assert_eq!(RevenueImpact::from_multiplier(dec!(1.20)), RevenueImpact::ModerateUplift);
        assert_eq!(RevenueImpact::from_multiplier(dec!(1.06)), RevenueImpact::ModerateUplift);
        assert_eq!(RevenueImpact::from_multiplier(dec!(1.05)), RevenueImpact::CostOptimized);
    }

    #[test]
    fn test_decimal_from_f64_keeps_short_form() {
        assert_eq!(decimal_from_f64(PricingField::ProductBasePrice, 9.99).unwrap(), dec!(9.99));
        assert_eq!(decimal_from_f64(PricingField::UserValueScore, 0.1).unwrap(), dec!(0.1));
        let err = decimal_from_f64(PricingField::UserValueScore, f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "userValueScore must be a finite decimal number");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_price(dec!(1.005)), dec!(1.01));
        assert_eq!(round_price(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_confidence_jitter_is_bounded_and_seedable() {
        let engine = PricingEstimator::new(PricingConfig {
            confidence_jitter: true,
            ..PricingConfig::default()
        });
        let req = request(dec!(9.99), DemandLevel::Low, 7, dec!(0.3));

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let result = engine.estimate_with_rng(&req, &mut rng).unwrap();
            assert!(result.confidence >= 0.85 && result.confidence <= 0.95);
        }

        let a = engine.estimate_with_rng(&req, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = engine.estimate_with_rng(&req, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_clamps_non_finite_jitter() {
        let engine = PricingEstimator::new(PricingConfig {
            confidence_jitter: true,
            base_confidence: 1.7,
            max_jitter: f64::INFINITY,
        });
        assert_eq!(engine.config().base_confidence, 1.0);
        assert_eq!(engine.config().max_jitter, 0.0);

        let req = request(dec!(9.99), DemandLevel::Low, 7, dec!(0.3));
        let result = engine.estimate_with_rng(&req, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let engine = PricingEstimator::default();
        let result = engine
            .estimate(&request(dec!(10.00), DemandLevel::High, 20, dec!(1.0)))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["suggestedPrice"], serde_json::json!(18.72));
        assert_eq!(json["priceMultiplier"], serde_json::json!(1.872));
        assert_eq!(json["revenueImpactLabel"], "high uplift");
        assert_eq!(json["breakdown"]["timeWindow"], "peak-evening");
    }
}
