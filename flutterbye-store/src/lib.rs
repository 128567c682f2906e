pub mod app_config;
pub mod performance;

pub use app_config::Config;
pub use performance::{PerformanceSample, PerformanceTracker, ProductPerformance, TrackError};
