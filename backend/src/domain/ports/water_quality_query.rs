//! Driving port for postal-code lookups.
//!
//! HTTP handlers call this port instead of the repository so the fallback
//! policy and error mapping live in the domain.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::water_quality::WaterQualityMetric;

/// Domain use-case port for reading measurements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaterQualityQuery: Send + Sync {
    /// Measurements for `plz`, possibly synthetic when none are stored.
    async fn metrics_for_postal_code(&self, plz: &str) -> Result<Vec<WaterQualityMetric>, Error>;
}
