//! Water-quality measurements keyed by postal code.
//!
//! Persisted rows travel as [`WaterQualityMetric`] (the shared wire record).
//! New rows are described by [`NewWaterQualityMetric`], which carries no
//! identifier; the store assigns one.

use chrono::NaiveDate;
use rust_decimal::Decimal;

pub use water_contract::{RiskLevel, WaterQualityMetricRecord as WaterQualityMetric};

/// Municipality reported by synthetic fallback rows.
pub const FALLBACK_CITY: &str = "Musterstadt";

/// Data source reported by synthetic fallback rows.
pub const FALLBACK_DATA_SOURCE: &str = "UBA 2026";

/// Measurement awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaterQualityMetric {
    /// Five-character postal code.
    pub plz: String,
    /// Municipality name.
    pub city: String,
    /// Contaminant label.
    pub contamination_type: String,
    /// Measured concentration.
    pub measured_value: Decimal,
    /// Unit shared by both values.
    pub unit: String,
    /// Legal limit.
    pub limit_value: Decimal,
    /// Sampling day.
    pub measurement_date: NaiveDate,
    /// Publisher of the measurement.
    pub data_source: String,
    /// Stored severity label.
    pub risk_level: RiskLevel,
    /// Tenancy-law advisory text.
    pub legal_advice: Option<String>,
}

struct FallbackRow {
    contaminant: &'static str,
    measured: Decimal,
    unit: &'static str,
    limit: Decimal,
    risk: RiskLevel,
}

const FALLBACK_ROWS: [FallbackRow; 3] = [
    FallbackRow {
        contaminant: "PFAS",
        measured: Decimal::from_parts(125, 0, 0, false, 1),
        unit: "ng/L",
        limit: Decimal::from_parts(20, 0, 0, false, 0),
        risk: RiskLevel::Medium,
    },
    FallbackRow {
        contaminant: "Nitrat",
        measured: Decimal::from_parts(45, 0, 0, false, 0),
        unit: "mg/L",
        limit: Decimal::from_parts(50, 0, 0, false, 0),
        risk: RiskLevel::High,
    },
    FallbackRow {
        contaminant: "Blei",
        measured: Decimal::from_parts(5, 0, 0, false, 3),
        unit: "mg/L",
        limit: Decimal::from_parts(1, 0, 0, false, 2),
        risk: RiskLevel::Low,
    },
];

/// Synthetic rows served when no measurements exist for `plz`.
///
/// Every row has `id = 0`, echoes `plz`, and is dated `today`. Callers must
/// not persist them.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hydrocheck::domain::water_quality::fallback_metrics;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
/// let rows = fallback_metrics("80331", today);
/// assert_eq!(rows.len(), 3);
/// assert!(rows.iter().all(|row| row.id == 0 && row.plz == "80331"));
/// ```
#[must_use]
pub fn fallback_metrics(plz: &str, today: NaiveDate) -> Vec<WaterQualityMetric> {
    FALLBACK_ROWS
        .iter()
        .map(|row| WaterQualityMetric {
            id: 0,
            plz: plz.to_owned(),
            city: FALLBACK_CITY.to_owned(),
            contamination_type: row.contaminant.to_owned(),
            measured_value: row.measured,
            unit: row.unit.to_owned(),
            limit_value: row.limit,
            measurement_date: today,
            data_source: FALLBACK_DATA_SOURCE.to_owned(),
            risk_level: row.risk,
            legal_advice: None,
        })
        .collect()
}
