//! Wire records exchanged between the backend and its clients.
//!
//! Field names are camelCase on the wire. Decimal columns travel as strings
//! (`"12.5"`) so no precision is lost between PostgreSQL `numeric` and the
//! client.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned when a stored label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    /// Enumeration the value was parsed as.
    pub kind: &'static str,
    /// Offending input.
    pub value: String,
}

/// Coarse severity label stored alongside a measurement.
///
/// The level is recorded by the data source; it is not derived from the
/// ratio between the measured and the limit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Comfortably below the legal limit.
    Low,
    /// Approaching the legal limit.
    Medium,
    /// At or near the legal limit.
    High,
    /// Above the legal limit.
    Critical,
}

impl RiskLevel {
    /// Stable label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(UnknownVariant {
                kind: "risk level",
                value: other.to_owned(),
            }),
        }
    }
}

/// Installation category of a filter product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    /// Mounted below the kitchen sink.
    UnderSink,
    /// Jug or countertop unit.
    TableTop,
    /// Point-of-entry system for the whole building.
    WholeHouse,
}

impl FilterCategory {
    /// Stable label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderSink => "under-sink",
            Self::TableTop => "table-top",
            Self::WholeHouse => "whole-house",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "under-sink" => Ok(Self::UnderSink),
            "table-top" => Ok(Self::TableTop),
            "whole-house" => Ok(Self::WholeHouse),
            other => Err(UnknownVariant {
                kind: "filter category",
                value: other.to_owned(),
            }),
        }
    }
}

/// One contamination measurement for a postal code.
///
/// Example JSON:
/// `{"id":1,"plz":"10115","city":"Berlin","contaminationType":"PFAS",
/// "measuredValue":"18.5","unit":"ng/L","limitValue":"20.0",
/// "measurementDate":"2026-01-15","dataSource":"UBA 2026 Analyse",
/// "riskLevel":"medium","legalAdvice":null}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WaterQualityMetricRecord {
    /// Synthetic identifier; `0` marks a fabricated fallback row.
    pub id: i32,
    /// Five-character German postal code.
    pub plz: String,
    /// Municipality name.
    pub city: String,
    /// Contaminant label, for example `PFAS` or `Nitrat`.
    pub contamination_type: String,
    /// Measured concentration.
    pub measured_value: Decimal,
    /// Unit shared by the measured and limit values.
    pub unit: String,
    /// Legal limit for the contaminant.
    pub limit_value: Decimal,
    /// Day the sample was taken.
    pub measurement_date: NaiveDate,
    /// Publisher of the measurement.
    pub data_source: String,
    /// Stored severity label.
    pub risk_level: RiskLevel,
    /// Tenancy-law advisory text, when available.
    #[serde(default)]
    pub legal_advice: Option<String>,
}

/// Lab-tested removal rate for one contaminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FilterPerformanceRecord {
    /// Synthetic identifier.
    pub id: i32,
    /// Owning filter product, if the reference is still set.
    #[serde(default)]
    pub filter_id: Option<i32>,
    /// Contaminant label.
    pub contaminant: String,
    /// Removal rate in percent.
    pub removal_rate: Decimal,
    /// Certification label such as `NSF 53`.
    #[serde(default)]
    pub certification: Option<String>,
}

/// Filter product annotated with its performance rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FilterProductRecord {
    /// Synthetic identifier.
    pub id: i32,
    /// Product name.
    pub name: String,
    /// Manufacturer.
    pub brand: String,
    /// Marketing description.
    pub description: String,
    /// Retail price in euro.
    pub price: Decimal,
    /// Product image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Outbound shop link.
    #[serde(default)]
    pub affiliate_link: Option<String>,
    /// Installation category.
    pub category: FilterCategory,
    /// Performance rows referencing this product.
    #[serde(default)]
    pub performance: Vec<FilterPerformanceRecord>,
}

/// Saved postal-code search of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserScanRecord {
    /// Synthetic identifier.
    pub id: i32,
    /// Identity issued by the external auth provider.
    pub user_id: String,
    /// Postal code that was searched.
    pub plz: String,
    /// Server-assigned creation time.
    pub scanned_at: DateTime<Utc>,
    /// Whether the user pinned the scan.
    pub is_saved: bool,
}

/// Acknowledgement returned by the aggregation trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AggregateAck {
    /// Human-readable status.
    pub message: String,
}

/// Error payload returned by every non-success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code, for example `invalid_request`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Correlation identifier of the failed request.
    #[serde(default)]
    pub trace_id: Option<String>,
    /// Structured details such as field errors.
    #[serde(default)]
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(RiskLevel::Low, "low")]
    #[case(RiskLevel::Medium, "medium")]
    #[case(RiskLevel::High, "high")]
    #[case(RiskLevel::Critical, "critical")]
    fn risk_level_labels_match_storage(#[case] level: RiskLevel, #[case] label: &str) {
        assert_eq!(level.as_str(), label);
        assert_eq!(label.parse::<RiskLevel>(), Ok(level));
        assert_eq!(serde_json::to_value(level).expect("serialise"), json!(label));
    }

    #[rstest]
    #[case(FilterCategory::UnderSink, "under-sink")]
    #[case(FilterCategory::TableTop, "table-top")]
    #[case(FilterCategory::WholeHouse, "whole-house")]
    fn filter_category_labels_match_storage(#[case] category: FilterCategory, #[case] label: &str) {
        assert_eq!(category.to_string(), label);
        assert_eq!(label.parse::<FilterCategory>(), Ok(category));
    }

    #[rstest]
    fn unknown_labels_are_rejected() {
        let err = "severe".parse::<RiskLevel>().expect_err("unknown level");
        assert_eq!(err.to_string(), "unknown risk level 'severe'");
    }

    #[rstest]
    fn metric_uses_camel_case_and_string_decimals() {
        let record = WaterQualityMetricRecord {
            id: 1,
            plz: "10115".to_owned(),
            city: "Berlin".to_owned(),
            contamination_type: "PFAS".to_owned(),
            measured_value: Decimal::new(185, 1),
            unit: "ng/L".to_owned(),
            limit_value: Decimal::new(200, 1),
            measurement_date: NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"),
            data_source: "UBA 2026 Analyse".to_owned(),
            risk_level: RiskLevel::Medium,
            legal_advice: None,
        };

        let value = serde_json::to_value(&record).expect("serialise");
        assert_eq!(value["contaminationType"], json!("PFAS"));
        assert_eq!(value["measuredValue"], json!("18.5"));
        assert_eq!(value["limitValue"], json!("20.0"));
        assert_eq!(value["measurementDate"], json!("2026-01-15"));
        assert_eq!(value["riskLevel"], json!("medium"));
        assert!(value["legalAdvice"].is_null());
    }

    #[rstest]
    fn product_without_performance_key_parses_as_empty() {
        let value = json!({
            "id": 3,
            "name": "Brita Marella",
            "brand": "Brita",
            "description": "Tischwasserfilter",
            "price": "24.99",
            "category": "table-top"
        });

        let product: FilterProductRecord = serde_json::from_value(value).expect("parse");
        assert!(product.performance.is_empty());
        assert!(product.image_url.is_none());
    }
}
