//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; adapters convert them into the
//! shared records before returning. Enum columns are stored as their wire
//! labels and parsed back on read.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::filters::{
    FilterPerformance, FilterProduct, NewFilterPerformance, NewFilterProduct,
};
use crate::domain::scans::{NewUserScan, UserScan};
use crate::domain::water_quality::{NewWaterQualityMetric, WaterQualityMetric};

use super::schema::{filter_performance, filter_products, user_scans, water_quality_metrics};

// ---------------------------------------------------------------------------
// Water-quality metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = water_quality_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WaterQualityMetricRow {
    pub id: i32,
    pub plz: String,
    pub city: String,
    pub contamination_type: String,
    pub measured_value: Decimal,
    pub unit: String,
    pub limit_value: Decimal,
    pub measurement_date: NaiveDate,
    pub data_source: String,
    pub risk_level: String,
    pub legal_advice: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = water_quality_metrics)]
pub(crate) struct NewWaterQualityMetricRow<'a> {
    pub plz: &'a str,
    pub city: &'a str,
    pub contamination_type: &'a str,
    pub measured_value: Decimal,
    pub unit: &'a str,
    pub limit_value: Decimal,
    pub measurement_date: NaiveDate,
    pub data_source: &'a str,
    pub risk_level: &'a str,
    pub legal_advice: Option<&'a str>,
}

impl<'a> From<&'a NewWaterQualityMetric> for NewWaterQualityMetricRow<'a> {
    fn from(metric: &'a NewWaterQualityMetric) -> Self {
        Self {
            plz: &metric.plz,
            city: &metric.city,
            contamination_type: &metric.contamination_type,
            measured_value: metric.measured_value,
            unit: &metric.unit,
            limit_value: metric.limit_value,
            measurement_date: metric.measurement_date,
            data_source: &metric.data_source,
            risk_level: metric.risk_level.as_str(),
            legal_advice: metric.legal_advice.as_deref(),
        }
    }
}

impl TryFrom<WaterQualityMetricRow> for WaterQualityMetric {
    type Error = String;

    fn try_from(row: WaterQualityMetricRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            plz: row.plz,
            city: row.city,
            contamination_type: row.contamination_type,
            measured_value: row.measured_value,
            unit: row.unit,
            limit_value: row.limit_value,
            measurement_date: row.measurement_date,
            data_source: row.data_source,
            risk_level: row.risk_level.parse().map_err(|err| format!("{err}"))?,
            legal_advice: row.legal_advice,
        })
    }
}

// ---------------------------------------------------------------------------
// Filter catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = filter_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FilterProductRow {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub affiliate_link: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = filter_products)]
pub(crate) struct NewFilterProductRow<'a> {
    pub name: &'a str,
    pub brand: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub image_url: Option<&'a str>,
    pub affiliate_link: Option<&'a str>,
    pub category: &'a str,
}

impl<'a> From<&'a NewFilterProduct> for NewFilterProductRow<'a> {
    fn from(product: &'a NewFilterProduct) -> Self {
        Self {
            name: &product.name,
            brand: &product.brand,
            description: &product.description,
            price: product.price,
            image_url: product.image_url.as_deref(),
            affiliate_link: product.affiliate_link.as_deref(),
            category: product.category.as_str(),
        }
    }
}

/// Products come back without performance rows; callers attach them.
impl TryFrom<FilterProductRow> for FilterProduct {
    type Error = String;

    fn try_from(row: FilterProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            brand: row.brand,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            affiliate_link: row.affiliate_link,
            category: row.category.parse().map_err(|err| format!("{err}"))?,
            performance: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = filter_performance)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FilterPerformanceRow {
    pub id: i32,
    pub filter_id: Option<i32>,
    pub contaminant: String,
    pub removal_rate: Decimal,
    pub certification: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = filter_performance)]
pub(crate) struct NewFilterPerformanceRow<'a> {
    pub filter_id: Option<i32>,
    pub contaminant: &'a str,
    pub removal_rate: Decimal,
    pub certification: Option<&'a str>,
}

impl<'a> From<&'a NewFilterPerformance> for NewFilterPerformanceRow<'a> {
    fn from(row: &'a NewFilterPerformance) -> Self {
        Self {
            filter_id: row.filter_id,
            contaminant: &row.contaminant,
            removal_rate: row.removal_rate,
            certification: row.certification.as_deref(),
        }
    }
}

impl From<FilterPerformanceRow> for FilterPerformance {
    fn from(row: FilterPerformanceRow) -> Self {
        Self {
            id: row.id,
            filter_id: row.filter_id,
            contaminant: row.contaminant,
            removal_rate: row.removal_rate,
            certification: row.certification,
        }
    }
}

// ---------------------------------------------------------------------------
// User scans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_scans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserScanRow {
    pub id: i32,
    pub user_id: String,
    pub plz: String,
    pub scanned_at: DateTime<Utc>,
    pub is_saved: bool,
}

/// `scanned_at` is omitted so the column default applies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_scans)]
pub(crate) struct NewUserScanRow<'a> {
    pub user_id: &'a str,
    pub plz: &'a str,
    pub is_saved: bool,
}

impl<'a> From<&'a NewUserScan> for NewUserScanRow<'a> {
    fn from(scan: &'a NewUserScan) -> Self {
        Self {
            user_id: scan.user_id.as_ref(),
            plz: &scan.plz,
            is_saved: scan.is_saved,
        }
    }
}

impl From<UserScanRow> for UserScan {
    fn from(row: UserScanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            plz: row.plz,
            scanned_at: row.scanned_at,
            is_saved: row.is_saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::FilterCategory;
    use crate::domain::water_quality::RiskLevel;
    use rstest::rstest;

    fn metric_row(risk_level: &str) -> WaterQualityMetricRow {
        WaterQualityMetricRow {
            id: 7,
            plz: "10115".to_owned(),
            city: "Berlin".to_owned(),
            contamination_type: "Blei".to_owned(),
            measured_value: Decimal::new(2, 3),
            unit: "mg/L".to_owned(),
            limit_value: Decimal::new(10, 3),
            measurement_date: NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date"),
            data_source: "Berliner Wasserbetriebe".to_owned(),
            risk_level: risk_level.to_owned(),
            legal_advice: None,
        }
    }

    #[rstest]
    #[case("low", RiskLevel::Low)]
    #[case("critical", RiskLevel::Critical)]
    fn metric_rows_parse_risk_labels(#[case] label: &str, #[case] expected: RiskLevel) {
        let metric = WaterQualityMetric::try_from(metric_row(label)).expect("known label");
        assert_eq!(metric.risk_level, expected);
        assert_eq!(metric.id, 7);
    }

    #[rstest]
    fn unknown_risk_label_is_rejected() {
        let err = WaterQualityMetric::try_from(metric_row("severe")).expect_err("unknown label");
        assert!(err.contains("severe"));
    }

    #[rstest]
    #[case("under-sink", FilterCategory::UnderSink)]
    #[case("whole-house", FilterCategory::WholeHouse)]
    fn product_rows_parse_category_labels(#[case] label: &str, #[case] expected: FilterCategory) {
        let row = FilterProductRow {
            id: 1,
            name: "Alb Filter Active S".to_owned(),
            brand: "Alb Filter".to_owned(),
            description: "Untertisch".to_owned(),
            price: Decimal::new(34900, 2),
            image_url: None,
            affiliate_link: None,
            category: label.to_owned(),
        };

        let product = FilterProduct::try_from(row).expect("known label");

        assert_eq!(product.category, expected);
        assert!(product.performance.is_empty());
    }

    #[rstest]
    fn insert_rows_store_wire_labels() {
        let metric = NewWaterQualityMetric {
            plz: "10115".to_owned(),
            city: "Berlin".to_owned(),
            contamination_type: "PFAS".to_owned(),
            measured_value: Decimal::new(185, 1),
            unit: "ng/L".to_owned(),
            limit_value: Decimal::new(200, 1),
            measurement_date: NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"),
            data_source: "UBA 2026 Analyse".to_owned(),
            risk_level: RiskLevel::Medium,
            legal_advice: Some("Filter empfohlen".to_owned()),
        };

        let row = NewWaterQualityMetricRow::from(&metric);

        assert_eq!(row.risk_level, "medium");
        assert_eq!(row.legal_advice, Some("Filter empfohlen"));
    }
}
