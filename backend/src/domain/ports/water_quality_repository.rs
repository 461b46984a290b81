//! Driven port for water-quality measurement storage.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::water_quality::{NewWaterQualityMetric, WaterQualityMetric};

use super::define_port_error;

define_port_error! {
    /// Errors raised by water-quality storage adapters.
    pub enum WaterQualityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "water quality repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "water quality repository query failed: {message}",
    }
}

/// Port for reading and appending measurements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaterQualityRepository: Send + Sync {
    /// Return every measurement recorded for `plz`, ordered by id.
    ///
    /// An unknown postal code yields an empty vector rather than an error.
    async fn find_by_postal_code(
        &self,
        plz: &str,
    ) -> Result<Vec<WaterQualityMetric>, WaterQualityRepositoryError>;

    /// Persist a measurement and return it with its generated id.
    async fn insert(
        &self,
        metric: &NewWaterQualityMetric,
    ) -> Result<WaterQualityMetric, WaterQualityRepositoryError>;
}

/// In-memory repository used when no database is configured.
#[derive(Debug, Default)]
pub struct FixtureWaterQualityRepository {
    rows: Mutex<Vec<WaterQualityMetric>>,
}

#[async_trait]
impl WaterQualityRepository for FixtureWaterQualityRepository {
    async fn find_by_postal_code(
        &self,
        plz: &str,
    ) -> Result<Vec<WaterQualityMetric>, WaterQualityRepositoryError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| WaterQualityRepositoryError::query("fixture store poisoned"))?;
        Ok(rows.iter().filter(|row| row.plz == plz).cloned().collect())
    }

    async fn insert(
        &self,
        metric: &NewWaterQualityMetric,
    ) -> Result<WaterQualityMetric, WaterQualityRepositoryError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| WaterQualityRepositoryError::query("fixture store poisoned"))?;
        let id = next_id(rows.len())?;
        let stored = WaterQualityMetric {
            id,
            plz: metric.plz.clone(),
            city: metric.city.clone(),
            contamination_type: metric.contamination_type.clone(),
            measured_value: metric.measured_value,
            unit: metric.unit.clone(),
            limit_value: metric.limit_value,
            measurement_date: metric.measurement_date,
            data_source: metric.data_source.clone(),
            risk_level: metric.risk_level,
            legal_advice: metric.legal_advice.clone(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}

fn next_id(len: usize) -> Result<i32, WaterQualityRepositoryError> {
    i32::try_from(len)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or_else(|| WaterQualityRepositoryError::query("fixture id space exhausted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::water_quality::RiskLevel;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn berlin_pfas() -> NewWaterQualityMetric {
        NewWaterQualityMetric {
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
        }
    }

    #[tokio::test]
    async fn fixture_assigns_ids_and_filters_by_plz() {
        let repo = FixtureWaterQualityRepository::default();
        let first = repo.insert(&berlin_pfas()).await.expect("insert");
        let second = repo.insert(&berlin_pfas()).await.expect("insert duplicate");

        assert_eq!((first.id, second.id), (1, 2));
        let found = repo.find_by_postal_code("10115").await.expect("lookup");
        assert_eq!(found.len(), 2);
        assert!(
            repo.find_by_postal_code("80331")
                .await
                .expect("lookup")
                .is_empty()
        );
    }

    #[test]
    fn error_messages_name_the_repository() {
        let err = WaterQualityRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "water quality repository connection failed: refused"
        );
    }
}
