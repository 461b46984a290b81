//! PostgreSQL-backed `WaterQualityRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{WaterQualityRepository, WaterQualityRepositoryError};
use crate::domain::water_quality::{NewWaterQualityMetric, WaterQualityMetric};

use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{NewWaterQualityMetricRow, WaterQualityMetricRow};
use super::pool::DbPool;
use super::schema::water_quality_metrics;

/// Diesel adapter for measurement storage.
#[derive(Clone)]
pub struct DieselWaterQualityRepository {
    pool: DbPool,
}

impl DieselWaterQualityRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_metric(row: WaterQualityMetricRow) -> Result<WaterQualityMetric, WaterQualityRepositoryError> {
    WaterQualityMetric::try_from(row).map_err(map_row_error)
}

#[async_trait]
impl WaterQualityRepository for DieselWaterQualityRepository {
    async fn find_by_postal_code(
        &self,
        plz: &str,
    ) -> Result<Vec<WaterQualityMetric>, WaterQualityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WaterQualityMetricRow> = water_quality_metrics::table
            .filter(water_quality_metrics::plz.eq(plz))
            .order(water_quality_metrics::id.asc())
            .select(WaterQualityMetricRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(into_metric).collect()
    }

    async fn insert(
        &self,
        metric: &NewWaterQualityMetric,
    ) -> Result<WaterQualityMetric, WaterQualityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(water_quality_metrics::table)
            .values(NewWaterQualityMetricRow::from(metric))
            .returning(WaterQualityMetricRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        into_metric(row)
    }
}
