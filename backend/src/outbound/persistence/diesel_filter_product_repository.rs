//! PostgreSQL-backed `FilterProductRepository`.
//!
//! The catalogue listing costs two statements regardless of catalogue size:
//! one for products and one for every performance row that references them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::filters::{
    FilterPerformance, FilterProduct, NewFilterPerformance, NewFilterProduct, attach_performance,
};
use crate::domain::ports::{FilterProductRepository, FilterProductRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{
    FilterPerformanceRow, FilterProductRow, NewFilterPerformanceRow, NewFilterProductRow,
};
use super::pool::DbPool;
use super::schema::{filter_performance, filter_products};

/// Diesel adapter for the filter catalogue.
#[derive(Clone)]
pub struct DieselFilterProductRepository {
    pool: DbPool,
}

impl DieselFilterProductRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilterProductRepository for DieselFilterProductRepository {
    async fn list_with_performance(
        &self,
    ) -> Result<Vec<FilterProduct>, FilterProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let product_rows: Vec<FilterProductRow> = filter_products::table
            .order(filter_products::id.asc())
            .select(FilterProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if product_rows.is_empty() {
            return Ok(Vec::new());
        }

        let products = product_rows
            .into_iter()
            .map(|row| FilterProduct::try_from(row).map_err(map_row_error))
            .collect::<Result<Vec<_>, FilterProductRepositoryError>>()?;
        let ids: Vec<i32> = products.iter().map(|product| product.id).collect();

        let performance: Vec<FilterPerformance> = filter_performance::table
            .filter(filter_performance::filter_id.eq_any(ids))
            .order(filter_performance::id.asc())
            .select(FilterPerformanceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(FilterPerformance::from)
            .collect();

        Ok(attach_performance(products, performance))
    }

    async fn insert_product(
        &self,
        product: &NewFilterProduct,
    ) -> Result<FilterProduct, FilterProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(filter_products::table)
            .values(NewFilterProductRow::from(product))
            .returning(FilterProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        FilterProduct::try_from(row).map_err(map_row_error)
    }

    async fn insert_performance(
        &self,
        row: &NewFilterPerformance,
    ) -> Result<FilterPerformance, FilterProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(filter_performance::table)
            .values(NewFilterPerformanceRow::from(row))
            .returning(FilterPerformanceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(FilterPerformance::from)
            .map_err(map_diesel_error)
    }
}
