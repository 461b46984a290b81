//! PostgreSQL-backed `UserScanRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{UserScanRepository, UserScanRepositoryError};
use crate::domain::scans::{NewUserScan, UserScan};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserScanRow, UserScanRow};
use super::pool::DbPool;
use super::schema::user_scans;

/// Diesel adapter for scan history.
#[derive(Clone)]
pub struct DieselUserScanRepository {
    pool: DbPool,
}

impl DieselUserScanRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserScanRepository for DieselUserScanRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserScan>, UserScanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        user_scans::table
            .filter(user_scans::user_id.eq(user_id.as_ref()))
            .order(user_scans::id.asc())
            .select(UserScanRow::as_select())
            .load::<UserScanRow>(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(UserScan::from).collect())
            .map_err(map_diesel_error)
    }

    async fn insert(&self, scan: &NewUserScan) -> Result<UserScan, UserScanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_scans::table)
            .values(NewUserScanRow::from(scan))
            .returning(UserScanRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(UserScan::from)
            .map_err(map_diesel_error)
    }
}
