//! Storage selection for the HTTP state.

use std::sync::Arc;

use hydrocheck::domain::ports::{
    FixtureFilterProductRepository, FixtureUserScanRepository, FixtureWaterQualityRepository,
};
use hydrocheck::inbound::http::state::Repositories;
use hydrocheck::outbound::persistence::{
    DbPool, DieselFilterProductRepository, DieselUserScanRepository, DieselWaterQualityRepository,
};

/// Diesel repositories when a pool is available, in-memory ones otherwise.
pub fn build_repositories(pool: Option<&DbPool>) -> Repositories {
    match pool {
        Some(pool) => Repositories {
            water: Arc::new(DieselWaterQualityRepository::new(pool.clone())),
            filters: Arc::new(DieselFilterProductRepository::new(pool.clone())),
            scans: Arc::new(DieselUserScanRepository::new(pool.clone())),
        },
        None => Repositories {
            water: Arc::new(FixtureWaterQualityRepository::default()),
            filters: Arc::new(FixtureFilterProductRepository::default()),
            scans: Arc::new(FixtureUserScanRepository::default()),
        },
    }
}
