//! PostgreSQL adapters for the repository ports.
//!
//! Adapters translate between Diesel rows and the shared records and carry
//! no business rules. Row structs and table definitions stay private to this
//! module.
//!
//! ```no_run
//! use hydrocheck::outbound::persistence::{DbPool, DieselUserScanRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hydrocheck")).await?;
//! let scans = DieselUserScanRepository::new(pool);
//! # let _ = scans;
//! # Ok(())
//! # }
//! ```

mod diesel_filter_product_repository;
mod diesel_user_scan_repository;
mod diesel_water_quality_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_filter_product_repository::DieselFilterProductRepository;
pub use diesel_user_scan_repository::DieselUserScanRepository;
pub use diesel_water_quality_repository::DieselWaterQualityRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
