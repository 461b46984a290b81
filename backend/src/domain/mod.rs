//! Domain primitives, ports, and services.
//!
//! Purpose: hold the water-quality, filter catalogue, and scan history rules
//! independent of HTTP and SQL. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): request correlation id.
//! - UserId (alias to `user::UserId`): identity issued by the auth provider.

pub mod catalogue_seed;
pub mod error;
mod filter_catalogue_service;
pub mod filters;
pub mod ports;
mod scan_service;
pub mod scans;
pub mod trace_id;
pub mod user;
pub mod water_quality;
mod water_quality_service;

pub use self::catalogue_seed::{
    CatalogueSeeder, CatalogueSeedingError, SeedCatalogue, SeedOutcome,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filter_catalogue_service::FilterCatalogueService;
pub use self::scan_service::UserScanService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};
pub use self::water_quality_service::{EmptyLookupPolicy, WaterQualityService};
