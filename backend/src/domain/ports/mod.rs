//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters; each has an in-memory `Fixture*` implementation used when no
//! database is configured. Driving ports (`*Query`, `*Command`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod filter_catalogue_query;
mod filter_product_repository;
mod user_scan_repository;
mod user_scans_command;
mod user_scans_query;
mod voice_assistant;
mod water_aggregation_command;
mod water_quality_query;
mod water_quality_repository;

#[cfg(test)]
pub use filter_catalogue_query::MockFilterCatalogueQuery;
pub use filter_catalogue_query::FilterCatalogueQuery;
#[cfg(test)]
pub use filter_product_repository::MockFilterProductRepository;
pub use filter_product_repository::{
    FilterProductRepository, FilterProductRepositoryError, FixtureFilterProductRepository,
};
#[cfg(test)]
pub use user_scan_repository::MockUserScanRepository;
pub use user_scan_repository::{
    FixtureUserScanRepository, UserScanRepository, UserScanRepositoryError,
};
#[cfg(test)]
pub use user_scans_command::MockUserScansCommand;
pub use user_scans_command::UserScansCommand;
#[cfg(test)]
pub use user_scans_query::MockUserScansQuery;
pub use user_scans_query::UserScansQuery;
#[cfg(test)]
pub use voice_assistant::MockVoiceAssistant;
pub use voice_assistant::{
    UnavailableVoiceAssistant, VoiceAssistant, VoiceAssistantError, VoiceReply,
};
#[cfg(test)]
pub use water_aggregation_command::MockWaterAggregationCommand;
pub use water_aggregation_command::{AGGREGATION_STARTED, WaterAggregationCommand};
#[cfg(test)]
pub use water_quality_query::MockWaterQualityQuery;
pub use water_quality_query::WaterQualityQuery;
#[cfg(test)]
pub use water_quality_repository::MockWaterQualityRepository;
pub use water_quality_repository::{
    FixtureWaterQualityRepository, WaterQualityRepository, WaterQualityRepositoryError,
};
