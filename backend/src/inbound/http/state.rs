//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    FilterCatalogueQuery, FilterProductRepository, UserScanRepository, UserScansCommand,
    UserScansQuery, WaterAggregationCommand, WaterQualityQuery, WaterQualityRepository,
};
use crate::domain::{
    EmptyLookupPolicy, FilterCatalogueService, UserScanService, WaterQualityService,
};

/// Driven ports the HTTP services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub water: Arc<dyn WaterQualityRepository>,
    pub filters: Arc<dyn FilterProductRepository>,
    pub scans: Arc<dyn UserScanRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub water: Arc<dyn WaterQualityQuery>,
    pub aggregation: Arc<dyn WaterAggregationCommand>,
    pub filters: Arc<dyn FilterCatalogueQuery>,
    pub scans: Arc<dyn UserScansCommand>,
    pub scans_query: Arc<dyn UserScansQuery>,
}

impl HttpState {
    /// Wire the domain services over `repos`.
    ///
    /// `clock` dates fallback rows; `policy` decides what an empty water
    /// lookup returns.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use hydrocheck::domain::EmptyLookupPolicy;
    /// use hydrocheck::domain::ports::{
    ///     FixtureFilterProductRepository, FixtureUserScanRepository,
    ///     FixtureWaterQualityRepository,
    /// };
    /// use hydrocheck::inbound::http::state::{HttpState, Repositories};
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_repositories(
    ///     Repositories {
    ///         water: Arc::new(FixtureWaterQualityRepository::default()),
    ///         filters: Arc::new(FixtureFilterProductRepository::default()),
    ///         scans: Arc::new(FixtureUserScanRepository::default()),
    ///     },
    ///     Arc::new(DefaultClock),
    ///     EmptyLookupPolicy::Fallback,
    /// );
    /// let _water = state.water.clone();
    /// ```
    pub fn from_repositories(
        repos: Repositories,
        clock: Arc<dyn Clock>,
        policy: EmptyLookupPolicy,
    ) -> Self {
        let water = Arc::new(WaterQualityService::new(repos.water, clock, policy));
        let scans = Arc::new(UserScanService::new(repos.scans));
        Self {
            water: water.clone(),
            aggregation: water,
            filters: Arc::new(FilterCatalogueService::new(repos.filters)),
            scans: scans.clone(),
            scans_query: scans,
        }
    }
}
