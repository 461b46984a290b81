//! Water-quality lookup and aggregation services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use water_contract::{AggregateAck, AggregateInput};

use crate::domain::Error;
use crate::domain::ports::{
    AGGREGATION_STARTED, WaterAggregationCommand, WaterQualityQuery, WaterQualityRepository,
    WaterQualityRepositoryError,
};
use crate::domain::water_quality::{WaterQualityMetric, fallback_metrics};

/// What a lookup returns when no measurements are stored for a postal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyLookupPolicy {
    /// Serve three synthetic demo rows.
    Fallback,
    /// Report the postal code as not found.
    NotFound,
}

impl EmptyLookupPolicy {
    /// Policy selected by the mock-fallback switch.
    #[must_use]
    pub const fn from_switch(enabled: bool) -> Self {
        if enabled { Self::Fallback } else { Self::NotFound }
    }
}

/// Service implementing the water-quality driving ports.
pub struct WaterQualityService<R: ?Sized> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: EmptyLookupPolicy,
}

impl<R: ?Sized> WaterQualityService<R> {
    /// Create a service over `repo`. `clock` dates synthetic rows.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, policy: EmptyLookupPolicy) -> Self {
        Self {
            repo,
            clock,
            policy,
        }
    }
}

fn map_repository_error(error: WaterQualityRepositoryError) -> Error {
    match error {
        WaterQualityRepositoryError::Connection { message } => Error::service_unavailable(
            format!("water quality repository unavailable: {message}"),
        ),
        WaterQualityRepositoryError::Query { message } => {
            Error::internal(format!("water quality repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> WaterQualityQuery for WaterQualityService<R>
where
    R: WaterQualityRepository + ?Sized,
{
    async fn metrics_for_postal_code(&self, plz: &str) -> Result<Vec<WaterQualityMetric>, Error> {
        let rows = self
            .repo
            .find_by_postal_code(plz)
            .await
            .map_err(map_repository_error)?;
        if !rows.is_empty() {
            return Ok(rows);
        }

        match self.policy {
            EmptyLookupPolicy::Fallback => {
                debug!(plz, "no stored measurements; serving fallback rows");
                Ok(fallback_metrics(plz, self.clock.utc().date_naive()))
            }
            EmptyLookupPolicy::NotFound => Err(Error::not_found(format!(
                "no measurements recorded for postal code {plz}"
            ))),
        }
    }
}

#[async_trait]
impl<R> WaterAggregationCommand for WaterQualityService<R>
where
    R: WaterQualityRepository + ?Sized,
{
    async fn start_aggregation(&self, request: &AggregateInput) -> Result<AggregateAck, Error> {
        info!(plz = %request.plz, "aggregation requested");
        Ok(AggregateAck {
            message: AGGREGATION_STARTED.to_owned(),
        })
    }
}
