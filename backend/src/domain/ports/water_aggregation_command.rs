//! Driving port for triggering source aggregation.

use async_trait::async_trait;
use water_contract::{AggregateAck, AggregateInput};

use crate::domain::Error;

/// Acknowledgement message returned once aggregation is accepted.
pub const AGGREGATION_STARTED: &str = "Aggregation started";

/// Domain use-case port for starting an aggregation run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaterAggregationCommand: Send + Sync {
    /// Accept an aggregation request for the given postal code.
    async fn start_aggregation(&self, request: &AggregateInput) -> Result<AggregateAck, Error>;
}
