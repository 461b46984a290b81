//! Filter catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use water_contract::RecommendInput;

use crate::domain::Error;
use crate::domain::filters::{FilterProduct, RECOMMENDATION_LIMIT};
use crate::domain::ports::{
    FilterCatalogueQuery, FilterProductRepository, FilterProductRepositoryError,
};

/// Service implementing [`FilterCatalogueQuery`].
pub struct FilterCatalogueService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> FilterCatalogueService<R> {
    /// Create a service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> FilterCatalogueService<R>
where
    R: FilterProductRepository + ?Sized,
{
    fn map_repository_error(error: FilterProductRepositoryError) -> Error {
        match error {
            FilterProductRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("filter catalogue unavailable: {message}"))
            }
            FilterProductRepositoryError::Query { message } => {
                Error::internal(format!("filter catalogue error: {message}"))
            }
        }
    }

    async fn load(&self) -> Result<Vec<FilterProduct>, Error> {
        self.repo
            .list_with_performance()
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> FilterCatalogueQuery for FilterCatalogueService<R>
where
    R: FilterProductRepository + ?Sized,
{
    async fn list_filters(&self) -> Result<Vec<FilterProduct>, Error> {
        self.load().await
    }

    async fn recommend(&self, request: &RecommendInput) -> Result<Vec<FilterProduct>, Error> {
        // Household size and budget are accepted but do not rank products yet.
        debug!(plz = %request.plz, "recommendation requested");
        let mut products = self.load().await?;
        products.truncate(RECOMMENDATION_LIMIT);
        Ok(products)
    }
}
