//! Driving port for browsing filter products.

use async_trait::async_trait;
use water_contract::RecommendInput;

use crate::domain::Error;
use crate::domain::filters::FilterProduct;

/// Domain use-case port for the product catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterCatalogueQuery: Send + Sync {
    /// Every product with its performance rows.
    async fn list_filters(&self) -> Result<Vec<FilterProduct>, Error>;

    /// Products suggested for the household described by `request`.
    async fn recommend(&self, request: &RecommendInput) -> Result<Vec<FilterProduct>, Error>;
}
