//! Driven port for the filter product catalogue.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::filters::{
    FilterPerformance, FilterProduct, NewFilterPerformance, NewFilterProduct, attach_performance,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by filter catalogue storage adapters.
    pub enum FilterProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "filter product repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "filter product repository query failed: {message}",
    }
}

/// Port for reading and extending the product catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterProductRepository: Send + Sync {
    /// Return every product ordered by id, each with its performance rows.
    ///
    /// Products without performance rows carry an empty `performance` list.
    async fn list_with_performance(
        &self,
    ) -> Result<Vec<FilterProduct>, FilterProductRepositoryError>;

    /// Persist a product and return it with its generated id.
    async fn insert_product(
        &self,
        product: &NewFilterProduct,
    ) -> Result<FilterProduct, FilterProductRepositoryError>;

    /// Persist a performance row and return it with its generated id.
    async fn insert_performance(
        &self,
        row: &NewFilterPerformance,
    ) -> Result<FilterPerformance, FilterProductRepositoryError>;
}

#[derive(Debug, Default)]
struct FixtureCatalogue {
    products: Vec<FilterProduct>,
    performance: Vec<FilterPerformance>,
}

/// In-memory repository used when no database is configured.
#[derive(Debug, Default)]
pub struct FixtureFilterProductRepository {
    catalogue: Mutex<FixtureCatalogue>,
}

impl FixtureFilterProductRepository {
    fn with_catalogue<T>(
        &self,
        f: impl FnOnce(&mut FixtureCatalogue) -> Result<T, FilterProductRepositoryError>,
    ) -> Result<T, FilterProductRepositoryError> {
        let mut catalogue = self
            .catalogue
            .lock()
            .map_err(|_| FilterProductRepositoryError::query("fixture store poisoned"))?;
        f(&mut catalogue)
    }
}

fn next_id(len: usize) -> Result<i32, FilterProductRepositoryError> {
    i32::try_from(len)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or_else(|| FilterProductRepositoryError::query("fixture id space exhausted"))
}

#[async_trait]
impl FilterProductRepository for FixtureFilterProductRepository {
    async fn list_with_performance(
        &self,
    ) -> Result<Vec<FilterProduct>, FilterProductRepositoryError> {
        self.with_catalogue(|catalogue| {
            Ok(attach_performance(
                catalogue.products.clone(),
                catalogue.performance.clone(),
            ))
        })
    }

    async fn insert_product(
        &self,
        product: &NewFilterProduct,
    ) -> Result<FilterProduct, FilterProductRepositoryError> {
        self.with_catalogue(|catalogue| {
            let stored = FilterProduct {
                id: next_id(catalogue.products.len())?,
                name: product.name.clone(),
                brand: product.brand.clone(),
                description: product.description.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                affiliate_link: product.affiliate_link.clone(),
                category: product.category,
                performance: Vec::new(),
            };
            catalogue.products.push(stored.clone());
            Ok(stored)
        })
    }

    async fn insert_performance(
        &self,
        row: &NewFilterPerformance,
    ) -> Result<FilterPerformance, FilterProductRepositoryError> {
        self.with_catalogue(|catalogue| {
            let stored = FilterPerformance {
                id: next_id(catalogue.performance.len())?,
                filter_id: row.filter_id,
                contaminant: row.contaminant.clone(),
                removal_rate: row.removal_rate,
                certification: row.certification.clone(),
            };
            catalogue.performance.push(stored.clone());
            Ok(stored)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::FilterCategory;
    use rust_decimal::Decimal;

    fn jug() -> NewFilterProduct {
        NewFilterProduct {
            name: "Brita Marella".to_owned(),
            brand: "Brita".to_owned(),
            description: "Tischwasserfilter".to_owned(),
            price: Decimal::new(2499, 2),
            image_url: None,
            affiliate_link: None,
            category: FilterCategory::TableTop,
        }
    }

    #[tokio::test]
    async fn fixture_nests_performance_rows() {
        let repo = FixtureFilterProductRepository::default();
        let stored = repo.insert_product(&jug()).await.expect("insert product");
        repo.insert_product(&jug()).await.expect("insert second product");
        repo.insert_performance(&NewFilterPerformance {
            filter_id: Some(stored.id),
            contaminant: "Kalk".to_owned(),
            removal_rate: Decimal::new(80, 0),
            certification: None,
        })
        .await
        .expect("insert performance");

        let listed = repo.list_with_performance().await.expect("list");
        let counts: Vec<_> = listed.iter().map(|p| p.performance.len()).collect();
        assert_eq!(counts, vec![1, 0]);
    }
}
