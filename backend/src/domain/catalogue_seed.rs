//! Demo catalogue seeding.
//!
//! The seeder is check-then-insert: products are inserted only when the
//! catalogue is empty, and measurements only for postal codes without any
//! stored rows. Running it twice leaves the stores unchanged the second time.
//! Concurrent runs are not coordinated.

use std::collections::BTreeMap;
use std::sync::Arc;

use mockable::Clock;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::filters::{FilterCategory, NewFilterPerformance, NewFilterProduct};
use crate::domain::ports::{
    FilterProductRepository, FilterProductRepositoryError, WaterQualityRepository,
    WaterQualityRepositoryError,
};
use crate::domain::water_quality::{NewWaterQualityMetric, RiskLevel};

/// Seed document describing demo products and measurements.
///
/// Measurements carry no date; they are stamped with the seeding day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedCatalogue {
    /// Products inserted into an empty catalogue.
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    /// Measurements inserted per postal code.
    #[serde(default)]
    pub metrics: Vec<SeedMetric>,
}

/// Product entry of a [`SeedCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedProduct {
    /// Product name.
    pub name: String,
    /// Manufacturer.
    pub brand: String,
    /// Marketing description.
    pub description: String,
    /// Retail price in euro.
    pub price: Decimal,
    /// Installation category.
    pub category: FilterCategory,
    /// Outbound shop link.
    #[serde(default)]
    pub affiliate_link: Option<String>,
    /// Product image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Lab results for this product.
    #[serde(default)]
    pub performance: Vec<SeedPerformance>,
}

/// Lab result entry of a [`SeedProduct`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedPerformance {
    /// Contaminant label.
    pub contaminant: String,
    /// Removal rate in percent.
    pub removal_rate: Decimal,
    /// Certification label.
    #[serde(default)]
    pub certification: Option<String>,
}

/// Measurement entry of a [`SeedCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedMetric {
    /// Postal code.
    pub plz: String,
    /// Municipality.
    pub city: String,
    /// Contaminant label.
    pub contamination_type: String,
    /// Measured concentration.
    pub measured_value: Decimal,
    /// Unit of both values.
    pub unit: String,
    /// Legal limit.
    pub limit_value: Decimal,
    /// Publisher.
    pub data_source: String,
    /// Stored severity label.
    pub risk_level: RiskLevel,
    /// Tenancy-law advisory text.
    #[serde(default)]
    pub legal_advice: Option<String>,
}

impl SeedCatalogue {
    /// Parse a seed document from JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the document is malformed.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

/// Counts of rows written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Products inserted.
    pub products: usize,
    /// Performance rows inserted.
    pub performance: usize,
    /// Measurements inserted.
    pub metrics: usize,
}

impl SeedOutcome {
    /// Whether the run wrote nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.products == 0 && self.performance == 0 && self.metrics == 0
    }
}

/// Errors raised while seeding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueSeedingError {
    /// Product or performance storage failed.
    #[error("seeding filter catalogue failed: {0}")]
    Filters(#[from] FilterProductRepositoryError),
    /// Measurement storage failed.
    #[error("seeding water quality metrics failed: {0}")]
    Metrics(#[from] WaterQualityRepositoryError),
}

/// Applies a [`SeedCatalogue`] to the repositories.
pub struct CatalogueSeeder<W: ?Sized, F: ?Sized> {
    water: Arc<W>,
    filters: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<W, F> CatalogueSeeder<W, F>
where
    W: WaterQualityRepository + ?Sized,
    F: FilterProductRepository + ?Sized,
{
    /// Create a seeder over the given repositories.
    pub fn new(water: Arc<W>, filters: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            water,
            filters,
            clock,
        }
    }

    /// Insert whatever part of `catalogue` is missing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueSeedingError`] when a repository call fails. Rows
    /// written before the failure are kept.
    pub async fn seed(
        &self,
        catalogue: &SeedCatalogue,
    ) -> Result<SeedOutcome, CatalogueSeedingError> {
        let mut outcome = SeedOutcome::default();
        self.seed_products(catalogue, &mut outcome).await?;
        self.seed_metrics(catalogue, &mut outcome).await?;
        info!(
            products = outcome.products,
            performance = outcome.performance,
            metrics = outcome.metrics,
            "catalogue seeding finished"
        );
        Ok(outcome)
    }

    async fn seed_products(
        &self,
        catalogue: &SeedCatalogue,
        outcome: &mut SeedOutcome,
    ) -> Result<(), CatalogueSeedingError> {
        if !self.filters.list_with_performance().await?.is_empty() {
            debug!("filter catalogue already populated; skipping products");
            return Ok(());
        }

        for entry in &catalogue.products {
            let stored = self
                .filters
                .insert_product(&NewFilterProduct {
                    name: entry.name.clone(),
                    brand: entry.brand.clone(),
                    description: entry.description.clone(),
                    price: entry.price,
                    image_url: entry.image_url.clone(),
                    affiliate_link: entry.affiliate_link.clone(),
                    category: entry.category,
                })
                .await?;
            outcome.products += 1;

            for result in &entry.performance {
                self.filters
                    .insert_performance(&NewFilterPerformance {
                        filter_id: Some(stored.id),
                        contaminant: result.contaminant.clone(),
                        removal_rate: result.removal_rate,
                        certification: result.certification.clone(),
                    })
                    .await?;
                outcome.performance += 1;
            }
        }
        Ok(())
    }

    async fn seed_metrics(
        &self,
        catalogue: &SeedCatalogue,
        outcome: &mut SeedOutcome,
    ) -> Result<(), CatalogueSeedingError> {
        let mut by_plz: BTreeMap<&str, Vec<&SeedMetric>> = BTreeMap::new();
        for metric in &catalogue.metrics {
            by_plz.entry(metric.plz.as_str()).or_default().push(metric);
        }

        let today = self.clock.utc().date_naive();
        for (plz, metrics) in by_plz {
            if !self.water.find_by_postal_code(plz).await?.is_empty() {
                debug!(plz, "measurements already present; skipping");
                continue;
            }
            for metric in metrics {
                self.water
                    .insert(&NewWaterQualityMetric {
                        plz: metric.plz.clone(),
                        city: metric.city.clone(),
                        contamination_type: metric.contamination_type.clone(),
                        measured_value: metric.measured_value,
                        unit: metric.unit.clone(),
                        limit_value: metric.limit_value,
                        measurement_date: today,
                        data_source: metric.data_source.clone(),
                        risk_level: metric.risk_level,
                        legal_advice: metric.legal_advice.clone(),
                    })
                    .await?;
                outcome.metrics += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureFilterProductRepository, FixtureWaterQualityRepository, MockFilterProductRepository,
        MockWaterQualityRepository,
    };
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    const CATALOGUE: &str = r#"{
        "products": [
            {
                "name": "Alb Filter Active S",
                "brand": "Alb Filter",
                "description": "Untertischfilter",
                "price": "159.90",
                "category": "under-sink",
                "performance": [
                    { "contaminant": "PFAS", "removalRate": "99.5", "certification": "NSF 53" },
                    { "contaminant": "Blei", "removalRate": "99.0" }
                ]
            },
            {
                "name": "Brita Marella",
                "brand": "Brita",
                "description": "Tischwasserfilter",
                "price": "24.99",
                "category": "table-top"
            }
        ],
        "metrics": [
            {
                "plz": "10115", "city": "Berlin", "contaminationType": "PFAS",
                "measuredValue": "18.5", "unit": "ng/L", "limitValue": "20.0",
                "dataSource": "UBA 2026 Analyse", "riskLevel": "medium"
            }
        ]
    }"#;

    #[fixture]
    fn catalogue() -> SeedCatalogue {
        SeedCatalogue::from_json(CATALOGUE).expect("valid catalogue")
    }

    #[rstest]
    #[tokio::test]
    async fn second_run_inserts_nothing(catalogue: SeedCatalogue) {
        let water = Arc::new(FixtureWaterQualityRepository::default());
        let filters = Arc::new(FixtureFilterProductRepository::default());
        let seeder = CatalogueSeeder::new(water.clone(), filters.clone(), Arc::new(DefaultClock));

        let first = seeder.seed(&catalogue).await.expect("first run");
        let second = seeder.seed(&catalogue).await.expect("second run");

        assert_eq!(
            first,
            SeedOutcome {
                products: 2,
                performance: 2,
                metrics: 1
            }
        );
        assert!(second.is_noop());
        let products = filters.list_with_performance().await.expect("list");
        assert_eq!(products.len(), 2);
        let pfas = water.find_by_postal_code("10115").await.expect("lookup");
        assert_eq!(pfas.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn populated_catalogue_is_left_alone(catalogue: SeedCatalogue) {
        let mut filters = MockFilterProductRepository::new();
        filters
            .expect_list_with_performance()
            .times(1)
            .return_once(|| Ok(vec![sample_product()]));
        filters.expect_insert_product().times(0);

        let mut water = MockWaterQualityRepository::new();
        water
            .expect_find_by_postal_code()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        water
            .expect_insert()
            .times(1)
            .returning(|metric| Ok(stored(metric)));

        let seeder = CatalogueSeeder::new(
            Arc::new(water),
            Arc::new(filters),
            Arc::new(DefaultClock),
        );
        let outcome = seeder.seed(&catalogue).await.expect("seeded");

        assert_eq!(outcome.products, 0);
        assert_eq!(outcome.metrics, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failures_abort_the_run(catalogue: SeedCatalogue) {
        let mut filters = MockFilterProductRepository::new();
        filters
            .expect_list_with_performance()
            .return_once(|| Err(FilterProductRepositoryError::connection("refused")));
        let water = MockWaterQualityRepository::new();

        let seeder =
            CatalogueSeeder::new(Arc::new(water), Arc::new(filters), Arc::new(DefaultClock));
        let err = seeder.seed(&catalogue).await.expect_err("failure");

        assert!(matches!(err, CatalogueSeedingError::Filters(_)));
    }

    #[rstest]
    fn unknown_fields_are_rejected() {
        let result = SeedCatalogue::from_json(r#"{ "products": [], "users": [] }"#);
        assert!(result.is_err());
    }

    fn sample_product() -> crate::domain::filters::FilterProduct {
        crate::domain::filters::FilterProduct {
            id: 1,
            name: "Existing".to_owned(),
            brand: "Brand".to_owned(),
            description: "Already stored".to_owned(),
            price: Decimal::new(100, 0),
            image_url: None,
            affiliate_link: None,
            category: FilterCategory::WholeHouse,
            performance: Vec::new(),
        }
    }

    fn stored(metric: &NewWaterQualityMetric) -> crate::domain::water_quality::WaterQualityMetric {
        crate::domain::water_quality::WaterQualityMetric {
            id: 1,
            plz: metric.plz.clone(),
            city: metric.city.clone(),
            contamination_type: metric.contamination_type.clone(),
            measured_value: metric.measured_value,
            unit: metric.unit.clone(),
            limit_value: metric.limit_value,
            measurement_date: metric.measurement_date,
            data_source: metric.data_source.clone(),
            risk_level: metric.risk_level,
            legal_advice: metric.legal_advice.clone(),
        }
    }
}
