//! Shared wiring for HTTP integration suites.
//!
//! The app, fixture stores and login helper come from the crate's
//! `test-support` feature; this module only adds catalogue seeding.

use std::sync::Arc;

use hydrocheck::inbound::http::test_utils::FixtureRepositories;
use hydrocheck::seed::{SeedSettings, seed_on_startup};
use mockable::DefaultClock;

/// In-memory stores seeded with the bundled catalogue.
pub async fn seeded_repositories() -> FixtureRepositories {
    let repos = FixtureRepositories::new();
    seed_on_startup(
        &SeedSettings::bundled(),
        repos.water.clone(),
        repos.filters.clone(),
        Arc::new(DefaultClock),
    )
    .await
    .expect("seeding in-memory stores");
    repos
}
