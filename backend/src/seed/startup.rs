//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{FilterProductRepository, WaterQualityRepository};
use crate::domain::{CatalogueSeeder, CatalogueSeedingError, SeedCatalogue, SeedOutcome};
use crate::seed::config::SeedSettings;

/// Demo catalogue compiled into the binary.
pub const BUNDLED_CATALOGUE: &str = include_str!("../../fixtures/seed-catalogue.json");

/// Errors returned while seeding at startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Catalogue file could not be read.
    #[error("failed to read seed catalogue at {path}: {source}")]
    CatalogueRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Catalogue document is malformed.
    #[error("seed catalogue parse error: {0}")]
    CatalogueParse(#[from] serde_json::Error),
    /// A repository call failed.
    #[error(transparent)]
    Seeding(#[from] CatalogueSeedingError),
}

/// Seed the stores when enabled; `None` when seeding is switched off.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the catalogue cannot be loaded or a
/// repository call fails.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydrocheck::domain::ports::{FixtureFilterProductRepository, FixtureWaterQualityRepository};
/// use hydrocheck::seed::{SeedSettings, seed_on_startup};
/// use mockable::DefaultClock;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = seed_on_startup(
///     &SeedSettings::bundled(),
///     Arc::new(FixtureWaterQualityRepository::default()),
///     Arc::new(FixtureFilterProductRepository::default()),
///     Arc::new(DefaultClock),
/// )
/// .await?;
/// assert_eq!(outcome.map(|o| o.products), Some(3));
/// # Ok(())
/// # }
/// ```
pub async fn seed_on_startup(
    settings: &SeedSettings,
    water: Arc<dyn WaterQualityRepository>,
    filters: Arc<dyn FilterProductRepository>,
    clock: Arc<dyn Clock>,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "catalogue seeding skipped");
        return Ok(None);
    }

    let catalogue = match &settings.catalogue_path {
        Some(path) => load_catalogue(path)?,
        None => SeedCatalogue::from_json(BUNDLED_CATALOGUE)?,
    };
    let outcome = CatalogueSeeder::new(water, filters, clock)
        .seed(&catalogue)
        .await?;
    if outcome.is_noop() {
        info!("stores already seeded; nothing inserted");
    }
    Ok(Some(outcome))
}

/// Read a catalogue document from `path`.
///
/// # Errors
///
/// Returns [`StartupSeedingError::CatalogueRead`] when the file cannot be
/// read and [`StartupSeedingError::CatalogueParse`] when it is malformed.
pub fn load_catalogue(path: &Path) -> Result<SeedCatalogue, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::CatalogueRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "catalogue path must name a file",
        ))
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedCatalogue::from_json(&contents)?)
}
