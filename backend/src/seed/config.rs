//! Seeding configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Controls demo catalogue seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HYDROCHECK_SEED")]
pub struct SeedSettings {
    /// Insert the demo catalogue when stores are empty.
    #[ortho_config(default = true)]
    pub enabled: bool,
    /// Catalogue document replacing the bundled one.
    pub catalogue_path: Option<PathBuf>,
}

impl SeedSettings {
    /// Seeding enabled with the bundled catalogue.
    #[must_use]
    pub const fn bundled() -> Self {
        Self {
            enabled: true,
            catalogue_path: None,
        }
    }
}
