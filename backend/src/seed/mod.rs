//! Startup wiring for demo catalogue seeding.

mod config;
mod startup;

pub use config::SeedSettings;
pub use startup::{BUNDLED_CATALOGUE, StartupSeedingError, load_catalogue, seed_on_startup};
