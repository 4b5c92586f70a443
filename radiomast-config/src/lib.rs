//! # Radiomast Configuration System
//!
//! Hierarchical configuration for the capacity planner: defaults, YAML
//! files, and environment overrides merged in that order, validated before
//! anything downstream sees a value.
//!
//! ## Features
//! - **Unified Configuration**: one container covering station, sizing, and
//!   simulation parameters
//! - **Validation**: range and token checks run at load time, not at use
//! - **Environment Awareness**: `RADIOMAST_ENV` selects an override file
//! - **Deployment Plans**: the `key=value` plan format is parsed here too
//!
//! Plan files ([`plan`]) are deliberately separate from YAML configuration:
//! a plan is an ordered script (configuration lines take effect for the
//! subscriber lines after them), while YAML configuration is positionless.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
pub mod plan;
mod simulation;
mod sizing;
mod station;
mod validation;

pub use error::ConfigError;
pub use plan::{DeploymentPlan, PlanEntry, PlanError, SkippedLine};
pub use simulation::SimulationConfig;
pub use sizing::SizingConfig;
pub use station::StationConfig;

/// Top-level configuration container for all radiomast components.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct RadiomastConfig {
    /// Radio parameters of the station (technology, spectrum, antennas).
    #[validate(nested)]
    pub station: StationConfig,

    /// Core-network sizing constants.
    #[validate(nested)]
    pub sizing: SizingConfig,

    /// Transmission simulation parameters.
    #[validate(nested)]
    pub simulation: SimulationConfig,
}

/// Base settings file consulted by [`RadiomastConfig::load`].
const BASE_FILE: &str = "config/radiomast.yaml";

impl RadiomastConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/radiomast.yaml` - base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - environment-specific overrides.
    /// 4. `RADIOMAST_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(RadiomastConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            println!("{BASE_FILE} not found, using default configuration");
        }

        let env = std::env::var("RADIOMAST_ENV").unwrap_or_else(|_| "production".into());
        let overlay = format!("config/{env}.yaml");
        if Path::new(&overlay).exists() {
            figment = figment.merge(Yaml::file(overlay));
        }

        Self::finish(figment)
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Self::finish(
            Figment::from(Serialized::defaults(RadiomastConfig::default()))
                .merge(Yaml::file(path)),
        )
    }

    /// Applies the `RADIOMAST_*` environment layer, then extracts and
    /// validates in one place for both load paths.
    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .merge(Env::prefixed("RADIOMAST_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }
}
