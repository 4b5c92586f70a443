//! Station radio configuration.
//!
//! Mirrors what an operator would set on one base station: the technology
//! generation, the spectrum allotment, the antenna count, and the placement
//! strategy used when subscribers are assigned to channels.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use radiomast_core::technology::{Generation, UnknownTechnology};

use crate::validation;

/// Radio parameters of one station.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct StationConfig {
    /// Technology generation token (`2G`, `3G`, `4G`, `5G`).
    #[validate(custom(function = validation::validate_technology))]
    #[serde(default = "default_technology")]
    pub technology: String,

    /// Spectrum allotment in MHz.
    #[validate(range(min = 0.0, max = 10_000.0))]
    #[serde(default = "default_bandwidth_mhz")]
    pub bandwidth_mhz: f64,

    /// MIMO antenna count. Zero is clamped to one when capacity is computed.
    #[validate(range(max = 64))]
    #[serde(default = "default_antennas")]
    pub antennas: u32,

    /// Placement strategy token. Unrecognized tokens fall back to best-fit
    /// downstream, so this field is not validated strictly.
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_technology() -> String {
    "4G".into()
}
fn default_bandwidth_mhz() -> f64 {
    1.0
}
fn default_antennas() -> u32 {
    4
}
fn default_strategy() -> String {
    "best_fit".into()
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            technology: default_technology(),
            bandwidth_mhz: default_bandwidth_mhz(),
            antennas: default_antennas(),
            strategy: default_strategy(),
        }
    }
}

impl StationConfig {
    /// Parsed generation for the configured technology token.
    pub fn generation(&self) -> Result<Generation, UnknownTechnology> {
        self.technology.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn valid_default_station_config() {
        let config = StationConfig::default();
        config.validate().expect("Default config should be valid");
        assert_eq!(config.generation().unwrap(), Generation::Lte);
    }

    #[test]
    fn rejects_unknown_technology_token() {
        let mut config = StationConfig::default();
        config.technology = "6G".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn technology_token_casing_is_accepted() {
        let mut config = StationConfig::default();
        config.technology = "5g".into();
        config.validate().expect("Lowercase token should pass");
        assert_eq!(config.generation().unwrap(), Generation::Nr);
    }

    #[test]
    fn rejects_negative_bandwidth() {
        let mut config = StationConfig::default();
        config.bandwidth_mhz = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn strategy_token_is_not_validated() {
        let mut config = StationConfig::default();
        config.strategy = "tetris".into();
        config.validate().expect("Strategy falls back downstream");
    }
}
