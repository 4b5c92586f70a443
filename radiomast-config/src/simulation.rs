//! Transmission simulation configuration.
//!
//! None of these parameters affect placement or sizing results; they shape
//! the cosmetic per-message pacing and the interference display during a
//! simulation run.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Parameters for the per-subscriber transmission simulation.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SimulationConfig {
    /// Base seed for per-device jitter. Each device derives its own stream
    /// from this seed and its subscriber id, so runs are reproducible.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Fixed component of the per-message delay.
    #[validate(range(max = 10_000))]
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound of the random jitter added to each message delay.
    #[validate(range(max = 10_000))]
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Interference probability at full station load, in percent.
    #[validate(range(max = 100))]
    #[serde(default = "default_max_interference_pct")]
    pub max_interference_pct: u32,

    /// When false, devices transmit without pacing delays. Used by tests
    /// and batch runs where wall-clock realism is unwanted.
    #[serde(default = "default_true")]
    pub realtime: bool,
}

fn default_seed() -> u64 {
    42
}
fn default_base_delay_ms() -> u64 {
    100
}
fn default_jitter_ms() -> u64 {
    100
}
fn default_max_interference_pct() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            base_delay_ms: default_base_delay_ms(),
            jitter_ms: default_jitter_ms(),
            max_interference_pct: default_max_interference_pct(),
            realtime: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn valid_default_simulation_config() {
        let config = SimulationConfig::default();
        config.validate().expect("Default config should be valid");
    }

    #[test]
    fn interference_is_capped_at_one_hundred_percent() {
        let mut config = SimulationConfig::default();
        config.max_interference_pct = 101;
        assert!(config.validate().is_err());
    }
}
