//! Core-network sizing configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Constants feeding the overhead and core-count formulas.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SizingConfig {
    /// Protocol overhead messages injected per started block of 100 payload
    /// messages.
    #[validate(range(max = 1_000))]
    #[serde(default = "default_overhead_per_100")]
    pub overhead_per_100: u32,

    /// Messages one processing core absorbs.
    #[validate(range(min = 1, max = 1_000_000))]
    #[serde(default = "default_core_capacity_msgs")]
    pub core_capacity_msgs: u32,
}

fn default_overhead_per_100() -> u32 {
    10
}
fn default_core_capacity_msgs() -> u32 {
    500
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            overhead_per_100: default_overhead_per_100(),
            core_capacity_msgs: default_core_capacity_msgs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn valid_default_sizing_config() {
        let config = SizingConfig::default();
        config.validate().expect("Default config should be valid");
        assert_eq!(config.overhead_per_100, 10);
        assert_eq!(config.core_capacity_msgs, 500);
    }

    #[test]
    fn zero_core_capacity_is_invalid() {
        let mut config = SizingConfig::default();
        config.core_capacity_msgs = 0;
        assert!(config.validate().is_err());
    }
}
