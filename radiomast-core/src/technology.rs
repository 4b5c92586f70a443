//! ## radiomast-core::technology
//! **Radio generation profiles and the usage-validation law**
//!
//! The technology set is closed: one profile per cellular generation, each
//! carrying two spectral constants (subscribers per channel before antenna
//! multiplexing, channel width in kHz) and a generation-specific ceiling on
//! declared message traffic.
//!
//! 2G is circuit-switched and distinguishes data from voice traffic, with a
//! hard cap on each. 3G onwards everything is packet-switched: the declared
//! traffic type is ignored and a uniform packet cap applies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::subscriber::TrafficClass;

/// Message cap for 2G data service.
pub const GSM_DATA_LIMIT: u32 = 5;
/// Message cap for 2G voice service.
pub const GSM_VOICE_LIMIT: u32 = 15;
/// Uniform message cap for the packet-switched generations (3G+).
pub const PACKET_LIMIT: u32 = 10;

/// Raised when a technology token is not one of `2G`, `3G`, `4G`, `5G`.
///
/// This is fatal to the configuration attempt that produced it; there is no
/// fallback generation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown technology: {0}")]
pub struct UnknownTechnology(pub String);

/// Errors raised by [`Generation::validate_usage`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    /// The declared message count exceeds the generation's service cap.
    #[error("{generation} {service} limit exceeded: max {limit} messages allowed, got {requested}")]
    LimitExceeded {
        generation: Generation,
        service: &'static str,
        limit: u32,
        requested: u32,
    },
    /// 2G only: the declared traffic type is neither `data` nor `voice`.
    #[error("invalid traffic type {declared:?}: must be \"data\" or \"voice\"")]
    InvalidTrafficType { declared: String },
}

/// One cellular generation, the unit of radio configuration.
///
/// Profile constants are immutable; swapping the generation on a station
/// invalidates any previously computed allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Generation {
    /// 2G (GSM): circuit-switched, narrow data pipes.
    Gsm,
    /// 3G (UMTS): packet-switched, same 200 kHz carriers as GSM.
    Umts,
    /// 4G (LTE): packet-switched, fine-grained 10 kHz subcarriers.
    Lte,
    /// 5G (NR): packet-switched, wideband 1 MHz carriers.
    Nr,
}

impl Generation {
    /// Every profile, oldest first.
    pub const ALL: [Generation; 4] = [
        Generation::Gsm,
        Generation::Umts,
        Generation::Lte,
        Generation::Nr,
    ];

    /// Marketing label, also the parse token.
    pub fn label(&self) -> &'static str {
        match self {
            Generation::Gsm => "2G",
            Generation::Umts => "3G",
            Generation::Lte => "4G",
            Generation::Nr => "5G",
        }
    }

    /// Simultaneous subscribers one channel carries before antenna
    /// multiplexing is applied.
    pub fn users_per_channel(&self) -> u32 {
        match self {
            Generation::Gsm => 16,
            Generation::Umts => 32,
            Generation::Lte => 30,
            Generation::Nr => 30,
        }
    }

    /// Spectral width of a single channel in kHz.
    pub fn channel_bandwidth_khz(&self) -> u32 {
        match self {
            Generation::Gsm | Generation::Umts => 200,
            Generation::Lte => 10,
            Generation::Nr => 1000,
        }
    }

    /// Number of whole channels the given spectrum allotment yields.
    ///
    /// Truncating division: bandwidth below one channel's width yields zero
    /// channels, as does any non-positive bandwidth.
    pub fn channels_for_bandwidth(&self, bandwidth_mhz: f64) -> u32 {
        // The float-to-int cast saturates, so negative and NaN inputs land
        // on zero without a separate guard.
        let spectrum_khz = (bandwidth_mhz * 1000.0) as u32;
        spectrum_khz / self.channel_bandwidth_khz()
    }

    /// Checks a declared traffic type and message count against this
    /// generation's service caps.
    ///
    /// 3G+ profiles ignore the traffic type entirely and apply only the
    /// packet cap; a nonsense type that 2G would reject passes under them.
    pub fn validate_usage(&self, traffic: &str, messages: u32) -> Result<(), UsageError> {
        match self {
            Generation::Gsm => match TrafficClass::classify(traffic) {
                Some(TrafficClass::Data) if messages > GSM_DATA_LIMIT => {
                    Err(UsageError::LimitExceeded {
                        generation: *self,
                        service: "data",
                        limit: GSM_DATA_LIMIT,
                        requested: messages,
                    })
                }
                Some(TrafficClass::Voice) if messages > GSM_VOICE_LIMIT => {
                    Err(UsageError::LimitExceeded {
                        generation: *self,
                        service: "voice",
                        limit: GSM_VOICE_LIMIT,
                        requested: messages,
                    })
                }
                Some(_) => Ok(()),
                None => Err(UsageError::InvalidTrafficType {
                    declared: traffic.to_string(),
                }),
            },
            Generation::Umts | Generation::Lte | Generation::Nr => {
                if messages > PACKET_LIMIT {
                    Err(UsageError::LimitExceeded {
                        generation: *self,
                        service: "packet",
                        limit: PACKET_LIMIT,
                        requested: messages,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Generation {
    type Err = UnknownTechnology;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_uppercase().as_str() {
            "2G" => Ok(Generation::Gsm),
            "3G" => Ok(Generation::Umts),
            "4G" => Ok(Generation::Lte),
            "5G" => Ok(Generation::Nr),
            _ => Err(UnknownTechnology(token.to_string())),
        }
    }
}

impl TryFrom<String> for Generation {
    type Error = UnknownTechnology;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Generation> for String {
    fn from(generation: Generation) -> Self {
        generation.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn profile_constants() {
        assert_eq!(Generation::Gsm.users_per_channel(), 16);
        assert_eq!(Generation::Gsm.channel_bandwidth_khz(), 200);
        assert_eq!(Generation::Umts.users_per_channel(), 32);
        assert_eq!(Generation::Umts.channel_bandwidth_khz(), 200);
        assert_eq!(Generation::Lte.users_per_channel(), 30);
        assert_eq!(Generation::Lte.channel_bandwidth_khz(), 10);
        assert_eq!(Generation::Nr.users_per_channel(), 30);
        assert_eq!(Generation::Nr.channel_bandwidth_khz(), 1000);
    }

    #[test]
    fn parses_known_tokens() {
        assert_eq!("2G".parse::<Generation>().unwrap(), Generation::Gsm);
        assert_eq!("3G".parse::<Generation>().unwrap(), Generation::Umts);
        assert_eq!("4G".parse::<Generation>().unwrap(), Generation::Lte);
        assert_eq!("5G".parse::<Generation>().unwrap(), Generation::Nr);
        // Token casing is forgiven; everything else is not.
        assert_eq!("5g".parse::<Generation>().unwrap(), Generation::Nr);
    }

    #[test]
    fn rejects_unknown_token() {
        let err = "6G".parse::<Generation>().unwrap_err();
        assert_eq!(err, UnknownTechnology("6G".to_string()));
    }

    #[test]
    fn lte_channels_for_one_megahertz() {
        // 1.0 MHz over 10 kHz carriers.
        assert_eq!(Generation::Lte.channels_for_bandwidth(1.0), 100);
    }

    #[test]
    fn bandwidth_below_one_channel_yields_zero() {
        assert_eq!(Generation::Gsm.channels_for_bandwidth(0.1), 0);
        assert_eq!(Generation::Nr.channels_for_bandwidth(0.999), 0);
        assert_eq!(Generation::Lte.channels_for_bandwidth(0.0), 0);
        assert_eq!(Generation::Lte.channels_for_bandwidth(-2.0), 0);
    }

    #[test]
    fn gsm_enforces_split_service_caps() {
        assert!(Generation::Gsm.validate_usage("data", 5).is_ok());
        assert!(matches!(
            Generation::Gsm.validate_usage("data", 6),
            Err(UsageError::LimitExceeded { limit: 5, .. })
        ));
        assert!(Generation::Gsm.validate_usage("voice", 15).is_ok());
        assert!(matches!(
            Generation::Gsm.validate_usage("voice", 16),
            Err(UsageError::LimitExceeded { limit: 15, .. })
        ));
    }

    #[test]
    fn gsm_rejects_unknown_traffic_type() {
        assert!(matches!(
            Generation::Gsm.validate_usage("video", 1),
            Err(UsageError::InvalidTrafficType { .. })
        ));
    }

    #[test]
    fn traffic_type_match_is_case_insensitive() {
        assert!(Generation::Gsm.validate_usage("DATA", 3).is_ok());
        assert!(Generation::Gsm.validate_usage("Voice", 10).is_ok());
    }

    #[test]
    fn packet_generations_ignore_traffic_type() {
        // The type string never reaches a validity check past 2G.
        for generation in [Generation::Umts, Generation::Lte, Generation::Nr] {
            assert!(generation.validate_usage("video", 10).is_ok());
            assert!(matches!(
                generation.validate_usage("video", 11),
                Err(UsageError::LimitExceeded { limit: 10, .. })
            ));
        }
    }

    #[test]
    fn lte_reference_admissions() {
        assert!(Generation::Lte.validate_usage("data", 8).is_ok());
        assert!(Generation::Lte.validate_usage("data", 9).is_ok());
        assert!(Generation::Lte.validate_usage("data", 11).is_err());
    }

    proptest! {
        #[test]
        fn channel_count_monotonic_in_bandwidth(
            lo in 0.0f64..500.0,
            delta in 0.0f64..500.0,
        ) {
            for generation in Generation::ALL {
                prop_assert!(
                    generation.channels_for_bandwidth(lo)
                        <= generation.channels_for_bandwidth(lo + delta)
                );
            }
        }

        #[test]
        fn zero_bandwidth_always_zero_channels(generation in prop::sample::select(&Generation::ALL[..])) {
            prop_assert_eq!(generation.channels_for_bandwidth(0.0), 0);
        }
    }
}
