//! ## radiomast-sizing::analytics
//! **Latency, billing, and signal estimates for reports**
//!
//! These figures are planning estimates derived from the generation profile
//! and the station load factor, not measurements.

use std::fmt;

use serde::{Deserialize, Serialize};

use radiomast_core::technology::Generation;

/// Estimated one-way latency in milliseconds.
///
/// Each generation has a base figure; the estimate grows linearly with load
/// up to three times base at full utilization. `load_factor` is expected in
/// `0.0..=1.0`.
pub fn latency_estimate_ms(generation: Generation, load_factor: f64) -> f64 {
    let base = match generation {
        Generation::Gsm => 150.0,
        Generation::Umts => 80.0,
        Generation::Lte => 30.0,
        Generation::Nr => 10.0,
    };
    base + load_factor * base * 2.0
}

/// Billing rate per message in dollars.
pub fn tariff_per_message(generation: Generation) -> f64 {
    match generation {
        Generation::Nr => 0.05,
        Generation::Lte => 0.03,
        Generation::Gsm | Generation::Umts => 0.01,
    }
}

/// Revenue for a message volume under the generation's tariff.
pub fn revenue(generation: Generation, messages: u64) -> f64 {
    messages as f64 * tariff_per_message(generation)
}

/// Coarse signal grade derived from the subscriber id.
///
/// Purely synthetic: the id is folded into a pseudo-score so listings show a
/// stable, varied column without any RF model behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SignalQuality {
    /// Grade for one subscriber. Deterministic per id.
    pub fn for_subscriber(id: u32) -> Self {
        let score = (u64::from(id) * 17) % 100;
        if score > 80 {
            SignalQuality::Excellent
        } else if score > 50 {
            SignalQuality::Good
        } else if score > 20 {
            SignalQuality::Fair
        } else {
            SignalQuality::Poor
        }
    }

    /// Listing label with the nominal received-power figure.
    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::Excellent => "Excellent (-60dBm)",
            SignalQuality::Good => "Good (-85dBm)",
            SignalQuality::Fair => "Fair (-100dBm)",
            SignalQuality::Poor => "Poor (-115dBm)",
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_base_figures_at_zero_load() {
        assert_eq!(latency_estimate_ms(Generation::Gsm, 0.0), 150.0);
        assert_eq!(latency_estimate_ms(Generation::Umts, 0.0), 80.0);
        assert_eq!(latency_estimate_ms(Generation::Lte, 0.0), 30.0);
        assert_eq!(latency_estimate_ms(Generation::Nr, 0.0), 10.0);
    }

    #[test]
    fn latency_triples_at_full_load() {
        assert_eq!(latency_estimate_ms(Generation::Nr, 1.0), 30.0);
        assert_eq!(latency_estimate_ms(Generation::Gsm, 1.0), 450.0);
    }

    #[test]
    fn tariff_by_generation() {
        assert_eq!(tariff_per_message(Generation::Nr), 0.05);
        assert_eq!(tariff_per_message(Generation::Lte), 0.03);
        assert_eq!(tariff_per_message(Generation::Umts), 0.01);
        assert_eq!(tariff_per_message(Generation::Gsm), 0.01);
    }

    #[test]
    fn revenue_scales_with_volume() {
        assert!((revenue(Generation::Lte, 100) - 3.0).abs() < 1e-9);
        assert_eq!(revenue(Generation::Nr, 0), 0.0);
    }

    #[test]
    fn signal_grades_follow_score_thresholds() {
        // Scores are (id * 17) % 100.
        assert_eq!(SignalQuality::for_subscriber(5), SignalQuality::Excellent); // 85
        assert_eq!(SignalQuality::for_subscriber(3), SignalQuality::Good); // 51
        assert_eq!(SignalQuality::for_subscriber(2), SignalQuality::Fair); // 34
        assert_eq!(SignalQuality::for_subscriber(1), SignalQuality::Poor); // 17
        assert_eq!(SignalQuality::for_subscriber(6), SignalQuality::Poor); // 2
    }

    #[test]
    fn grades_are_stable_per_id() {
        for id in 0..50 {
            assert_eq!(
                SignalQuality::for_subscriber(id),
                SignalQuality::for_subscriber(id)
            );
        }
    }
}
