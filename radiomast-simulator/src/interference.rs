//! # Interference Models for Transmission
//!
//! Provides models deciding whether a message transmission is disturbed.
//! Disturbed messages are retried and still delivered; the flag only shapes
//! the simulation output.
//!
//! ## Models:
//! - `LoadInterference`: disturbance chance grows with station load.
//! - `NoInterference`: never disturbs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Trait for interference models.
pub trait InterferenceModel: Send + Sync {
    /// Determines if the next message transmission is disturbed.
    fn disturbs(&mut self) -> bool;
}

/// Load-proportional interference: at full station load the disturbance
/// chance reaches `max_pct` percent, scaling linearly below that.
#[derive(Debug)]
pub struct LoadInterference {
    /// Disturbance chance in percent, clamped to 0..=100.
    chance_pct: u32,
    /// Mutex-protected RNG for the per-message roll.
    rng: Mutex<SmallRng>,
}

impl LoadInterference {
    /// Creates a model from the station load factor, seeded from system
    /// entropy. The chance truncates to whole percent.
    pub fn from_load(load_factor: f64, max_pct: u32) -> Self {
        Self {
            chance_pct: Self::chance(load_factor, max_pct),
            rng: Mutex::new(SmallRng::from_rng(&mut rand::rng())),
        }
    }

    /// Creates a model with a fixed seed for reproducible runs.
    pub fn seeded(load_factor: f64, max_pct: u32, seed: u64) -> Self {
        Self {
            chance_pct: Self::chance(load_factor, max_pct),
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Disturbance chance in percent.
    pub fn chance_pct(&self) -> u32 {
        self.chance_pct
    }

    /// Chance a load factor maps to, without building a model. Truncates to
    /// whole percent and clamps to 0..=100.
    pub fn chance_for(load_factor: f64, max_pct: u32) -> u32 {
        Self::chance(load_factor, max_pct)
    }

    fn chance(load_factor: f64, max_pct: u32) -> u32 {
        let raw = (load_factor.max(0.0) * f64::from(max_pct)) as u32;
        raw.min(100)
    }
}

impl InterferenceModel for LoadInterference {
    #[inline]
    fn disturbs(&mut self) -> bool {
        self.rng.lock().unwrap().random_range(0..100) < self.chance_pct
    }
}

/// A model that never disturbs a transmission.
#[derive(Debug, Clone, Copy)]
pub struct NoInterference;

impl InterferenceModel for NoInterference {
    #[inline]
    fn disturbs(&mut self) -> bool {
        false
    }
}
