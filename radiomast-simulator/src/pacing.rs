//! # Pacing Models for Transmission
//!
//! Provides models for the per-message delay of a transmitting device.
//!
//! ## Models:
//! - `JitterPacer`: fixed base delay plus uniform random jitter.
//! - `NoopPacer`: no delay (batch runs and tests).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// Trait for message pacing models.
pub trait Pacer: Send + Sync {
    /// Delay to wait before the next message is transmitted.
    fn next_delay(&mut self) -> Duration;
}

/// A pacer that waits a fixed base delay plus a uniform random jitter.
#[derive(Debug)]
pub struct JitterPacer {
    base: Duration,
    /// Maximum jitter magnitude in milliseconds.
    magnitude_ms: u64,
    /// Mutex-protected small RNG for thread safety.
    rng: Mutex<SmallRng>,
}

impl JitterPacer {
    /// Creates a pacer seeded from system entropy.
    pub fn new(base_delay_ms: u64, magnitude_ms: u64) -> Self {
        Self {
            base: Duration::from_millis(base_delay_ms),
            magnitude_ms,
            rng: Mutex::new(SmallRng::from_rng(&mut rand::rng())),
        }
    }

    /// Creates a pacer with a fixed seed for reproducible runs.
    pub fn seeded(base_delay_ms: u64, magnitude_ms: u64, seed: u64) -> Self {
        Self {
            base: Duration::from_millis(base_delay_ms),
            magnitude_ms,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl Pacer for JitterPacer {
    #[inline]
    fn next_delay(&mut self) -> Duration {
        let added_ms = self.rng.lock().unwrap().random_range(0..=self.magnitude_ms);
        self.base + Duration::from_millis(added_ms)
    }
}

/// A pacer that never waits.
#[derive(Debug, Clone, Copy)]
pub struct NoopPacer;

impl Pacer for NoopPacer {
    #[inline]
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}
