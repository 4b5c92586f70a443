//! ## radiomast-tower::spectrum
//! **Immutable allocation snapshots**
//!
//! A snapshot is the unit handed to everything downstream of an allocation
//! pass: reporting, rendering, the transmission simulation. It carries a
//! BLAKE3 digest so two runs over the same input can be checked for
//! identical placement without diffing tables.

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use radiomast_core::technology::Generation;

/// Point-in-time copy of one station's configuration and channel table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSnapshot {
    pub generation: Option<Generation>,
    pub bandwidth_mhz: f64,
    pub antennas: u32,
    pub per_channel_capacity: u32,
    /// Channel slot -> subscriber ids, in placement order.
    pub channels: Vec<Vec<u32>>,
}

impl SpectrumSnapshot {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channels_used(&self) -> usize {
        self.channels.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Subscribers placed across all channels.
    pub fn placed(&self) -> usize {
        self.channels.iter().map(Vec::len).sum()
    }

    /// Occupancy of one channel slot, zero-indexed. Out of range reads as
    /// empty.
    pub fn occupancy(&self, channel: usize) -> usize {
        self.channels.get(channel).map(Vec::len).unwrap_or(0)
    }

    /// Placement load as a fraction of total capacity, in `0.0..=1.0`.
    /// A zero-capacity snapshot reads as unloaded.
    pub fn load_factor(&self) -> f64 {
        let capacity = self.channels.len() as u64 * u64::from(self.per_channel_capacity);
        if capacity == 0 {
            return 0.0;
        }
        self.placed() as f64 / capacity as f64
    }

    /// BLAKE3 digest over configuration and placement, hex-encoded.
    ///
    /// Identical placements produce identical digests; slot order and the
    /// order of ids within a slot both count.
    pub fn digest(&self) -> String {
        let mut hasher = Hasher::new();
        match self.generation {
            Some(generation) => hasher.update(generation.label().as_bytes()),
            None => hasher.update(b"unset"),
        };
        hasher.update(&self.bandwidth_mhz.to_bits().to_le_bytes());
        hasher.update(&self.antennas.to_le_bytes());
        hasher.update(&self.per_channel_capacity.to_le_bytes());
        for slot in &self.channels {
            hasher.update(b"|");
            for id in slot {
                hasher.update(&id.to_le_bytes());
            }
        }
        hex::encode(hasher.finalize().as_bytes())
    }
}
