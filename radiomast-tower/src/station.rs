//! ## radiomast-tower::station
//! **Lock-guarded station state and the channel allocation pass**
//!
//! All station state (radio configuration plus the channel table) lives
//! behind one `parking_lot::Mutex`. Every accessor takes the lock, so a
//! reader never observes the table mid-rebuild and a configuration swap is
//! atomic with respect to capacity queries.
//!
//! Configuration changes take effect at the next allocation pass; the table
//! is fully rebuilt on every [`CellTower::allocate`] call.

use parking_lot::Mutex;
use tracing::debug;

use radiomast_core::subscriber::Subscriber;
use radiomast_core::technology::Generation;

use crate::spectrum::SpectrumSnapshot;
use crate::strategy::PlacementStrategy;

#[derive(Debug)]
struct TowerState {
    generation: Option<Generation>,
    bandwidth_mhz: f64,
    antennas: u32,
    /// Channel slot -> subscriber ids, in placement order.
    table: Vec<Vec<u32>>,
}

impl TowerState {
    fn channel_count(&self) -> u32 {
        self.generation
            .map(|g| g.channels_for_bandwidth(self.bandwidth_mhz))
            .unwrap_or(0)
    }

    fn per_channel_capacity(&self) -> u32 {
        // Antenna count is clamped to 1 so a zero never erases capacity.
        self.generation
            .map(|g| g.users_per_channel() * self.antennas.max(1))
            .unwrap_or(0)
    }
}

/// One base station: radio configuration, capacity math, placement.
///
/// Until a technology is set, all capacity queries return zero and an
/// allocation pass drops every subscriber.
pub struct CellTower {
    state: Mutex<TowerState>,
}

impl Default for CellTower {
    fn default() -> Self {
        Self::new()
    }
}

impl CellTower {
    /// Unconfigured station: no technology, 1.0 MHz of spectrum, 1 antenna.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TowerState {
                generation: None,
                bandwidth_mhz: 1.0,
                antennas: 1,
                table: Vec::new(),
            }),
        }
    }

    pub fn set_technology(&self, generation: Generation) {
        self.state.lock().generation = Some(generation);
    }

    pub fn set_bandwidth(&self, bandwidth_mhz: f64) {
        self.state.lock().bandwidth_mhz = bandwidth_mhz;
    }

    pub fn set_antennas(&self, antennas: u32) {
        self.state.lock().antennas = antennas;
    }

    pub fn generation(&self) -> Option<Generation> {
        self.state.lock().generation
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        self.state.lock().bandwidth_mhz
    }

    pub fn antennas(&self) -> u32 {
        self.state.lock().antennas
    }

    /// Whole channels the current configuration yields.
    pub fn channel_count(&self) -> u32 {
        self.state.lock().channel_count()
    }

    /// Subscribers one channel carries under the current antenna count.
    pub fn per_channel_capacity(&self) -> u32 {
        self.state.lock().per_channel_capacity()
    }

    /// `channel_count * per_channel_capacity`, computed under one lock hold
    /// so the two factors always belong to the same configuration.
    pub fn total_capacity(&self) -> u64 {
        let state = self.state.lock();
        u64::from(state.channel_count()) * u64::from(state.per_channel_capacity())
    }

    /// Clears and rebuilds the channel table, annotating each subscriber
    /// with its placement.
    ///
    /// With zero channels the table stays empty and the whole batch is
    /// dropped. Subscribers already marked dropped by the caller are skipped
    /// untouched; this pass never rescues a subscriber dropped upstream.
    /// Allocation itself never fails: insufficient capacity degrades into
    /// drop flags.
    pub fn allocate(&self, subscribers: &mut [Subscriber], strategy: PlacementStrategy) {
        let mut state = self.state.lock();
        state.table.clear();

        let channels = state.channel_count() as usize;
        if channels == 0 {
            for subscriber in subscribers.iter_mut() {
                subscriber.dropped = true;
                subscriber.assigned_channel = None;
            }
            debug!(
                dropped = subscribers.len(),
                "no channels under current configuration, batch dropped"
            );
            return;
        }

        state.table.resize_with(channels, Vec::new);
        let capacity = state.per_channel_capacity() as usize;

        match strategy {
            PlacementStrategy::RoundRobin => {
                // The start cursor advances once per visited subscriber,
                // whether or not placement succeeded. Pre-dropped
                // subscribers are invisible to it.
                let mut cursor = 0usize;
                for subscriber in subscribers.iter_mut() {
                    if subscriber.dropped {
                        continue;
                    }
                    let mut placed = false;
                    for offset in 0..channels {
                        let channel = (cursor + offset) % channels;
                        if state.table[channel].len() < capacity {
                            state.table[channel].push(subscriber.id);
                            subscriber.assigned_channel = Some(channel as u32);
                            placed = true;
                            break;
                        }
                    }
                    if !placed {
                        subscriber.dropped = true;
                        subscriber.assigned_channel = None;
                    }
                    cursor = (cursor + 1) % channels;
                }
            }
            PlacementStrategy::BestFit => {
                // Forward-only cursor: once a channel fills, it is never
                // revisited within this pass.
                let mut cursor = 0usize;
                for subscriber in subscribers.iter_mut() {
                    if subscriber.dropped {
                        continue;
                    }
                    while cursor < channels && state.table[cursor].len() >= capacity {
                        cursor += 1;
                    }
                    if cursor >= channels {
                        subscriber.dropped = true;
                        subscriber.assigned_channel = None;
                        continue;
                    }
                    state.table[cursor].push(subscriber.id);
                    subscriber.assigned_channel = Some(cursor as u32);
                }
            }
        }

        let placed = subscribers
            .iter()
            .filter(|s| s.assigned_channel.is_some())
            .count();
        debug!(
            strategy = %strategy,
            channels,
            placed,
            dropped = subscribers.len() - placed,
            "allocation table rebuilt"
        );
    }

    /// Subscriber ids in the given channel, `1`-indexed. Out-of-range
    /// channels yield an empty list.
    pub fn users_in_channel(&self, channel: u32) -> Vec<u32> {
        let state = self.state.lock();
        if channel == 0 || channel as usize > state.table.len() {
            return Vec::new();
        }
        state.table[channel as usize - 1].clone()
    }

    /// Count of channels holding at least one subscriber.
    pub fn channels_used(&self) -> usize {
        self.state
            .lock()
            .table
            .iter()
            .filter(|slot| !slot.is_empty())
            .count()
    }

    /// Point-in-time copy of configuration and table, taken under one lock
    /// hold. Everything downstream of allocation reads these snapshots, not
    /// the live table.
    pub fn snapshot(&self) -> SpectrumSnapshot {
        let state = self.state.lock();
        SpectrumSnapshot {
            generation: state.generation,
            bandwidth_mhz: state.bandwidth_mhz,
            antennas: state.antennas,
            per_channel_capacity: state.per_channel_capacity(),
            channels: state.table.clone(),
        }
    }
}
