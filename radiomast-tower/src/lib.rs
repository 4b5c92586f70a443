//! # radiomast-tower
//!
//! **Channel capacity model and subscriber placement for one base station.**
//!
//! The tower owns the radio configuration (generation, spectrum, antennas)
//! and the channel table, all behind a single lock: readers never observe a
//! table mid-rebuild, and configuration swaps are atomic. Placement runs two
//! interchangeable strategies over the subscriber list, annotating each
//! record with its channel or a drop flag.
//!
//! ## Key Components
//!
//! - [`CellTower`]: lock-guarded station state plus the allocation pass.
//! - [`PlacementStrategy`]: `round_robin` or `best_fit` (the default).
//! - [`SpectrumSnapshot`]: immutable point-in-time copy of the channel table
//!   with a content digest, handed to reporting and simulation.
//!
//! Allocation never fails: when capacity is insufficient it degrades by
//! marking the excess subscribers dropped.

pub mod spectrum;
pub mod station;
pub mod strategy;

pub use spectrum::SpectrumSnapshot;
pub use station::CellTower;
pub use strategy::PlacementStrategy;

pub mod prelude {
    pub use crate::spectrum::SpectrumSnapshot;
    pub use crate::station::CellTower;
    pub use crate::strategy::PlacementStrategy;
}
