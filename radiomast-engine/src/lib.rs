//! Station runtime: the orchestration layer binding admission, channel
//! allocation, the transmission cluster, and sizing analytics into one
//! cycle that frontends (CLI, reports) consume.

pub mod engine;

pub use engine::{
    IngestSummary, LinkState, RunReport, SimulationError, StationRuntime, StationStatus,
};
