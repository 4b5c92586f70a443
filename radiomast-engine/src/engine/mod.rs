mod error;
mod report;
mod runtime;

pub use self::{
    error::SimulationError,
    report::{LinkState, RunReport, StationStatus},
    runtime::{IngestSummary, StationRuntime},
};

pub mod prelude {
    pub use super::{
        IngestSummary, LinkState, RunReport, SimulationError, StationRuntime, StationStatus,
    };
}
