//! # Radiomast Telemetry and Monitoring
//!
//! Crate for logging and metrics across the capacity planner.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
