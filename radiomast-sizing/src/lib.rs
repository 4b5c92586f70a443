//! # radiomast-sizing
//!
//! **Core-network sizing and traffic analytics.**
//!
//! Everything here is pure arithmetic over aggregate figures produced by an
//! allocation pass: protocol overhead and processing-core counts
//! ([`CoreSizer`]), plus latency, billing, and signal-quality estimates
//! ([`analytics`]). No state, no locks, no I/O.

pub mod analytics;
pub mod sizer;

pub use analytics::{latency_estimate_ms, revenue, tariff_per_message, SignalQuality};
pub use sizer::CoreSizer;
