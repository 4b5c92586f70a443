//! Cycle reports and the station status panel.
//!
//! A [`RunReport`] is the complete outcome of one allocate/transmit cycle,
//! serializable to YAML for operators or regression baselines. The
//! [`StationStatus`] is the lighter live view: configuration, load, and the
//! ONLINE/CRITICAL link state.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use radiomast_core::subscriber::Subscriber;
use radiomast_core::technology::Generation;
use radiomast_tower::{PlacementStrategy, SpectrumSnapshot};

use crate::engine::error::SimulationError;

/// Aggregated outcome of one full station cycle.
///
/// All totals are computed after the join-all barrier, so no field reflects
/// a transmission still in flight. `planned_messages` is summed before the
/// cluster starts and is the figure sizing and billing run on; delivery
/// counts are observational.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub technology: Generation,
    pub strategy: PlacementStrategy,
    pub bandwidth_mhz: f64,
    pub antennas: u32,
    pub total_capacity: u64,
    pub connected: usize,
    pub dropped: usize,
    pub data_subscribers: usize,
    pub voice_subscribers: usize,
    pub planned_messages: u64,
    pub delivered_messages: u64,
    pub disturbed_messages: u64,
    pub overhead_messages: u64,
    pub total_traffic: u64,
    pub cores_needed: u64,
    pub load_pct: f64,
    pub latency_ms: f64,
    pub tariff_per_message: f64,
    pub projected_revenue: f64,
    pub spectrum_digest: String,
    pub spectrum: SpectrumSnapshot,
    /// Roster as annotated by the allocation pass, in admission order.
    pub outcomes: Vec<Subscriber>,
}

impl RunReport {
    pub fn to_yaml(&self) -> Result<String, SimulationError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the YAML rendition of the report to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimulationError> {
        std::fs::write(path.as_ref(), self.to_yaml()?)?;
        Ok(())
    }
}

/// Link state shown on the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkState {
    Online,
    Critical,
}

impl LinkState {
    /// Panel state for a utilization percentage.
    pub fn for_load_pct(load_pct: f64) -> Self {
        if load_pct > StationStatus::CRITICAL_LOAD_PCT {
            LinkState::Critical
        } else {
            LinkState::Online
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LinkState::Online => "ONLINE",
            LinkState::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Live station health, computed from the current roster and radio
/// configuration without touching the allocation table.
#[derive(Debug, Clone, Serialize)]
pub struct StationStatus {
    pub state: LinkState,
    pub technology: Generation,
    pub bandwidth_mhz: f64,
    pub antennas: u32,
    /// Registered subscribers, dropped or not.
    pub active_subscribers: usize,
    pub total_capacity: u64,
    pub data_subscribers: usize,
    pub voice_subscribers: usize,
    pub load_pct: f64,
    pub latency_ms: f64,
}

impl StationStatus {
    /// Utilization percentage above which the link state turns CRITICAL.
    pub const CRITICAL_LOAD_PCT: f64 = 90.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_state_flips_above_ninety_percent() {
        assert_eq!(LinkState::for_load_pct(0.0), LinkState::Online);
        assert_eq!(LinkState::for_load_pct(90.0), LinkState::Online);
        assert_eq!(LinkState::for_load_pct(90.1), LinkState::Critical);
        assert_eq!(LinkState::for_load_pct(120.0), LinkState::Critical);
    }

    #[test]
    fn link_state_labels() {
        assert_eq!(LinkState::Online.to_string(), "ONLINE");
        assert_eq!(LinkState::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn report_serializes_to_yaml() {
        let report = RunReport {
            generated_at: Utc::now(),
            technology: Generation::Lte,
            strategy: PlacementStrategy::BestFit,
            bandwidth_mhz: 1.0,
            antennas: 4,
            total_capacity: 12_000,
            connected: 2,
            dropped: 0,
            data_subscribers: 2,
            voice_subscribers: 0,
            planned_messages: 17,
            delivered_messages: 17,
            disturbed_messages: 0,
            overhead_messages: 10,
            total_traffic: 27,
            cores_needed: 1,
            load_pct: 0.02,
            latency_ms: 30.0,
            tariff_per_message: 0.03,
            projected_revenue: 0.51,
            spectrum_digest: "ab".repeat(32),
            spectrum: SpectrumSnapshot {
                generation: Some(Generation::Lte),
                bandwidth_mhz: 1.0,
                antennas: 4,
                per_channel_capacity: 120,
                channels: vec![vec![1, 2]],
            },
            outcomes: Vec::new(),
        };

        let yaml = report.to_yaml().unwrap();
        assert!(yaml.contains("technology: 4G"));
        assert!(yaml.contains("strategy: best_fit"));
        assert!(yaml.contains("planned_messages: 17"));
        assert!(yaml.contains("cores_needed: 1"));
    }
}
