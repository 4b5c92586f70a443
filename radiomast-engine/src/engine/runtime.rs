//! Station runtime core - coordinates admission, allocation, transmission, and reporting
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use opentelemetry::KeyValue;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use radiomast_config::{DeploymentPlan, PlanEntry, RadiomastConfig};
use radiomast_core::admission::{AdmissionError, Roster};
use radiomast_core::subscriber::{Subscriber, SubscriberDraft};
use radiomast_core::technology::Generation;
use radiomast_simulator::{TransmissionCluster, TransmissionSink};
use radiomast_sizing::{analytics, CoreSizer};
use radiomast_telemetry::{logging::EventLogger, MetricsRecorder};
use radiomast_tower::{CellTower, PlacementStrategy, SpectrumSnapshot};

use crate::engine::error::SimulationError;
use crate::engine::report::{LinkState, RunReport, StationStatus};

/// Coordinates one base station: the subscriber roster, the channel
/// allocation engine, the transmission cluster, and sizing analytics.
pub struct StationRuntime {
    /// System configuration parameters
    config: Arc<RadiomastConfig>,
    /// Channel table and radio parameters
    tower: Arc<CellTower>,
    /// Core-network sizing calculator
    sizer: CoreSizer,
    /// Placement strategy applied on every allocation pass
    strategy: PlacementStrategy,
    /// Subscriber roster, shared across admission and cycle paths
    roster: Mutex<Roster>,
    /// Metrics collection subsystem
    pub metrics: Arc<MetricsRecorder>,
    /// Cooperative stop flag checked by transmitting devices
    terminate: Arc<AtomicBool>,
}

/// Outcome counts from replaying one deployment plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Configuration directives applied (technology, bandwidth, antennas).
    pub directives: usize,
    /// Subscriber records admitted to the roster.
    pub admitted: usize,
    /// Subscriber records the registration gate rejected.
    pub rejected: usize,
    /// Lines the parser already skipped as malformed.
    pub skipped_lines: usize,
}

/// Everything run_cycle needs gathered under one roster lock hold.
struct CycleSetup {
    snapshot: SpectrumSnapshot,
    outcomes: Vec<Subscriber>,
    planned: u64,
    connected: usize,
    dropped: usize,
    data: usize,
    voice: usize,
    load: f64,
    cluster: TransmissionCluster,
}

impl StationRuntime {
    /// Creates a runtime with the tower configured from `config.station`.
    ///
    /// Fails when the configured technology token is not a known
    /// generation.
    pub fn new(config: RadiomastConfig) -> Result<Self, SimulationError> {
        info!("Initializing station runtime");
        debug!("Station config: {:?}", config.station);

        let generation = config.station.generation()?;
        let tower = Arc::new(CellTower::new());
        tower.set_technology(generation);
        tower.set_bandwidth(config.station.bandwidth_mhz);
        tower.set_antennas(config.station.antennas);

        let sizer = CoreSizer::new(
            config.sizing.overhead_per_100,
            config.sizing.core_capacity_msgs,
        );
        let strategy = PlacementStrategy::from_token(&config.station.strategy);
        let metrics = Arc::new(MetricsRecorder::new());

        Ok(Self {
            config: Arc::new(config),
            tower,
            sizer,
            strategy,
            roster: Mutex::new(Roster::new()),
            metrics,
            terminate: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn tower(&self) -> &CellTower {
        &self.tower
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.strategy
    }

    pub fn subscriber_count(&self) -> usize {
        self.roster.lock().len()
    }

    /// Messages the current roster would transmit, dropped excluded.
    pub fn planned_messages(&self) -> u64 {
        self.roster.lock().planned_messages()
    }

    /// Admits one subscriber under the radio configuration in force.
    ///
    /// Returns the assigned id; rejected records never consume one.
    pub fn admit(&self, draft: SubscriberDraft) -> Result<u32, AdmissionError> {
        let generation = self.generation();
        let capacity = self.tower.total_capacity();

        let mut roster = self.roster.lock();
        let id = roster.admit(draft, generation, capacity)?.id;
        self.metrics.inc_admitted();
        debug!(id, "Subscriber admitted");
        Ok(id)
    }

    /// Replays a deployment plan in file order.
    ///
    /// Configuration directives take effect immediately, so a subscriber
    /// line is validated against the technology and capacity in force at
    /// that point in the file. Rejected records are logged and skipped;
    /// a plan is never aborted by one bad subscriber.
    #[instrument(skip_all, fields(entries = plan.entries.len()))]
    pub fn ingest_plan(&self, plan: &DeploymentPlan) -> IngestSummary {
        let mut summary = IngestSummary {
            skipped_lines: plan.skipped.len(),
            ..IngestSummary::default()
        };

        for entry in &plan.entries {
            match entry {
                PlanEntry::Technology(generation) => {
                    debug!(%generation, "Plan sets technology");
                    self.tower.set_technology(*generation);
                    summary.directives += 1;
                }
                PlanEntry::Bandwidth(bandwidth_mhz) => {
                    debug!(bandwidth_mhz, "Plan sets bandwidth");
                    self.tower.set_bandwidth(*bandwidth_mhz);
                    summary.directives += 1;
                }
                PlanEntry::Antennas(antennas) => {
                    debug!(antennas, "Plan sets antennas");
                    self.tower.set_antennas(*antennas);
                    summary.directives += 1;
                }
                PlanEntry::Subscriber(draft) => match self.admit(draft.clone()) {
                    Ok(_) => summary.admitted += 1,
                    Err(e) => {
                        warn!("Import error for '{}': {e}", draft.name);
                        summary.rejected += 1;
                    }
                },
            }
        }

        info!(
            "Plan ingested: {} directives, {} admitted, {} rejected, {} lines skipped",
            summary.directives, summary.admitted, summary.rejected, summary.skipped_lines
        );
        summary
    }

    /// Runs one full station cycle: allocate, transmit, aggregate.
    ///
    /// The report is assembled only after every device task has finished
    /// and the sink consumer has drained; no aggregate is read earlier.
    #[instrument(skip_all, fields(strategy = %self.strategy))]
    pub async fn run_cycle(
        &self,
        sink: Arc<dyn TransmissionSink>,
    ) -> Result<RunReport, SimulationError> {
        let CycleSetup {
            snapshot,
            outcomes,
            planned,
            connected,
            dropped,
            data,
            voice,
            load,
            cluster,
        } = self.prepare_cycle(sink);

        let generation = self.generation();
        info!(
            "Transmitting {} messages across {} devices ({}% interference chance)",
            planned,
            cluster.device_count(),
            cluster.interference_pct()
        );

        let summary = cluster.run().await?;
        self.metrics.add_messages(summary.delivered);

        let overhead = self.sizer.overhead_for(planned);
        let cores = self.sizer.cores_needed(planned);
        let latency_ms = analytics::latency_estimate_ms(generation, load);
        let tariff = analytics::tariff_per_message(generation);

        EventLogger::log_event(
            "cycle_complete",
            vec![
                KeyValue::new("technology", generation.label()),
                KeyValue::new("planned_messages", planned as i64),
                KeyValue::new("delivered", summary.delivered as i64),
                KeyValue::new("disturbed", summary.disturbed as i64),
                KeyValue::new("cores", cores as i64),
            ],
        )
        .await;

        Ok(RunReport {
            generated_at: chrono::Utc::now(),
            technology: generation,
            strategy: self.strategy,
            bandwidth_mhz: snapshot.bandwidth_mhz,
            antennas: snapshot.antennas,
            total_capacity: self.tower.total_capacity(),
            connected,
            dropped,
            data_subscribers: data,
            voice_subscribers: voice,
            planned_messages: planned,
            delivered_messages: summary.delivered,
            disturbed_messages: summary.disturbed,
            overhead_messages: overhead,
            total_traffic: planned + overhead,
            cores_needed: cores,
            load_pct: load * 100.0,
            latency_ms,
            tariff_per_message: tariff,
            projected_revenue: analytics::revenue(generation, planned),
            spectrum_digest: snapshot.digest(),
            spectrum: snapshot,
            outcomes,
        })
    }

    /// Current station health panel.
    pub fn status(&self) -> StationStatus {
        let roster = self.roster.lock();
        let generation = self.generation();
        let capacity = self.tower.total_capacity();
        let load = station_load(roster.len(), capacity);
        let (data, voice) = roster.traffic_split();

        StationStatus {
            state: LinkState::for_load_pct(load * 100.0),
            technology: generation,
            bandwidth_mhz: self.tower.bandwidth_mhz(),
            antennas: self.tower.antennas(),
            active_subscribers: roster.len(),
            total_capacity: capacity,
            data_subscribers: data,
            voice_subscribers: voice,
            load_pct: load * 100.0,
            latency_ms: analytics::latency_estimate_ms(generation, load),
        }
    }

    /// Raises the cooperative stop flag. Devices of the running cycle
    /// finish their current message and exit; aggregation still waits for
    /// all of them.
    pub fn abort(&self) {
        warn!("Abort requested, raising stop flag");
        self.terminate.store(true, Ordering::SeqCst);
    }

    /// Clears the roster, empties the spectrum table, and rearms the stop
    /// flag. Subscriber ids restart at 1.
    pub fn reset(&self) {
        let mut roster = self.roster.lock();
        roster.reset();
        self.tower.allocate(roster.subscribers_mut(), self.strategy);
        self.terminate.store(false, Ordering::SeqCst);
        info!("Station state reset, all subscribers cleared");
    }

    fn generation(&self) -> Generation {
        self.tower
            .generation()
            .expect("Runtime tower always has a technology configured")
    }

    /// Allocates and captures every figure the report needs while the
    /// roster lock is held, so the cycle sees one consistent state.
    fn prepare_cycle(&self, sink: Arc<dyn TransmissionSink>) -> CycleSetup {
        let mut roster = self.roster.lock();

        let dropped_before = dropped_count(roster.subscribers());
        let started = Instant::now();
        self.tower.allocate(roster.subscribers_mut(), self.strategy);
        self.metrics
            .observe_allocation_micros(started.elapsed().as_micros() as f64);

        let connected = roster.connected();
        let dropped = dropped_count(roster.subscribers());
        // Allocation only ever sets drop flags, never clears them, so the
        // flag-count delta is exactly this cycle's new drops.
        self.metrics.add_dropped((dropped - dropped_before) as u64);

        let load = station_load(roster.len(), self.tower.total_capacity());
        let snapshot = self.tower.snapshot();
        let cluster = TransmissionCluster::from_subscribers(
            roster.subscribers(),
            &self.config.simulation,
            load,
            sink,
        )
        .with_terminate(Arc::clone(&self.terminate));

        let (data, voice) = roster.traffic_split();

        CycleSetup {
            snapshot,
            outcomes: roster.subscribers().to_vec(),
            planned: roster.planned_messages(),
            connected,
            dropped,
            data,
            voice,
            load,
            cluster,
        }
    }
}

/// Subscribers currently carrying the allocation drop flag.
fn dropped_count(subscribers: &[Subscriber]) -> usize {
    subscribers.iter().filter(|s| s.dropped).count()
}

/// Utilization of the station: registered subscribers over total capacity,
/// zero when the station has no capacity.
fn station_load(registered: usize, capacity: u64) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        registered as f64 / capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radiomast_config::plan::parse_plan;
    use radiomast_simulator::MemorySink;

    fn test_config() -> RadiomastConfig {
        let mut config = RadiomastConfig::default();
        config.simulation.realtime = false;
        config
    }

    fn draft(name: &str, messages: u32) -> SubscriberDraft {
        SubscriberDraft::new(name, "5550100", "data", messages)
    }

    #[test]
    fn default_station_reaches_reference_capacity() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        assert_eq!(runtime.tower().channel_count(), 100);
        assert_eq!(runtime.tower().per_channel_capacity(), 120);
        assert_eq!(runtime.tower().total_capacity(), 12_000);
    }

    #[test]
    fn unknown_technology_is_fatal() {
        let mut config = test_config();
        config.station.technology = "6G".into();
        assert!(matches!(
            StationRuntime::new(config),
            Err(SimulationError::Validation(_))
        ));
    }

    #[test]
    fn admit_assigns_ids_and_enforces_usage() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        assert_eq!(runtime.admit(draft("Alice", 8)).unwrap(), 1);
        assert_eq!(runtime.admit(draft("Bob", 9)).unwrap(), 2);
        assert!(matches!(
            runtime.admit(draft("Carol", 11)),
            Err(AdmissionError::Usage(_))
        ));
        // The rejected record consumed no id.
        assert_eq!(runtime.admit(draft("Dave", 10)).unwrap(), 3);
        assert_eq!(runtime.subscriber_count(), 3);
    }

    #[test]
    fn ingest_applies_directives_in_file_order() {
        let plan = parse_plan(
            "technology=2G\n\
             user1=name:Alice,phone:12345,type:data,msg:5\n\
             technology=5G\n\
             bandwidth_mhz=2.0\n\
             antennas=2\n\
             user2=name:Bob,phone:12345,type:data,msg:9\n",
        )
        .unwrap();

        let runtime = StationRuntime::new(test_config()).unwrap();
        let summary = runtime.ingest_plan(&plan);

        // Alice passed the 2G data limit of 5; Bob the packet limit of 10.
        assert_eq!(summary.directives, 4);
        assert_eq!(summary.admitted, 2);
        assert_eq!(summary.rejected, 0);
        assert_eq!(runtime.tower().generation(), Some(Generation::Nr));
        assert_eq!(runtime.tower().antennas(), 2);
    }

    #[test]
    fn ingest_recovers_per_rejected_record() {
        let plan = parse_plan(
            "user1=name:Alice,phone:12345,type:data,msg:8\n\
             user2=name:B0b,phone:12345,type:data,msg:8\n\
             user3=name:Carol,phone:12,type:data,msg:8\n\
             user4=name:Dave,phone:12345,type:data,msg:8\n",
        )
        .unwrap();

        let runtime = StationRuntime::new(test_config()).unwrap();
        let summary = runtime.ingest_plan(&plan);

        assert_eq!(summary.admitted, 2);
        assert_eq!(summary.rejected, 2);
        assert_eq!(runtime.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn run_cycle_produces_reference_figures() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        runtime.admit(draft("Alice", 8)).unwrap();
        runtime.admit(draft("Bob", 9)).unwrap();

        let sink = Arc::new(MemorySink::new());
        let report = runtime.run_cycle(sink.clone()).await.unwrap();

        assert_eq!(report.total_capacity, 12_000);
        assert_eq!(report.connected, 2);
        assert_eq!(report.dropped, 0);
        assert_eq!(report.planned_messages, 17);
        assert_eq!(report.delivered_messages, 17);
        assert_eq!(report.overhead_messages, 10);
        assert_eq!(report.total_traffic, 27);
        assert_eq!(report.cores_needed, 1);
        assert_eq!(report.data_subscribers, 2);
        assert_eq!(report.spectrum.channels_used(), 1);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.tariff_per_message, 0.03);
        assert!((report.projected_revenue - 0.51).abs() < 1e-9);
        assert!(report.latency_ms >= 30.0);
        assert!(!report.spectrum_digest.is_empty());
        assert_eq!(sink.events().len(), 17);
    }

    #[tokio::test]
    async fn repeated_cycles_share_a_digest() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        runtime.admit(draft("Alice", 8)).unwrap();
        runtime.admit(draft("Bob", 9)).unwrap();

        let first = runtime.run_cycle(Arc::new(MemorySink::new())).await.unwrap();
        let second = runtime.run_cycle(Arc::new(MemorySink::new())).await.unwrap();
        assert_eq!(first.spectrum_digest, second.spectrum_digest);
    }

    #[tokio::test]
    async fn drop_counter_records_only_new_drops() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        for _ in 0..17 {
            runtime
                .admit(SubscriberDraft::new("User", "5550100", "voice", 1))
                .unwrap();
        }
        // Shrink to a single 2G channel of 16 after admission, so the
        // next allocation pass must drop exactly one subscriber.
        let plan = parse_plan("technology=2G\nbandwidth_mhz=0.2\nantennas=1\n").unwrap();
        runtime.ingest_plan(&plan);

        let first = runtime.run_cycle(Arc::new(MemorySink::new())).await.unwrap();
        assert_eq!(first.connected, 16);
        assert_eq!(first.dropped, 1);

        // The same subscriber stays dropped on the next pass and is not
        // counted a second time.
        let second = runtime.run_cycle(Arc::new(MemorySink::new())).await.unwrap();
        assert_eq!(second.dropped, 1);
        let export = runtime.metrics.gather_metrics().unwrap();
        assert!(export.contains("radiomast_subscribers_dropped_total 1"));
    }

    #[tokio::test]
    async fn abort_stops_devices_before_they_transmit() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        runtime.admit(draft("Alice", 8)).unwrap();
        runtime.abort();

        let report = runtime.run_cycle(Arc::new(MemorySink::new())).await.unwrap();
        // Planned traffic is summed before transmission, so sizing still
        // sees the full batch even though nothing was sent.
        assert_eq!(report.planned_messages, 8);
        assert_eq!(report.delivered_messages, 0);
    }

    #[test]
    fn reset_clears_roster_and_restarts_ids() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        runtime.admit(draft("Alice", 8)).unwrap();
        runtime.admit(draft("Bob", 8)).unwrap();

        runtime.reset();
        assert_eq!(runtime.subscriber_count(), 0);
        assert_eq!(runtime.admit(draft("Carol", 8)).unwrap(), 1);
    }

    #[test]
    fn status_reports_online_at_low_load() {
        let runtime = StationRuntime::new(test_config()).unwrap();
        runtime.admit(draft("Alice", 8)).unwrap();

        let status = runtime.status();
        assert_eq!(status.state, LinkState::Online);
        assert_eq!(status.technology, Generation::Lte);
        assert_eq!(status.active_subscribers, 1);
        assert_eq!(status.total_capacity, 12_000);
        assert!(status.load_pct < 1.0);
    }

    #[test]
    fn status_turns_critical_above_ninety_percent_load() {
        let mut config = test_config();
        config.station.technology = "2G".into();
        config.station.bandwidth_mhz = 0.2;
        config.station.antennas = 1;
        let runtime = StationRuntime::new(config).unwrap();

        // One 200 kHz channel at 16 users: 15 registered is 93.75% load.
        for _ in 0..15 {
            runtime
                .admit(SubscriberDraft::new("User", "5550100", "voice", 1))
                .unwrap();
        }

        let status = runtime.status();
        assert_eq!(status.total_capacity, 16);
        assert_eq!(status.active_subscribers, 15);
        assert_eq!(status.voice_subscribers, 15);
        assert_eq!(status.state, LinkState::Critical);
    }
}
