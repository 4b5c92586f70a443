//! # radiomast-simulator
//!
//! **Per-subscriber transmission simulation over a serialized sink.**
//!
//! A [`TransmissionCluster`] spawns one device task per connected
//! subscriber. Devices pace themselves with a jitter model, roll a
//! load-dependent interference model per message, and feed their events
//! through a channel to a single consumer that owns the output sink.
//!
//! Guarantees, in run order:
//! - sink writes are serialized (one consumer, whole lines);
//! - per-subscriber message order is preserved; cross-subscriber order is
//!   wall-clock driven and unspecified;
//! - `run` returns only after every device finished and the sink drained,
//!   so the returned summary is complete;
//! - a raised terminate flag stops devices between messages.
//!
//! Nothing here affects placement or sizing results. The cluster reads its
//! subscribers' channel assignments and never writes them.

pub mod device;
pub mod interference;
pub mod pacing;
pub mod sink;

pub use device::UserDevice;
pub use interference::{InterferenceModel, LoadInterference, NoInterference};
pub use pacing::{JitterPacer, NoopPacer, Pacer};
pub use sink::{
    ConsoleSink, MemorySink, TransmissionEvent, TransmissionSink, TransmissionSummary,
};

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::debug;

use radiomast_config::SimulationConfig;
use radiomast_core::subscriber::Subscriber;

/// Seed offset separating the interference stream from the pacing stream
/// of the same device.
const INTERFERENCE_STREAM: u64 = 0x9E37_79B9;

/// One simulation run's worth of transmitting devices.
pub struct TransmissionCluster {
    devices: Vec<UserDevice>,
    sink: Arc<dyn TransmissionSink>,
    terminate: Arc<AtomicBool>,
    interference_pct: u32,
}

impl TransmissionCluster {
    /// Builds one device per non-dropped subscriber.
    ///
    /// Each device derives its RNG streams from the configured seed and its
    /// subscriber id, so a run is reproducible for a fixed subscriber set.
    pub fn from_subscribers(
        subscribers: &[Subscriber],
        config: &SimulationConfig,
        load_factor: f64,
        sink: Arc<dyn TransmissionSink>,
    ) -> Self {
        let interference_pct =
            LoadInterference::chance_for(load_factor, config.max_interference_pct);

        let devices = subscribers
            .iter()
            .filter(|s| !s.dropped)
            .map(|subscriber| {
                let device_seed = config.seed ^ u64::from(subscriber.id);
                let pacer: Box<dyn Pacer> = if config.realtime {
                    Box::new(JitterPacer::seeded(
                        config.base_delay_ms,
                        config.jitter_ms,
                        device_seed,
                    ))
                } else {
                    Box::new(NoopPacer)
                };
                let interference: Box<dyn InterferenceModel> = if interference_pct == 0 {
                    Box::new(NoInterference)
                } else {
                    Box::new(LoadInterference::seeded(
                        load_factor,
                        config.max_interference_pct,
                        device_seed.wrapping_add(INTERFERENCE_STREAM),
                    ))
                };
                UserDevice::new(
                    subscriber.id,
                    subscriber.assigned_channel.unwrap_or_default(),
                    subscriber.messages,
                    pacer,
                    interference,
                )
            })
            .collect();

        Self {
            devices,
            sink,
            terminate: Arc::new(AtomicBool::new(false)),
            interference_pct,
        }
    }

    /// Replaces the stop flag, so one abort control can span several runs.
    pub fn with_terminate(mut self, terminate: Arc<AtomicBool>) -> Self {
        self.terminate = terminate;
        self
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Messages the cluster will transmit, summed before any device starts.
    pub fn planned_messages(&self) -> u64 {
        self.devices.iter().map(|d| u64::from(d.messages())).sum()
    }

    /// Effective interference chance for this run, in percent.
    pub fn interference_pct(&self) -> u32 {
        self.interference_pct
    }

    /// Shared stop flag. Raise it to end the run cooperatively; devices
    /// check it between messages.
    pub fn terminate_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate)
    }

    /// Runs every device to completion and drains the sink.
    ///
    /// This is the join-all barrier: the summary is returned only once all
    /// devices have terminated and the consumer has seen their last event.
    pub async fn run(self) -> Result<TransmissionSummary, JoinError> {
        let TransmissionCluster {
            devices,
            sink,
            terminate,
            interference_pct,
        } = self;

        debug!(
            devices = devices.len(),
            interference_pct, "starting transmission cluster"
        );

        let (tx, mut rx) = mpsc::channel::<TransmissionEvent>(64);
        let consumer = tokio::spawn(async move {
            let mut summary = TransmissionSummary::default();
            while let Some(event) = rx.recv().await {
                summary.observe(&event);
                sink.record(event).await;
            }
            summary
        });

        let mut workers = Vec::with_capacity(devices.len());
        for device in devices {
            let tx = tx.clone();
            let terminate = Arc::clone(&terminate);
            workers.push(tokio::spawn(device.run(tx, terminate)));
        }
        drop(tx);

        for worker in workers {
            worker.await?;
        }
        consumer.await
    }
}
