//! ## radiomast-simulator::sink
//! **Serialized output path for transmission events**
//!
//! Devices never write output themselves: they send events over a channel
//! to a single consumer, which forwards them to one sink. That keeps lines
//! whole regardless of how many devices transmit concurrently.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One message transmission observed during a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmissionEvent {
    pub subscriber: u32,
    /// Zero-based channel the subscriber transmits on.
    pub channel: u32,
    /// 1-based message number within this subscriber's sequence.
    pub seq: u32,
    pub total: u32,
    /// Interference hit; the message was retried and still delivered.
    pub disturbed: bool,
}

/// Sink for transmission events. Called from a single consumer task, so
/// implementations never see concurrent records.
#[async_trait]
pub trait TransmissionSink: Send + Sync {
    async fn record(&self, event: TransmissionEvent);
}

/// Prints one line per transmission, in the operator-facing run format.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

#[async_trait]
impl TransmissionSink for ConsoleSink {
    async fn record(&self, event: TransmissionEvent) {
        let status = if event.disturbed {
            "FAILED (Interference) -> RETRYING... OK"
        } else {
            "OK"
        };
        println!(
            "[User {:>3}] TX Packet {:>2}/{:>2} | STATUS: {}",
            event.subscriber, event.seq, event.total, status
        );
    }
}

/// Collects events in memory. Test and inspection sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TransmissionEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransmissionEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl TransmissionSink for MemorySink {
    async fn record(&self, event: TransmissionEvent) {
        self.events.lock().push(event);
    }
}

/// Aggregate view of one simulation run, available only after every device
/// has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmissionSummary {
    /// Messages delivered, disturbed or not.
    pub delivered: u64,
    /// Messages that hit interference on the way.
    pub disturbed: u64,
}

impl TransmissionSummary {
    pub fn observe(&mut self, event: &TransmissionEvent) {
        self.delivered += 1;
        if event.disturbed {
            self.disturbed += 1;
        }
    }
}
