//! ## radiomast-telemetry::metrics
//! **Prometheus registry for the capacity planner**
//!
//! Counters cover the subscriber lifecycle (admitted, dropped) and message
//! volume; the histogram tracks how long an allocation pass takes.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub subscribers_admitted: prometheus::Counter,
    pub subscribers_dropped: prometheus::Counter,
    pub messages_total: prometheus::Counter,
    pub allocation_latency: prometheus::Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let subscribers_admitted = Counter::new(
            "radiomast_subscribers_admitted_total",
            "Subscribers that passed the admission gate",
        )
        .unwrap();
        let subscribers_dropped = Counter::new(
            "radiomast_subscribers_dropped_total",
            "Subscribers dropped by channel allocation",
        )
        .unwrap();
        let messages_total = Counter::new(
            "radiomast_messages_total",
            "Messages scheduled for transmission",
        )
        .unwrap();

        let allocation_latency = Histogram::with_opts(
            HistogramOpts::new(
                "radiomast_allocation_latency_us",
                "Channel allocation pass duration",
            )
            .buckets(vec![10.0, 100.0, 1_000.0, 10_000.0]),
        )
        .unwrap();

        registry
            .register(Box::new(subscribers_admitted.clone()))
            .unwrap();
        registry
            .register(Box::new(subscribers_dropped.clone()))
            .unwrap();
        registry.register(Box::new(messages_total.clone())).unwrap();
        registry
            .register(Box::new(allocation_latency.clone()))
            .unwrap();

        Self {
            registry,
            subscribers_admitted,
            subscribers_dropped,
            messages_total,
            allocation_latency,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    pub fn inc_admitted(&self) {
        self.subscribers_admitted.inc();
    }

    pub fn add_dropped(&self, count: u64) {
        self.subscribers_dropped.inc_by(count as f64);
    }

    pub fn add_messages(&self, count: u64) {
        self.messages_total.inc_by(count as f64);
    }

    pub fn observe_allocation_micros(&self, micros: f64) {
        self.allocation_latency.observe(micros);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_land_in_the_export() {
        let recorder = MetricsRecorder::new();
        recorder.inc_admitted();
        recorder.add_messages(11);
        recorder.observe_allocation_micros(42.0);

        let export = recorder.gather_metrics().unwrap();
        assert!(export.contains("radiomast_subscribers_admitted_total 1"));
        assert!(export.contains("radiomast_messages_total 11"));
        assert!(export.contains("radiomast_allocation_latency_us_count 1"));
    }
}
