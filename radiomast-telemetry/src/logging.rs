//! ## radiomast-telemetry::logging
//! **Structured station event logging on `tracing`**
//!
//! ### Expectations:
//! - Negligible overhead against the allocation pass
//! - Structured fields on every station event
//!
//! ### Future:
//! - OTLP export once running as a long-lived service

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::{fmt, EnvFilter};

/// Subscriber setup and station event emission.
#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global fmt subscriber, honoring `RUST_LOG` and
    /// defaulting to `info`.
    ///
    /// Span lifecycle lines would interleave with the rendered tables,
    /// so only events are emitted. Repeated calls keep the first
    /// subscriber, which lets tests init freely.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .ok();
    }

    /// Records one station event inside a `station_event` span.
    ///
    /// The body holds the span guard without awaiting, so the returned
    /// future stays `Send`.
    #[inline]
    pub async fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("station_event", event_type, otel.kind = "INTERNAL");
        let _guard = span.enter();
        tracing::info!(metadata = ?metadata, "Station event recorded");
    }
}
