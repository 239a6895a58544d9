//! Prometheus metrics for supplier fan-out and lookup outcomes.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

#[derive(Clone)]
pub struct AggregatorMetrics {
    registry: Registry,
    supplier_fetch: IntCounterVec,
    supplier_skipped: IntCounterVec,
    aggregate_requests: IntCounterVec,
    fetch_duration: HistogramVec,
}

impl AggregatorMetrics {
    pub fn new(namespace: &str) -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let supplier_fetch = IntCounterVec::new(
            Opts::new("supplier_fetch_total", "Supplier catalog retrievals by outcome")
                .namespace(namespace),
            &["supplier", "outcome"],
        )?;
        let supplier_skipped = IntCounterVec::new(
            Opts::new("supplier_skipped_total", "Suppliers excluded from a lookup")
                .namespace(namespace),
            &["supplier", "reason"],
        )?;
        let aggregate_requests = IntCounterVec::new(
            Opts::new("aggregate_requests_total", "Part lookups by outcome").namespace(namespace),
            &["outcome"],
        )?;
        let fetch_duration = HistogramVec::new(
            HistogramOpts::new(
                "supplier_fetch_duration_seconds",
                "Time spent retrieving a supplier catalog",
            )
            .namespace(namespace),
            &["supplier"],
        )?;

        registry.register(Box::new(supplier_fetch.clone()))?;
        registry.register(Box::new(supplier_skipped.clone()))?;
        registry.register(Box::new(aggregate_requests.clone()))?;
        registry.register(Box::new(fetch_duration.clone()))?;

        Ok(Self {
            registry,
            supplier_fetch,
            supplier_skipped,
            aggregate_requests,
            fetch_duration,
        })
    }

    pub fn record_fetch(&self, supplier: &str, outcome: &str, elapsed: Duration) {
        self.supplier_fetch.with_label_values(&[supplier, outcome]).inc();
        self.fetch_duration
            .with_label_values(&[supplier])
            .observe(elapsed.as_secs_f64());
    }

    pub fn record_skip(&self, supplier: &str, reason: &str) {
        self.supplier_skipped.with_label_values(&[supplier, reason]).inc();
    }

    pub fn record_request(&self, outcome: &str) {
        self.aggregate_requests.with_label_values(&[outcome]).inc();
    }

    /// Text exposition of every metric in this registry.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
