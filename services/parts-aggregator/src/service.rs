//! Aggregator
//!
//! Orchestrates one lookup: fetch every supplier concurrently, parse the
//! payloads that arrived, then merge the matches into a single summary.
//! Per-supplier faults never abort a lookup; they only shrink the set of
//! contributing suppliers.

use futures::future::join_all;
use partlink_models::{AggregatedPartSummary, NormalizedPart, RawSupplierResponse, SupplierDescriptor};
use partlink_utils::{FetchConfig, PartlinkError, PartlinkResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::fetcher::{FetchError, SupplierFetcher};
use crate::merge::{merge_parts, ResolvedParsers};
use crate::metrics::AggregatorMetrics;
use crate::parsers::ParserRegistry;

const DEFAULT_SUPPLIER_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_GLOBAL_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Aggregator {
    suppliers: Vec<SupplierDescriptor>,
    registry: Arc<ParserRegistry>,
    fetcher: Arc<dyn SupplierFetcher>,
    supplier_timeout: Duration,
    global_timeout: Duration,
    metrics: Option<AggregatorMetrics>,
}

impl Aggregator {
    pub fn new(
        suppliers: Vec<SupplierDescriptor>,
        registry: Arc<ParserRegistry>,
        fetcher: Arc<dyn SupplierFetcher>,
    ) -> Self {
        Self {
            suppliers,
            registry,
            fetcher,
            supplier_timeout: DEFAULT_SUPPLIER_TIMEOUT,
            global_timeout: DEFAULT_GLOBAL_TIMEOUT,
            metrics: None,
        }
    }

    pub fn with_timeouts(mut self, supplier_timeout: Duration, global_timeout: Duration) -> Self {
        self.supplier_timeout = supplier_timeout;
        self.global_timeout = global_timeout;
        self
    }

    pub fn with_fetch_config(self, config: &FetchConfig) -> Self {
        self.with_timeouts(config.supplier_timeout(), config.global_timeout())
    }

    pub fn with_metrics(mut self, metrics: AggregatorMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn suppliers(&self) -> &[SupplierDescriptor] {
        &self.suppliers
    }

    pub fn registry(&self) -> &Arc<ParserRegistry> {
        &self.registry
    }

    /// Builds the cross-supplier summary for `part_number`.
    ///
    /// Fails with `AllSuppliersUnreachable` when no supplier answered,
    /// `PartNotFound` when no answering supplier with a parser lists the part, and
    /// `Internal` when a matched part cannot be expanded.
    pub async fn aggregate(&self, part_number: &str) -> PartlinkResult<AggregatedPartSummary> {
        let result = self.lookup(part_number).await;

        if let Some(metrics) = &self.metrics {
            let outcome = match &result {
                Ok(_) => "ok",
                Err(PartlinkError::PartNotFound { .. }) => "not_found",
                Err(PartlinkError::AllSuppliersUnreachable) => "unavailable",
                Err(_) => "internal",
            };
            metrics.record_request(outcome);
        }

        result
    }

    async fn lookup(&self, part_number: &str) -> PartlinkResult<AggregatedPartSummary> {
        let responses = self.fetch_all().await;
        if responses.is_empty() {
            warn!(part_number, suppliers = self.suppliers.len(), "No supplier catalog could be retrieved");
            return Err(PartlinkError::AllSuppliersUnreachable);
        }

        let (parts, parsers) = self.parse_all(&responses, part_number).await;
        if parts.is_empty() {
            info!(part_number, "Part not listed by any reachable supplier");
            return Err(PartlinkError::part_not_found(part_number));
        }

        let summary = merge_parts(part_number, &parts, &parsers)?;
        info!(
            part_number,
            sources = ?summary.source_parts,
            total_stock = summary.total_stock,
            "Aggregated part summary"
        );
        Ok(summary)
    }

    /// Settles every supplier retrieval and keeps the successes in configured order.
    async fn fetch_all(&self) -> Vec<RawSupplierResponse> {
        // All retrievals start together, so the global deadline caps each one
        let deadline = self.supplier_timeout.min(self.global_timeout);

        let retrievals = self.suppliers.iter().map(|supplier| async move {
            let started = Instant::now();
            let result = match timeout(deadline, self.fetcher.fetch(supplier)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(deadline)),
            };
            (supplier, result, started.elapsed())
        });

        let mut responses = Vec::with_capacity(self.suppliers.len());
        for (supplier, result, elapsed) in join_all(retrievals).await {
            match result {
                Ok(response) => {
                    debug!(supplier = %supplier.name, elapsed_ms = elapsed.as_millis() as u64, "Supplier catalog retrieved");
                    self.record_fetch(&supplier.name, "ok", elapsed);
                    responses.push(response);
                }
                Err(error) => {
                    self.record_fetch(&supplier.name, error.outcome(), elapsed);
                    self.record_skip(&supplier.name, "unreachable");
                    let error = error.into_error(&supplier.name);
                    warn!(
                        supplier = %supplier.name,
                        reason = "unreachable",
                        error = %error,
                        "Excluding supplier from lookup"
                    );
                }
            }
        }

        responses
    }

    /// Extracts matches from every response that has a registered parser.
    ///
    /// The parsers used are captured so the merge stage sees the same ones even
    /// if the registry changes mid-request.
    async fn parse_all(
        &self,
        responses: &[RawSupplierResponse],
        part_number: &str,
    ) -> (Vec<NormalizedPart>, ResolvedParsers) {
        let mut parts = Vec::new();
        let mut parsers = ResolvedParsers::new();

        for response in responses {
            let supplier = response.supplier_name.as_str();
            let Some(parser) = self.registry.get_parser(supplier).await else {
                self.record_skip(supplier, "parser_missing");
                warn!(
                    supplier,
                    reason = "parser_missing",
                    error = %PartlinkError::parser_missing(supplier),
                    "Excluding supplier from lookup"
                );
                continue;
            };

            let matches = parser.extract_parts(response, part_number);
            debug!(supplier, catalog = parser.catalog(), matches = matches.len(), "Parsed supplier catalog");

            parts.extend(matches);
            parsers.insert(supplier.to_string(), parser);
        }

        (parts, parsers)
    }

    fn record_fetch(&self, supplier: &str, outcome: &str, elapsed: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record_fetch(supplier, outcome, elapsed);
        }
    }

    fn record_skip(&self, supplier: &str, reason: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_skip(supplier, reason);
        }
    }
}
