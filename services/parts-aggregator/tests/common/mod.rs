#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use partlink_aggregator::{
    create_app, Aggregator, AggregatorMetrics, AppState, FetchError, ParserRegistry,
    SupplierFetcher,
};
use partlink_models::{RawSupplierResponse, SupplierDescriptor};
use partlink_utils::AppConfig;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub fn arrow_fixture() -> Value {
    serde_json::from_str(include_str!("../fixtures/arrow.json")).unwrap()
}

pub fn tti_fixture() -> Value {
    serde_json::from_str(include_str!("../fixtures/tti.json")).unwrap()
}

pub fn suppliers() -> Vec<SupplierDescriptor> {
    vec![
        SupplierDescriptor::new("Arrow", "https://catalog.test/arrow.json"),
        SupplierDescriptor::new("TTI", "https://catalog.test/tti.json"),
    ]
}

/// Serves canned payloads by supplier name; unknown suppliers fail.
#[derive(Default, Clone)]
pub struct StaticFetcher {
    payloads: HashMap<String, Value>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures() -> Self {
        Self::new()
            .with("Arrow", arrow_fixture())
            .with("TTI", tti_fixture())
    }

    pub fn with(mut self, supplier: &str, payload: Value) -> Self {
        self.payloads.insert(supplier.to_string(), payload);
        self
    }
}

#[async_trait]
impl SupplierFetcher for StaticFetcher {
    async fn fetch(&self, supplier: &SupplierDescriptor) -> Result<RawSupplierResponse, FetchError> {
        self.payloads
            .get(&supplier.name)
            .map(|payload| RawSupplierResponse::new(supplier.name.clone(), payload.clone()))
            .ok_or(FetchError::Status(503))
    }
}

pub async fn aggregator(fetcher: StaticFetcher) -> Aggregator {
    let registry = ParserRegistry::with_default_parsers().await.unwrap();
    Aggregator::new(suppliers(), Arc::new(registry), Arc::new(fetcher))
}

pub async fn test_app(fetcher: StaticFetcher) -> Router {
    let metrics = AggregatorMetrics::new("partlink").unwrap();
    let aggregator = aggregator(fetcher).await.with_metrics(metrics.clone());

    let mut config = AppConfig::default();
    config.suppliers = suppliers();

    create_app(AppState::new(aggregator, Some(metrics), config))
}
