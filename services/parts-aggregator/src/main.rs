use anyhow::{Context, Result};
use axum::serve;
use partlink_aggregator::{
    create_app, Aggregator, AggregatorMetrics, AppState, HttpSupplierFetcher, ParserRegistry,
};
use partlink_utils::{init_logging, AppConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Partlink aggregator");

    config.validate()?;

    let registry = Arc::new(ParserRegistry::with_default_parsers().await?);
    info!(
        parsers = ?registry.registered_suppliers().await,
        "Supplier parsers registered"
    );

    let fetcher = Arc::new(HttpSupplierFetcher::new(&config.fetch)?);

    let metrics = if config.monitoring.metrics_enabled {
        Some(AggregatorMetrics::new(&config.monitoring.prometheus_namespace)?)
    } else {
        None
    };

    let mut aggregator = Aggregator::new(config.suppliers.clone(), registry, fetcher)
        .with_fetch_config(&config.fetch);
    if let Some(metrics) = &metrics {
        aggregator = aggregator.with_metrics(metrics.clone());
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server bind address")?;

    let app = create_app(AppState::new(aggregator, metrics, config));

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    info!("Partlink aggregator listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}
