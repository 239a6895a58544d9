use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use partlink_utils::{AppConfig, PartlinkError};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::error;

use crate::error::ApiError;
use crate::handlers::{health_check, metrics_handler};
use crate::metrics::AggregatorMetrics;
use crate::middleware::request_id_middleware;
use crate::routes;
use crate::service::Aggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub metrics: Option<AggregatorMetrics>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(aggregator: Aggregator, metrics: Option<AggregatorMetrics>, config: AppConfig) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            metrics,
            config: Arc::new(config),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server.max_request_size;
    let request_timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        // API routes
        .merge(routes::create_api_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(AnyOrigin)
                        .allow_methods([Method::GET])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(TimeoutLayer::new(request_timeout))
                .layer(DefaultBodyLimit::max(max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "Request handler panicked");
    ApiError(PartlinkError::internal(detail)).into_response()
}
