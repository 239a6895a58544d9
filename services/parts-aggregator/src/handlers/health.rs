use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use tracing::error;

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "partlink-aggregator",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition; 404 when metrics are disabled.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let Some(metrics) = state.metrics.as_ref() else {
        return (StatusCode::NOT_FOUND, "metrics disabled").into_response();
    };

    match metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error encoding metrics").into_response()
        }
    }
}
