use axum::{routing::get, Router};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/parts", get(get_part))
        .route("/suppliers", get(list_suppliers))
}
