use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierStatus {
    pub name: String,
    pub url: String,
    pub parser_registered: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppliersResponse {
    pub suppliers: Vec<SupplierStatus>,
    pub registered_parsers: Vec<String>,
}

/// Configured suppliers and whether each one can currently be parsed.
pub async fn list_suppliers(State(state): State<AppState>) -> Json<SuppliersResponse> {
    let registered_parsers = state.aggregator.registry().registered_suppliers().await;

    let suppliers = state
        .aggregator
        .suppliers()
        .iter()
        .map(|supplier| SupplierStatus {
            name: supplier.name.clone(),
            url: supplier.endpoint.clone(),
            parser_registered: registered_parsers.contains(&supplier.name),
        })
        .collect();

    Json(SuppliersResponse {
        suppliers,
        registered_parsers,
    })
}
