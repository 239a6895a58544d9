//! Part lookup handler
//!
//! GET /parts?partNumber=<pn>

use axum::{
    extract::{Query, State},
    response::Json,
};
use partlink_models::AggregatedPartSummary;
use partlink_utils::validate_part_number;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartQuery {
    pub part_number: Option<String>,
}

pub async fn get_part(
    State(state): State<AppState>,
    Query(query): Query<PartQuery>,
) -> ApiResult<Json<AggregatedPartSummary>> {
    let part_number = validate_part_number(query.part_number.as_deref().unwrap_or_default())?;
    debug!(part_number = %part_number, "Part lookup requested");

    let summary = state.aggregator.aggregate(&part_number).await?;
    Ok(Json(summary))
}
