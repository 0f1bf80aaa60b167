// crates/server/src/routes/alcohol.rs
//! Breath-alcohol sensor readings.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use drishti_core::dialect::alcohol;
use drishti_core::AlcoholRecord;
use drishti_remote::{fetch_tail, DEFAULT_TAIL_LINES};

use super::filter::RecordQuery;
use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/alcohol - Latest alcohol records, optionally filtered.
pub async fn list_alcohol(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<Vec<AlcoholRecord>>> {
    let filter = query.to_correlation()?;
    let text = fetch_tail(state.transport.as_ref(), &state.paths.alcohol, DEFAULT_TAIL_LINES)
        .await
        .context("Failed to fetch alcohol data")?;
    let records = alcohol::parse(&text).records;
    Ok(Json(filter.filter(records)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/alcohol", get(list_alcohol))
}
