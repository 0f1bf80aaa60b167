// crates/server/src/routes/drowsiness.rs
//! Driver drowsiness detections. The log is headered, so the tail keeps line one.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use drishti_core::dialect::drowsiness;
use drishti_core::DrowsinessRecord;
use drishti_remote::{fetch_tail_with_header, DEFAULT_TAIL_LINES};

use super::filter::RecordQuery;
use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/drowsiness - Latest detections, optionally filtered.
pub async fn list_drowsiness(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<Vec<DrowsinessRecord>>> {
    let filter = query.to_correlation()?;
    let text = fetch_tail_with_header(state.transport.as_ref(), &state.paths.drowsiness, DEFAULT_TAIL_LINES)
        .await
        .context("Failed to fetch drowsiness data")?;
    let records = drowsiness::parse(&text).records;
    Ok(Json(filter.filter(records)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/drowsiness", get(list_drowsiness))
}
