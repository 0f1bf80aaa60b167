// crates/server/src/routes/visibility.rs
//! Camera visibility classifications (headerless, date and time in separate columns).

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use drishti_core::dialect::visibility;
use drishti_core::VisibilityRecord;
use drishti_remote::{fetch_tail, DEFAULT_TAIL_LINES};

use super::filter::RecordQuery;
use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/visibility - Latest visibility records, optionally filtered.
pub async fn list_visibility(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<Vec<VisibilityRecord>>> {
    let filter = query.to_correlation()?;
    let text = fetch_tail(state.transport.as_ref(), &state.paths.visibility, DEFAULT_TAIL_LINES)
        .await
        .context("Failed to fetch visibility data")?;
    let records = visibility::parse(&text).records;
    Ok(Json(filter.filter(records)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/visibility", get(list_visibility))
}
