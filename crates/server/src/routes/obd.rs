// crates/server/src/routes/obd.rs
//! OBD track log.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use drishti_core::dialect::obd;
use drishti_core::ObdRecord;
use drishti_remote::{fetch_tail_with_header, DEFAULT_TAIL_LINES};

use super::filter::RecordQuery;
use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/obd - Last OBD samples with normalized headers and sniffed types.
pub async fn list_obd(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<Vec<ObdRecord>>> {
    let filter = query.to_correlation()?;
    let text = fetch_tail_with_header(state.transport.as_ref(), &state.paths.obd, DEFAULT_TAIL_LINES)
        .await
        .context("Failed to fetch OBD data")?;
    let records = obd::parse(&text).records;
    Ok(Json(filter.filter(records)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/obd", get(list_obd))
}
