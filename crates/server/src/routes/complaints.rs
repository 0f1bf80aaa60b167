// crates/server/src/routes/complaints.rs
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use drishti_core::dialect::complaint;
use drishti_core::ComplaintRecord;
use drishti_remote::fetch_all;

use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/complaints - Every complaint in file order.
pub async fn list_complaints(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ComplaintRecord>>> {
    let text = fetch_all(state.transport.as_ref(), &state.paths.complaints)
        .await
        .context("Failed to fetch complaints data")?;
    let output = complaint::parse(&text);
    tracing::debug!(
        records = output.records.len(),
        skipped = output.warnings.len(),
        "complaints parsed"
    );
    Ok(Json(output.records))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/complaints", get(list_complaints))
}
