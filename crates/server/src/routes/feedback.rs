// crates/server/src/routes/feedback.rs
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use drishti_core::dialect::feedback;
use drishti_core::FeedbackRecord;
use drishti_remote::fetch_all;

use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/feedback - All feedback, newest first.
pub async fn list_feedback(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FeedbackRecord>>> {
    let text = fetch_all(state.transport.as_ref(), &state.paths.feedback)
        .await
        .context("Failed to fetch feedback data")?;
    let mut records = feedback::parse(&text).records;
    feedback::sort_newest_first(&mut records);
    Ok(Json(records))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/feedback", get(list_feedback))
}
