// crates/server/src/routes/history.rs
//! Master history log, plus the cross-log vehicle timeline.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use drishti_core::dialect::{alcohol, drowsiness, history, obd, visibility, ParseOutput};
use drishti_core::{correlate, source, CorrelatedHistoryEntry, HistoryRecord, LogFamily, SourceRecord};
use drishti_remote::{fetch_all, fetch_tail, fetch_tail_with_header, RemoteError, DEFAULT_TAIL_LINES};
use serde::Serialize;

use super::filter::RecordQuery;
use crate::error::{ApiResult, RemoteContext};
use crate::state::AppState;

/// GET /api/history - The whole master log, unfiltered.
pub async fn list_history(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<HistoryRecord>>> {
    let text = fetch_all(state.transport.as_ref(), &state.paths.history)
        .await
        .context("Failed to fetch history data")?;
    Ok(Json(history::parse(&text).records))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub vehicle_number: Option<String>,
    pub records: Vec<CorrelatedHistoryEntry>,
    /// Sources that could not be fetched and were left out.
    pub skipped_sources: Vec<LogFamily>,
}

/// GET /api/history/timeline - Records from every log for one vehicle and window.
///
/// The master log is read whole; the sensor logs contribute their latest
/// entries only. A source that fails to load is skipped, not fatal.
pub async fn history_timeline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<TimelineResponse>> {
    let filter = query.to_correlation()?;
    let transport = state.transport.as_ref();
    let paths = &state.paths;

    let loaded = tokio::join!(
        load(LogFamily::History, fetch_all(transport, &paths.history), history::parse),
        load(
            LogFamily::Obd,
            fetch_tail_with_header(transport, &paths.obd, DEFAULT_TAIL_LINES),
            obd::parse
        ),
        load(
            LogFamily::Alcohol,
            fetch_tail(transport, &paths.alcohol, DEFAULT_TAIL_LINES),
            alcohol::parse
        ),
        load(
            LogFamily::Drowsiness,
            fetch_tail_with_header(transport, &paths.drowsiness, DEFAULT_TAIL_LINES),
            drowsiness::parse
        ),
        load(
            LogFamily::Visibility,
            fetch_tail(transport, &paths.visibility, DEFAULT_TAIL_LINES),
            visibility::parse
        ),
    );

    let mut sources = Vec::with_capacity(5);
    let mut skipped_sources = Vec::new();
    for (family, result) in [loaded.0, loaded.1, loaded.2, loaded.3, loaded.4] {
        match result {
            Ok(records) => sources.push(records),
            Err(e) => {
                tracing::warn!(family = %family, error = %e, "timeline source unavailable, skipping");
                skipped_sources.push(family);
            }
        }
    }

    let records = correlate(&filter, sources);
    Ok(Json(TimelineResponse {
        vehicle_number: filter.vehicle,
        records,
        skipped_sources,
    }))
}

async fn load<R, F, P>(
    family: LogFamily,
    fetch: F,
    parse: P,
) -> (LogFamily, Result<Vec<SourceRecord>, RemoteError>)
where
    R: Into<SourceRecord>,
    F: Future<Output = Result<String, RemoteError>>,
    P: FnOnce(&str) -> ParseOutput<R>,
{
    let result = fetch.await.map(|text| source(parse(&text).records));
    (family, result)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/history", get(list_history))
        .route("/history/timeline", get(history_timeline))
}
