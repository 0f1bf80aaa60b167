// crates/server/src/routes/tickets.rs
//! Ticket listing and the one write path: update status, priority or admin response.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use drishti_core::dialect::ticket::{self, TicketTable};
use drishti_core::{TicketError, TicketPriority, TicketRecord, TicketStatus, TicketUpdate};
use drishti_remote::{fetch_all, overwrite};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult, RemoteContext};
use crate::state::AppState;

const UPDATE_FAILED: &str = "Failed to update ticket";

/// GET /api/tickets - Every readable ticket in file order.
pub async fn list_tickets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TicketRecord>>> {
    let text = fetch_all(state.transport.as_ref(), &state.paths.tickets)
        .await
        .context("Failed to fetch tickets data")?;
    Ok(Json(ticket::parse(&text).records))
}

#[derive(Debug, Deserialize)]
pub struct TicketIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdateBody {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub admin_response: Option<String>,
}

impl TryFrom<TicketUpdateBody> for TicketUpdate {
    type Error = TicketError;

    fn try_from(body: TicketUpdateBody) -> Result<Self, Self::Error> {
        Ok(TicketUpdate {
            status: body.status.as_deref().map(str::parse::<TicketStatus>).transpose()?,
            priority: body
                .priority
                .as_deref()
                .map(str::parse::<TicketPriority>)
                .transpose()?,
            admin_response: body.admin_response,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TicketUpdateResponse {
    pub message: String,
    pub ticket: TicketRecord,
}

/// PUT /api/tickets?id=… - Update one ticket and rewrite the ticket file.
///
/// Read, patch and write are not coordinated with other writers; the last
/// write wins.
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TicketIdQuery>,
    body: Result<Json<TicketUpdateBody>, JsonRejection>,
) -> ApiResult<Json<TicketUpdateResponse>> {
    let id = query
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Ticket ID is required".into()))?;

    let Json(body) = body?;
    let update = TicketUpdate::try_from(body)?;
    if update.is_empty() {
        return Err(TicketError::EmptyUpdate.into());
    }

    let transport = state.transport.as_ref();
    let path = &state.paths.tickets;

    let text = fetch_all(transport, path).await.context(UPDATE_FAILED)?;
    let (mut table, _) = TicketTable::parse(&text);
    let ticket = table.apply_update(&id, &update, Utc::now())?;
    let content = table.to_csv()?;
    overwrite(transport, path, &content).await.context(UPDATE_FAILED)?;

    tracing::info!(ticket_id = %id, status = ?update.status, priority = ?update.priority, "ticket updated");
    Ok(Json(TicketUpdateResponse {
        message: "Ticket updated successfully".to_string(),
        ticket,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/tickets", get(list_tickets).put(update_ticket))
}
