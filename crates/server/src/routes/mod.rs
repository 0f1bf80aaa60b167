// crates/server/src/routes/mod.rs
//! API route handlers.

pub mod alcohol;
pub mod complaints;
pub mod drowsiness;
pub mod feedback;
pub mod filter;
pub mod health;
pub mod history;
pub mod obd;
pub mod tickets;
pub mod visibility;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the API router with all routes.
///
/// Routes:
/// - GET  /api/health - Health check
/// - GET  /api/alcohol - Latest alcohol sensor readings
/// - GET  /api/complaints - All complaints
/// - GET  /api/drowsiness - Latest drowsiness detections
/// - GET  /api/feedback - All feedback, newest first
/// - GET  /api/history - Master history log
/// - GET  /api/history/timeline - Correlated cross-log timeline
/// - GET  /api/obd - Latest OBD samples
/// - GET  /api/tickets - All tickets
/// - PUT  /api/tickets?id= - Update a ticket
/// - GET  /api/visibility - Latest visibility classifications
///
/// Sensor endpoints accept `vehicleNumber`, `startTime` and `endTime`.
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", alcohol::router())
        .nest("/api", complaints::router())
        .nest("/api", drowsiness::router())
        .nest("/api", feedback::router())
        .nest("/api", history::router())
        .nest("/api", obd::router())
        .nest("/api", tickets::router())
        .nest("/api", visibility::router())
        .with_state(state)
}
