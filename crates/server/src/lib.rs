// crates/server/src/lib.rs
//! Drishti admin server library.
//!
//! Axum HTTP API over the vehicle-monitoring CSV logs kept on the data host.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError, TransportConfig};
pub use error::*;
pub use routes::api_routes;
pub use state::{AppState, RemotePaths};

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes under `/api`
/// - CORS for the dashboard frontend (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
