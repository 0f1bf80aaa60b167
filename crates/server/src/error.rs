// crates/server/src/error.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drishti_core::TicketError;
use drishti_remote::RemoteError;
use serde::Serialize;
use thiserror::Error;

/// Structured JSON error body: a human message plus optional diagnostics.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or write failure, with the endpoint's context message.
    #[error("{context}: {source}")]
    Remote {
        context: &'static str,
        #[source]
        source: RemoteError,
    },

    #[error(transparent)]
    Ticket(#[from] TicketError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid JSON body: {0}")]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Remote { context, source } => {
                tracing::error!(context = %context, error = %source, "remote operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_error(*context, source.to_string()),
                )
            }
            ApiError::Ticket(err) => match err {
                TicketError::NotFound { id } => {
                    tracing::warn!(ticket_id = %id, "Ticket not found");
                    (StatusCode::NOT_FOUND, ErrorResponse::new("Ticket not found"))
                }
                TicketError::EmptyUpdate => (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("No update data provided"),
                ),
                TicketError::InvalidStatus(_) | TicketError::InvalidPriority(_) => {
                    tracing::warn!(error = %err, "Invalid ticket update");
                    (StatusCode::BAD_REQUEST, ErrorResponse::with_error("Invalid ticket update", err.to_string()))
                }
                TicketError::Encode(msg) => {
                    tracing::error!(error = %msg, "Ticket encode failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::with_error("Failed to update ticket", msg.clone()),
                    )
                }
            },
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone()))
            }
            ApiError::Body(rejection) => {
                tracing::warn!(error = %rejection, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_error("Invalid request body", rejection.body_text()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Attach an endpoint message to a remote failure.
pub trait RemoteContext<T> {
    fn context(self, context: &'static str) -> ApiResult<T>;
}

impl<T> RemoteContext<T> for Result<T, RemoteError> {
    fn context(self, context: &'static str) -> ApiResult<T> {
        self.map_err(|source| ApiError::Remote { context, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn extract_response(response: Response) -> (StatusCode, ErrorResponse) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        (status, error_response)
    }

    #[tokio::test]
    async fn test_remote_failure_returns_500_with_diagnostics() {
        let result: Result<(), RemoteError> = Err(RemoteError::Execution {
            command: "tail".into(),
            status: "255".into(),
            stderr: "Connection refused".into(),
        });
        let error = result.context("Failed to fetch alcohol data").unwrap_err();
        let (status, body) = extract_response(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Failed to fetch alcohol data");
        assert!(body.error.unwrap().contains("Connection refused"));
    }

    #[tokio::test]
    async fn test_write_failure_returns_500() {
        let error = ApiError::Remote {
            context: "Failed to update ticket",
            source: RemoteError::Write {
                path: "/t.csv".into(),
                message: "broken pipe".into(),
            },
        };
        let (status, body) = extract_response(error.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Failed to update ticket");
    }

    #[tokio::test]
    async fn test_ticket_not_found_returns_404() {
        let error: ApiError = TicketError::NotFound { id: "CMPLT999".into() }.into();
        let (status, body) = extract_response(error.into_response()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Ticket not found");
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_update_returns_400() {
        let error: ApiError = TicketError::EmptyUpdate.into();
        let (status, body) = extract_response(error.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "No update data provided");
    }

    #[tokio::test]
    async fn test_invalid_status_returns_400() {
        let error: ApiError = TicketError::InvalidStatus("Closed".into()).into();
        let (status, body) = extract_response(error.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.unwrap().contains("Closed"));
    }

    #[tokio::test]
    async fn test_bad_request_returns_400() {
        let error = ApiError::BadRequest("Ticket ID is required".into());
        let (status, body) = extract_response(error.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Ticket ID is required");
    }

    #[test]
    fn test_error_response_omits_empty_error() {
        let json = serde_json::to_string(&ErrorResponse::new("x")).unwrap();
        assert_eq!(json, r#"{"message":"x"}"#);
    }
}
