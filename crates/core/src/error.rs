// crates/core/src/error.rs
use thiserror::Error;

/// Errors from updating a ticket in the ticket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("Ticket not found: {id}")]
    NotFound { id: String },

    #[error("No update data provided")]
    EmptyUpdate,

    #[error("Invalid ticket status: {0}")]
    InvalidStatus(String),

    #[error("Invalid ticket priority: {0}")]
    InvalidPriority(String),

    #[error("Failed to encode ticket table: {0}")]
    Encode(String),
}
