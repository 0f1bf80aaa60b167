// crates/core/src/mutation.rs
//! In-place update of a ticket's mutable fields.
//!
//! The caller rewrites the whole remote file with the result. That rewrite is
//! not atomic and concurrent editors are last-writer-wins.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dialect::ticket::TicketTable;
use crate::error::TicketError;
use crate::timestamp::format_timestamp;
use crate::types::TicketRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Pending,
    Processing,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::Processing => "Processing",
            TicketStatus::Resolved => "Resolved",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TicketStatus::Pending),
            "processing" => Ok(TicketStatus::Processing),
            "resolved" => Ok(TicketStatus::Resolved),
            _ => Err(TicketError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
            TicketPriority::Critical => "Critical",
        }
    }
}

impl FromStr for TicketPriority {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "critical" => Ok(TicketPriority::Critical),
            _ => Err(TicketError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields an administrator may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub admin_response: Option<String>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.admin_response.is_none()
    }
}

impl TicketTable {
    /// Apply `update` to the ticket whose `id` matches exactly and stamp
    /// `updatedAt` with `now`. Other rows are only touched by column additions.
    pub fn apply_update(
        &mut self,
        id: &str,
        update: &TicketUpdate,
        now: DateTime<Utc>,
    ) -> Result<TicketRecord, TicketError> {
        if update.is_empty() {
            return Err(TicketError::EmptyUpdate);
        }

        let id_col = self.column_index("id");
        let position = id_col
            .and_then(|col| {
                self.rows
                    .iter()
                    .position(|row| row.fits && row.values.get(col).map(String::as_str) == Some(id))
            })
            .ok_or_else(|| TicketError::NotFound { id: id.to_string() })?;

        let mut changes: Vec<(usize, String)> = Vec::with_capacity(4);
        if let Some(status) = update.status {
            changes.push((self.ensure_column("status"), status.as_str().to_string()));
        }
        if let Some(priority) = update.priority {
            changes.push((self.ensure_column("priority"), priority.as_str().to_string()));
        }
        if let Some(response) = &update.admin_response {
            changes.push((self.ensure_column("adminResponse"), response.clone()));
        }
        changes.push((self.ensure_column("updatedAt"), format_timestamp(&now)));

        let row = &mut self.rows[position];
        for (col, value) in changes {
            row.values[col] = value;
        }

        tracing::debug!(ticket_id = %id, "ticket updated in table");
        Ok(self.to_record(&self.rows[position], true))
    }
}
