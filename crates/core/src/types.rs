// crates/core/src/types.rs
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use serde::Serialize;

use crate::timestamp::parse_timestamp;

/// Placeholder used when a record's vehicle cannot be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// The log family a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFamily {
    Alcohol,
    Complaint,
    Drowsiness,
    Feedback,
    History,
    Obd,
    Ticket,
    Visibility,
}

impl LogFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFamily::Alcohol => "alcohol",
            LogFamily::Complaint => "complaint",
            LogFamily::Drowsiness => "drowsiness",
            LogFamily::Feedback => "feedback",
            LogFamily::History => "history",
            LogFamily::Obd => "obd",
            LogFamily::Ticket => "ticket",
            LogFamily::Visibility => "visibility",
        }
    }
}

impl std::fmt::Display for LogFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamp column value: parsed when possible, otherwise the raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Parsed(DateTime<Utc>),
    Raw(String),
}

impl Timestamp {
    pub fn from_raw(raw: &str) -> Self {
        match parse_timestamp(raw) {
            Some(ts) => Timestamp::Parsed(ts),
            None => Timestamp::Raw(raw.to_string()),
        }
    }

    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Parsed(ts) => Some(*ts),
            Timestamp::Raw(_) => None,
        }
    }
}

/// A loosely-typed cell for dialects whose columns are only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Missing,
}

impl FieldValue {
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            FieldValue::Text(text) => parse_timestamp(text),
            _ => None,
        }
    }
}

/// Common view over every record that can appear on a vehicle timeline.
pub trait TimelineRecord {
    fn family(&self) -> LogFamily;

    /// Normalized vehicle identifier, `"N/A"` when unknown.
    fn vehicle_identifier(&self) -> &str;

    /// Timestamp used for window filtering and ordering.
    fn display_timestamp(&self) -> Option<DateTime<Utc>>;
}

/// MQ-3 alcohol sensor sample: `2025-07-01T13:16:08.723716+05:30,Sensor Value: 323`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlcoholRecord {
    pub timestamp: Timestamp,
    pub sensor_value: Option<i64>,
    pub vehicle_number: String,
}

/// Driver drowsiness detector row. Keys keep the log's snake_case header names;
/// header columns beyond the known ones pass through as text in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrowsinessRecord {
    pub image_name: String,
    pub timestamp: Timestamp,
    pub left_ear: Option<f64>,
    pub right_ear: Option<f64>,
    pub closed_ratio: Option<f64>,
    pub state: String,
    pub alert: String,
    #[serde(rename = "vehicleNumber")]
    pub vehicle_number: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Windshield visibility sample: `2025-06-24,15:15:49,image_20250624_151549.jpg,69.28,78.33`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRecord {
    pub date: String,
    pub time: String,
    pub image_name: String,
    pub metric1: Option<f64>,
    pub metric2: Option<f64>,
    pub timestamp: Timestamp,
    pub vehicle_number: String,
}

/// A row of the master alert log. Columns are whatever the header declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(rename = "vehicleNumber")]
    pub vehicle_number: String,
}

/// A row of the on-board-diagnostics track log, keyed by normalized header names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObdRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(rename = "vehicleNumber")]
    pub vehicle_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRecord {
    pub id: String,
    pub category: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub vehicle_number: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub admin_response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: String,
    pub category: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub vehicle_number: String,
    pub title: String,
    pub rating: u8,
    pub date: DateTime<Utc>,
    pub admin_response: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub topic: String,
}

/// A support ticket as served to the dashboard.
///
/// `extra` carries any columns the ticket file has beyond the known ones so
/// they survive a read-modify-write cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: String,
    pub vehicle_number: String,
    pub issue_type: String,
    pub title: String,
    pub description: String,
    pub incident_date: Timestamp,
    pub incident_time: String,
    pub status: String,
    pub priority: String,
    pub created_at: Timestamp,
    pub admin_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl TimelineRecord for AlcoholRecord {
    fn family(&self) -> LogFamily {
        LogFamily::Alcohol
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.parsed()
    }
}

impl TimelineRecord for DrowsinessRecord {
    fn family(&self) -> LogFamily {
        LogFamily::Drowsiness
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.parsed()
    }
}

impl TimelineRecord for VisibilityRecord {
    fn family(&self) -> LogFamily {
        LogFamily::Visibility
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.parsed()
    }
}

impl TimelineRecord for HistoryRecord {
    fn family(&self) -> LogFamily {
        LogFamily::History
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        self.fields.get("datetime").and_then(FieldValue::as_timestamp)
    }
}

impl TimelineRecord for ObdRecord {
    fn family(&self) -> LogFamily {
        LogFamily::Obd
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    /// GPS time when present, device time otherwise.
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        ["GPSTime", "DeviceTime"]
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(FieldValue::as_timestamp))
    }
}

impl TimelineRecord for ComplaintRecord {
    fn family(&self) -> LogFamily {
        LogFamily::Complaint
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.timestamp)
    }
}

impl TimelineRecord for FeedbackRecord {
    fn family(&self) -> LogFamily {
        LogFamily::Feedback
    }
    fn vehicle_identifier(&self) -> &str {
        &self.vehicle_number
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.timestamp)
    }
}
