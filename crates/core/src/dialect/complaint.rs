// crates/core/src/dialect/complaint.rs
//! Complaints submitted from the passenger app:
//! `"CMPLT70554799","category","message","2025-07-01T11:49:14.800Z"`.

use chrono::{DateTime, Utc};

use super::{read_table, Arity, Column, ColumnKind, DialectSpec, HeaderMode, ParseOutput, RawRow};
use crate::extract::extract_vehicle_identifier;
use crate::timestamp::parse_timestamp;
use crate::types::{ComplaintRecord, LogFamily, NOT_AVAILABLE};

/// Columns shared by the complaint and feedback logs.
pub(crate) const MESSAGE_COLUMNS: &[Column] = &[
    Column::new("id", ColumnKind::Text),
    Column::new("category", ColumnKind::Text),
    Column::new("description", ColumnKind::Text),
    Column::new("timestamp", ColumnKind::Timestamp),
];

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Complaint,
    header: HeaderMode::Headerless,
    arity: Arity::Padded,
    columns: MESSAGE_COLUMNS,
};

/// Fields common to complaint and feedback rows.
pub(crate) struct MessageFields {
    pub id: String,
    pub category: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub vehicle_number: String,
}

impl MessageFields {
    /// The submission time is required; an unreadable one becomes `now`.
    pub(crate) fn from_row(row: &RawRow, now: DateTime<Utc>) -> Self {
        let description = row.values[2].clone();
        Self {
            id: row.values[0].clone(),
            category: row.values[1].clone(),
            timestamp: parse_timestamp(&row.values[3]).unwrap_or(now),
            vehicle_number: extract_vehicle_identifier(&description)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            description,
        }
    }
}

pub fn parse(text: &str) -> ParseOutput<ComplaintRecord> {
    parse_at(text, Utc::now())
}

pub fn parse_at(text: &str, now: DateTime<Utc>) -> ParseOutput<ComplaintRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);

    let records = table
        .fitting_rows()
        .map(|row| {
            let fields = MessageFields::from_row(row, now);
            let title = if fields.category.is_empty() {
                "Complaint".to_string()
            } else {
                fields.category.clone()
            };
            ComplaintRecord {
                id: fields.id,
                category: fields.category,
                description: fields.description,
                timestamp: fields.timestamp,
                status: "Pending".to_string(),
                vehicle_number: fields.vehicle_number,
                title,
                date: fields.timestamp,
                admin_response: String::new(),
            }
        })
        .collect();

    ParseOutput { records, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_quoted_complaint() {
        let text = r#""CMPLT70554799","Rash driving","Driver of MH12AB1234 complained, twice","2025-07-01T11:49:14.800Z""#;
        let out = parse_at(text, now());
        assert!(out.warnings.is_empty());
        let c = &out.records[0];
        assert_eq!(c.id, "CMPLT70554799");
        assert_eq!(c.description, "Driver of MH12AB1234 complained, twice");
        assert_eq!(c.vehicle_number, "MH12AB1234");
        assert_eq!(c.status, "Pending");
        assert_eq!(c.title, "Rash driving");
        assert_eq!(c.date, c.timestamp);
        assert_eq!(c.admin_response, "");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let out = parse_at("\"CMPLT1\",\"\",\"seat broken\"", now());
        let c = &out.records[0];
        assert_eq!(c.title, "Complaint");
        assert_eq!(c.vehicle_number, "N/A");
        // No timestamp column: falls back to "now".
        assert_eq!(c.timestamp, now());
    }

    #[test]
    fn test_too_many_fields_skipped() {
        let text = "\"A\",\"b\",\"c\",\"2025-07-01T11:49:14Z\",\"extra\"\n\"B\",\"b\",\"c\",\"2025-07-01T11:49:14Z\"";
        let out = parse_at(text, now());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].id, "B");
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_unterminated_quote_only_loses_its_own_line() {
        let text = "C1,cat,\"broken seat,2025-07-01T10:00:00Z\n\
C2,cat,AC not working,2025-07-01T11:00:00Z\n\
C3,cat,late,2025-07-01T12:00:00Z\n";
        let out = parse_at(text, now());
        let ids: Vec<_> = out.records.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C2", "C3"]);
        assert_eq!(out.records[0].description, "AC not working");
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 1);
        assert!(out.warnings[0].message.contains("unterminated"));
    }

    #[test]
    fn test_empty() {
        let out = parse_at("", now());
        assert!(out.records.is_empty());
        assert!(out.warnings.is_empty());
    }
}
