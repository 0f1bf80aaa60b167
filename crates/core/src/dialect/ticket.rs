// crates/core/src/dialect/ticket.rs
//! Ticket log, the one file the dashboard writes back.
//!
//! Headered, e.g.
//! `id,vehicleNumber,issueType,title,description,incidentDate,incidentTime,status,priority,createdAt,adminResponse[,updatedAt]`.
//! Short rows are padded. Rows that cannot be read are not served, but are
//! written back verbatim so a rewrite never drops data it did not understand.

use std::collections::BTreeMap;

use super::{read_table, Arity, Column, ColumnKind, DialectSpec, HeaderMode, ParseWarning, RawRow};
use crate::error::TicketError;
use crate::types::{LogFamily, TicketRecord, Timestamp};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Ticket,
    header: HeaderMode::FirstLineIsHeader,
    arity: Arity::Padded,
    columns: &[
        Column::new("id", ColumnKind::Text),
        Column::new("vehicleNumber", ColumnKind::Text),
        Column::new("issueType", ColumnKind::Text),
        Column::new("title", ColumnKind::Text),
        Column::new("description", ColumnKind::Text),
        Column::new("incidentDate", ColumnKind::Timestamp),
        Column::new("incidentTime", ColumnKind::Text),
        Column::new("status", ColumnKind::Text),
        Column::new("priority", ColumnKind::Text),
        Column::new("createdAt", ColumnKind::Timestamp),
        Column::new("adminResponse", ColumnKind::Text),
        Column::new("updatedAt", ColumnKind::Timestamp),
    ],
};

/// The whole ticket file: header plus every row in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl TicketTable {
    pub fn parse(text: &str) -> (Self, Vec<ParseWarning>) {
        let mut warnings = Vec::new();
        let raw = read_table(&SPEC, text, &mut warnings);
        (
            Self {
                headers: raw.headers,
                rows: raw.rows,
            },
            warnings,
        )
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn get<'a>(&self, row: &'a RawRow, name: &str) -> &'a str {
        self.column_index(name)
            .and_then(|idx| row.values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Append `name` to the header if absent, back-filling every readable row
    /// with an empty value. Returns the column index.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in self.rows.iter_mut().filter(|r| r.fits) {
            row.values.push(String::new());
        }
        self.headers.len() - 1
    }

    /// Readable rows as typed records.
    pub fn to_records(&self) -> Vec<TicketRecord> {
        let has_updated_at = self.column_index("updatedAt").is_some();
        self.rows
            .iter()
            .filter(|row| row.fits)
            .map(|row| self.to_record(row, has_updated_at))
            .collect()
    }

    pub(crate) fn to_record(&self, row: &RawRow, has_updated_at: bool) -> TicketRecord {
        let extra: BTreeMap<String, String> = self
            .headers
            .iter()
            .zip(&row.values)
            .filter(|(h, _)| !SPEC.columns.iter().any(|c| c.name == h.as_str()))
            .map(|(h, v)| (h.clone(), v.clone()))
            .collect();

        TicketRecord {
            id: self.get(row, "id").to_string(),
            vehicle_number: self.get(row, "vehicleNumber").to_string(),
            issue_type: self.get(row, "issueType").to_string(),
            title: self.get(row, "title").to_string(),
            description: self.get(row, "description").to_string(),
            incident_date: Timestamp::from_raw(self.get(row, "incidentDate")),
            incident_time: self.get(row, "incidentTime").to_string(),
            status: self.get(row, "status").to_string(),
            priority: self.get(row, "priority").to_string(),
            created_at: Timestamp::from_raw(self.get(row, "createdAt")),
            admin_response: self.get(row, "adminResponse").to_string(),
            updated_at: has_updated_at.then(|| Timestamp::from_raw(self.get(row, "updatedAt"))),
            extra,
        }
    }

    /// Serialize the full table back to CSV text.
    ///
    /// Fields containing a comma, quote or line break are quoted with embedded
    /// quotes doubled; everything else is written bare. A row holding a field
    /// with leading or trailing whitespace is quoted throughout so the padding
    /// survives the next read. Unreadable rows are written exactly as read.
    pub fn to_csv(&self) -> Result<String, TicketError> {
        let mut out = String::new();
        if !self.headers.is_empty() {
            out.push_str(&encode_record(&self.headers)?);
        }
        for row in &self.rows {
            if row.fits {
                out.push_str(&encode_record(&row.values)?);
            } else {
                out.push_str(&row.source);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

fn encode_record(values: &[String]) -> Result<String, TicketError> {
    let padded = values.iter().any(|v| v.trim() != v);
    let style = if padded {
        csv::QuoteStyle::Always
    } else {
        csv::QuoteStyle::Necessary
    };
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(style)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(values)
        .map_err(|e| TicketError::Encode(e.to_string()))?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| TicketError::Encode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TicketError::Encode(e.to_string()))
}

/// Parse the ticket file into served records.
pub fn parse(text: &str) -> super::ParseOutput<TicketRecord> {
    let (table, warnings) = TicketTable::parse(text);
    super::ParseOutput {
        records: table.to_records(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FILE: &str = "id,vehicleNumber,issueType,title,description,incidentDate,incidentTime,status,priority,createdAt,adminResponse\n\
T1,MH12AB1234,Brakes,Squeal,\"Loud squeal, front left\",2025-06-30,14:05,Pending,High,2025-07-01T11:49:14.800Z,\n\
T2,KA01MJ2022,Seat,Broken,\"He said \"\"fix it\"\"\",2025-06-29,09:00,Processing,Low,2025-06-29T10:00:00.000Z,On it\n";

    #[test]
    fn test_parse_tickets() {
        let out = parse(FILE);
        assert!(out.warnings.is_empty());
        assert_eq!(out.records.len(), 2);
        let t1 = &out.records[0];
        assert_eq!(t1.id, "T1");
        assert_eq!(t1.description, "Loud squeal, front left");
        assert!(t1.created_at.parsed().is_some());
        assert!(t1.incident_date.parsed().is_some());
        assert_eq!(t1.updated_at, None);
        assert_eq!(out.records[1].description, "He said \"fix it\"");
        assert_eq!(out.records[1].admin_response, "On it");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let (table, _) = TicketTable::parse(FILE);
        let once = table.to_csv().unwrap();
        assert_eq!(once, FILE);

        let (again, _) = TicketTable::parse(&once);
        assert_eq!(again.to_records(), table.to_records());
        assert_eq!(again.to_csv().unwrap(), once);
    }

    #[test]
    fn test_quoting_survives_serialize_parse_serialize() {
        let text = "id,note\nA,\"a, b\"\nB,\"a \"\"b\"\" c\"\n";
        let (table, _) = TicketTable::parse(text);
        assert_eq!(table.rows[0].values[1], "a, b");
        assert_eq!(table.rows[1].values[1], "a \"b\" c");
        let out = table.to_csv().unwrap();
        assert_eq!(out, text);
        let (reparsed, _) = TicketTable::parse(&out);
        assert_eq!(reparsed.to_csv().unwrap(), text);
    }

    #[test]
    fn test_unknown_columns_preserved() {
        let (table, _) = TicketTable::parse("id,status,depot\nT9,Pending,Pune\n");
        let records = table.to_records();
        assert_eq!(records[0].extra.get("depot").map(String::as_str), Some("Pune"));
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["depot"], "Pune");
    }

    #[test]
    fn test_overlong_row_hidden_but_written_back() {
        let text = "id,status\nT1,Pending\nT2,Pending,surprise\n";
        let (table, warnings) = TicketTable::parse(text);
        assert_eq!(warnings.len(), 1);
        assert_eq!(table.to_records().len(), 1);
        assert_eq!(table.to_csv().unwrap(), text);
    }

    #[test]
    fn test_ensure_column_backfills() {
        let (mut table, _) = TicketTable::parse("id,status\nT1,Pending\nT2,Resolved\n");
        let idx = table.ensure_column("updatedAt");
        assert_eq!(idx, 2);
        assert_eq!(table.ensure_column("updatedAt"), 2);
        assert_eq!(table.to_csv().unwrap(), "id,status,updatedAt\nT1,Pending,\nT2,Resolved,\n");
    }

    #[test]
    fn test_unterminated_quote_does_not_swallow_later_rows() {
        let text = "id,description,status\nT0,ok,Pending\nT1,\"tyre \nT2,fine,Pending\nT3,fine,Pending\n";
        let out = parse(text);
        let ids: Vec<_> = out.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["T0", "T2", "T3"]);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 3);

        let (table, _) = TicketTable::parse(text);
        assert_eq!(table.to_csv().unwrap(), text);
    }

    #[test]
    fn test_padding_inside_quotes_is_kept() {
        let text = "id,note,status\nT1,\"  note  \",Pending\nT2, plain ,Pending\n";
        let (table, _) = TicketTable::parse(text);
        let records = table.to_records();
        assert_eq!(records[0].extra.get("note").map(String::as_str), Some("  note  "));
        assert_eq!(records[1].extra.get("note").map(String::as_str), Some("plain"));

        let written = table.to_csv().unwrap();
        assert_eq!(written, "id,note,status\n\"T1\",\"  note  \",\"Pending\"\nT2,plain,Pending\n");
        let (reparsed, _) = TicketTable::parse(&written);
        assert_eq!(reparsed.to_records(), records);
    }

    #[test]
    fn test_empty_file() {
        let out = parse("");
        assert!(out.records.is_empty());
        let (table, _) = TicketTable::parse("");
        assert_eq!(table.to_csv().unwrap(), "");
    }
}
