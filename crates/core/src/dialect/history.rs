// crates/core/src/dialect/history.rs
//! Master alert log written by the on-vehicle supervisor. Headered, columns
//! vary by firmware; only `datetime` is typed.

use std::collections::BTreeMap;

use super::{read_table, Arity, Column, ColumnKind, DialectSpec, HeaderMode, ParseOutput};
use crate::timestamp::parse_timestamp;
use crate::types::{FieldValue, HistoryRecord, LogFamily, NOT_AVAILABLE};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::History,
    header: HeaderMode::FirstLineIsHeader,
    arity: Arity::Exact,
    columns: &[Column::new("datetime", ColumnKind::Timestamp)],
};

const VEHICLE_COLUMNS: &[&str] = &["vehicleNumber", "vehicle_number"];

pub fn parse(text: &str) -> ParseOutput<HistoryRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);

    let records = table
        .fitting_rows()
        .map(|row| {
            let mut fields = BTreeMap::new();
            let mut vehicle = None;
            for (header, raw) in table.headers.iter().zip(&row.values) {
                if VEHICLE_COLUMNS.contains(&header.as_str()) {
                    vehicle = Some(raw.clone()).filter(|v| !v.is_empty());
                    continue;
                }
                let value = match SPEC.kind_of(header) {
                    ColumnKind::Timestamp => parse_timestamp(raw)
                        .map(FieldValue::Timestamp)
                        .unwrap_or_else(|| FieldValue::Text(raw.clone())),
                    _ => FieldValue::Text(raw.clone()),
                };
                fields.insert(header.clone(), value);
            }
            HistoryRecord {
                fields,
                vehicle_number: vehicle.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            }
        })
        .collect();

    ParseOutput { records, warnings }
}
