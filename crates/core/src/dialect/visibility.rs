// crates/core/src/dialect/visibility.rs
//! Windshield visibility log. No header, five positional fields:
//! `2025-06-24,15:15:49,image_20250624_151549.jpg,69.28,78.33`.

use super::{read_table, Arity, Column, ColumnKind, DialectSpec, HeaderMode, ParseOutput};
use crate::types::{LogFamily, Timestamp, VisibilityRecord, NOT_AVAILABLE};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Visibility,
    header: HeaderMode::Headerless,
    arity: Arity::Exact,
    columns: &[
        Column::new("date", ColumnKind::Text),
        Column::new("time", ColumnKind::Text),
        Column::new("imageName", ColumnKind::Text),
        Column::new("metric1", ColumnKind::Float),
        Column::new("metric2", ColumnKind::Float),
    ],
};

pub fn parse(text: &str) -> ParseOutput<VisibilityRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);

    let records = table
        .fitting_rows()
        .map(|row| {
            let [date, time, image, m1, m2] = [0, 1, 2, 3, 4].map(|i| row.values[i].as_str());
            VisibilityRecord {
                date: date.to_string(),
                time: time.to_string(),
                image_name: image.to_string(),
                metric1: super::parse_float(m1),
                metric2: super::parse_float(m2),
                timestamp: Timestamp::from_raw(&format!("{date}T{time}")),
                vehicle_number: NOT_AVAILABLE.to_string(),
            }
        })
        .collect();

    ParseOutput { records, warnings }
}
