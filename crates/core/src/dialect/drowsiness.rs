// crates/core/src/dialect/drowsiness.rs
//! Eye-aspect-ratio drowsiness detector log, headered:
//! `image_name,timestamp,left_ear,right_ear,closed_ratio,state,alert`.

use std::collections::BTreeMap;

use super::{read_table, Arity, Column, ColumnKind, DialectSpec, HeaderMode, ParseOutput};
use crate::types::{DrowsinessRecord, LogFamily, Timestamp, NOT_AVAILABLE};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Drowsiness,
    header: HeaderMode::FirstLineIsHeader,
    arity: Arity::Exact,
    columns: &[
        Column::new("image_name", ColumnKind::Text),
        Column::new("timestamp", ColumnKind::Timestamp),
        Column::new("left_ear", ColumnKind::Float),
        Column::new("right_ear", ColumnKind::Float),
        Column::new("closed_ratio", ColumnKind::Float),
        Column::new("state", ColumnKind::Text),
        Column::new("alert", ColumnKind::Text),
    ],
};

pub fn parse(text: &str) -> ParseOutput<DrowsinessRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);

    let records = table
        .fitting_rows()
        .map(|row| {
            let vehicle = table.get(row, "vehicleNumber");
            let extra: BTreeMap<String, String> = table
                .headers
                .iter()
                .zip(&row.values)
                .filter(|(h, _)| {
                    h.as_str() != "vehicleNumber" && !SPEC.columns.iter().any(|c| c.name == h.as_str())
                })
                .map(|(h, v)| (h.clone(), v.clone()))
                .collect();
            DrowsinessRecord {
                image_name: table.get(row, "image_name").to_string(),
                timestamp: Timestamp::from_raw(table.get(row, "timestamp")),
                left_ear: super::parse_float(table.get(row, "left_ear")),
                right_ear: super::parse_float(table.get(row, "right_ear")),
                closed_ratio: super::parse_float(table.get(row, "closed_ratio")),
                state: table.get(row, "state").to_string(),
                alert: table.get(row, "alert").to_string(),
                vehicle_number: if vehicle.is_empty() {
                    NOT_AVAILABLE.to_string()
                } else {
                    vehicle.to_string()
                },
                extra,
            }
        })
        .collect();

    ParseOutput { records, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "image_name,timestamp,left_ear,right_ear,closed_ratio,state,alert\n";

    #[test]
    fn test_parse_rows() {
        let text = format!(
            "{HEADER}frame_001.jpg,2025-06-24T15:15:49,0.31,0.29,0.12,awake,no\n\
             frame_002.jpg,2025-06-24T15:15:50,0.11,0.09,0.81,drowsy,yes\n"
        );
        let out = parse(&text);
        assert!(out.warnings.is_empty());
        assert_eq!(out.records.len(), 2);
        let r = &out.records[1];
        assert_eq!(r.image_name, "frame_002.jpg");
        assert_eq!(r.left_ear, Some(0.11));
        assert_eq!(r.closed_ratio, Some(0.81));
        assert_eq!(r.state, "drowsy");
        assert_eq!(r.alert, "yes");
        assert_eq!(r.vehicle_number, "N/A");
        assert!(r.timestamp.parsed().is_some());
    }

    #[test]
    fn test_column_order_follows_header() {
        let text = "alert,state,closed_ratio,right_ear,left_ear,timestamp,image_name\n\
                    no,awake,0.1,0.2,0.3,2025-06-24T15:15:49,f.jpg\n";
        let out = parse(text);
        assert_eq!(out.records[0].left_ear, Some(0.3));
        assert_eq!(out.records[0].image_name, "f.jpg");
    }

    #[test]
    fn test_short_row_skipped() {
        let text = format!("{HEADER}f.jpg,2025-06-24T15:15:49,0.3\n");
        let out = parse(&text);
        assert!(out.records.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_columns_pass_through() {
        let text = "image_name,timestamp,left_ear,right_ear,closed_ratio,state,alert,vehicleNumber,camera\n\
                    f.jpg,2025-06-24T15:15:49,0.3,0.2,0.1,awake,no,MH12AB1234,cab-left\n";
        let out = parse(text);
        let r = &out.records[0];
        assert_eq!(r.vehicle_number, "MH12AB1234");
        assert_eq!(r.extra.len(), 1);
        assert_eq!(r.extra.get("camera").map(String::as_str), Some("cab-left"));

        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["camera"], "cab-left");
        assert_eq!(json["left_ear"], 0.3);
    }

    #[test]
    fn test_header_only_and_empty() {
        assert!(parse(HEADER).records.is_empty());
        assert!(parse("").records.is_empty());
    }
}
