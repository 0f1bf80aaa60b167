// crates/core/src/dialect/alcohol.rs
//! MQ-3 alcohol sensor log. No header, two fields per line:
//! `2025-07-01T13:16:08.723716+05:30,Sensor Value: 323`.

use super::{read_table, Arity, Column, ColumnKind, DialectSpec, HeaderMode, ParseOutput};
use crate::types::{AlcoholRecord, LogFamily, Timestamp, NOT_AVAILABLE};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Alcohol,
    header: HeaderMode::Headerless,
    arity: Arity::Exact,
    columns: &[
        Column::new("timestamp", ColumnKind::Timestamp),
        Column::new("sensorValue", ColumnKind::Integer),
    ],
};

const SENSOR_PREFIX: &str = "Sensor Value:";

pub fn parse(text: &str) -> ParseOutput<AlcoholRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);

    let records = table
        .fitting_rows()
        .map(|row| {
            let reading = row.values[1].replace(SENSOR_PREFIX, "");
            AlcoholRecord {
                timestamp: Timestamp::from_raw(&row.values[0]),
                sensor_value: super::parse_int(&reading),
                vehicle_number: NOT_AVAILABLE.to_string(),
            }
        })
        .collect();

    ParseOutput { records, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_sensor_lines() {
        let text = "2025-07-01T13:16:08.723716+05:30,Sensor Value: 323\n\
                    2025-07-01T13:16:09+05:30,Sensor Value: 330\n";
        let out = parse(text);
        assert!(out.warnings.is_empty());
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].sensor_value, Some(323));
        assert_eq!(out.records[1].sensor_value, Some(330));
        assert_eq!(
            out.records[1].timestamp,
            Timestamp::Parsed(Utc.with_ymd_and_hms(2025, 7, 1, 7, 46, 9).unwrap())
        );
        assert_eq!(out.records[0].vehicle_number, "N/A");
    }

    #[test]
    fn test_malformed_line_skipped() {
        let text = "2025-07-01T13:16:08+05:30,Sensor Value: 323\n\
                    garbage\n\
                    2025-07-01T13:16:10+05:30,Sensor Value: 1,extra\n\
                    2025-07-01T13:16:11+05:30,Sensor Value: 400\n";
        let out = parse(text);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.records[1].sensor_value, Some(400));
    }

    #[test]
    fn test_unreadable_value_is_none() {
        let out = parse("2025-07-01T13:16:08+05:30,Sensor Value: n/a\n");
        assert_eq!(out.records[0].sensor_value, None);
    }

    #[test]
    fn test_empty() {
        assert!(parse("").records.is_empty());
    }
}
