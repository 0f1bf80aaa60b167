// crates/core/src/dialect/obd.rs
//! Torque-style OBD-II track log. Headers carry units ("Speed (OBD)(km/h)",
//! "Engine Coolant Temperature(°C)") and are normalized to camelCase keys;
//! values are typed by sniffing.

use std::collections::BTreeMap;

use super::{read_table, Arity, DialectSpec, HeaderMode, ParseOutput};
use crate::timestamp::parse_timestamp;
use crate::types::{FieldValue, LogFamily, ObdRecord, NOT_AVAILABLE};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Obd,
    header: HeaderMode::FirstLineIsHeader,
    arity: Arity::Exact,
    columns: &[],
};

/// Strip unit annotations and punctuation, then camel-case the remaining words.
///
/// `"GPS Time"` → `"GPSTime"`, `"Engine Load(%)"` → `"EngineLoad"`,
/// `"Speed (OBD)(km/h)"` → `"SpeedOBDkmh"`.
pub fn normalize_header(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    for (i, word) in cleaned.split_whitespace().enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Numbers first, then time-like columns, otherwise the text as-is.
fn sniff(key: &str, raw: &str) -> FieldValue {
    if raw.is_empty() {
        return FieldValue::Text(String::new());
    }
    if let Some(n) = super::parse_int(raw) {
        return FieldValue::Integer(n);
    }
    if let Some(f) = super::parse_float(raw) {
        return FieldValue::Float(f);
    }
    let lower = key.to_lowercase();
    if lower.contains("time") || lower.contains("date") {
        if let Some(ts) = parse_timestamp(raw) {
            return FieldValue::Timestamp(ts);
        }
    }
    FieldValue::Text(raw.to_string())
}

pub fn parse(text: &str) -> ParseOutput<ObdRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);
    let keys: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();

    let records = table
        .fitting_rows()
        .map(|row| {
            let mut fields = BTreeMap::new();
            let mut vehicle = None;
            for (key, raw) in keys.iter().zip(&row.values) {
                if key == "vehicleNumber" {
                    vehicle = Some(raw.clone()).filter(|v| !v.is_empty());
                    continue;
                }
                fields.insert(key.clone(), sniff(key, raw));
            }
            ObdRecord {
                fields,
                vehicle_number: vehicle.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            }
        })
        .collect();

    ParseOutput { records, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimelineRecord;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("GPS Time"), "GPSTime");
        assert_eq!(normalize_header(" Device Time"), "DeviceTime");
        assert_eq!(normalize_header("Engine Load(%)"), "EngineLoad");
        assert_eq!(normalize_header("Engine Coolant Temperature(°C)"), "EngineCoolantTemperatureC");
        assert_eq!(normalize_header("Speed (OBD)(km/h)"), "SpeedOBDkmh");
        assert_eq!(normalize_header("Longitude"), "Longitude");
    }

    #[test]
    fn test_type_sniffing() {
        let text = "GPS Time,Device Time,Speed (OBD)(km/h),Engine RPM(rpm),DTCs\n\
                    Tue Jul 01 13:16:08 GMT+05:30 2025,01-Jul-2025 13:16:08.123,42,1850.5,No Faults\n";
        let out = parse(text);
        assert!(out.warnings.is_empty());
        let r = &out.records[0];
        assert_eq!(
            r.fields["GPSTime"],
            FieldValue::Timestamp(Utc.with_ymd_and_hms(2025, 7, 1, 7, 46, 8).unwrap())
        );
        assert!(matches!(r.fields["DeviceTime"], FieldValue::Timestamp(_)));
        assert_eq!(r.fields["SpeedOBDkmh"], FieldValue::Integer(42));
        assert_eq!(r.fields["EngineRPMrpm"], FieldValue::Float(1850.5));
        assert_eq!(r.fields["DTCs"], FieldValue::Text("No Faults".into()));
        assert_eq!(r.vehicle_number, "N/A");
        assert_eq!(
            r.display_timestamp(),
            Some(Utc.with_ymd_and_hms(2025, 7, 1, 7, 46, 8).unwrap())
        );
    }

    #[test]
    fn test_unparseable_time_stays_text() {
        let out = parse("Device Time,Speed\nsoon,1\n");
        assert_eq!(out.records[0].fields["DeviceTime"], FieldValue::Text("soon".into()));
    }

    #[test]
    fn test_header_only() {
        let out = parse("GPS Time,Speed\n");
        assert!(out.records.is_empty());
        assert!(out.warnings.is_empty());
    }
}
