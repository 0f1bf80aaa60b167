// crates/core/src/dialect/feedback.rs
//! Passenger feedback log. Same layout as complaints; adds a rating pulled
//! from the message and a keyword topic.

use chrono::{DateTime, Utc};

use super::complaint::{MessageFields, MESSAGE_COLUMNS};
use super::{read_table, Arity, DialectSpec, HeaderMode, ParseOutput};
use crate::extract::extract_rating_or_default;
use crate::types::{FeedbackRecord, LogFamily};

pub const SPEC: DialectSpec = DialectSpec {
    family: LogFamily::Feedback,
    header: HeaderMode::Headerless,
    arity: Arity::Padded,
    columns: MESSAGE_COLUMNS,
};

const TOPICS: &[(&str, &[&str])] = &[
    ("Service Quality", &["service", "quality", "experience", "satisfaction"]),
    ("Driver Behavior", &["driver", "behavior", "driving", "rude", "polite"]),
    ("Vehicle Condition", &["vehicle", "car", "condition", "clean", "dirty"]),
    ("Timeliness", &["time", "late", "early", "punctual", "delay"]),
    ("Pricing", &["price", "cost", "expensive", "cheap", "fare"]),
];

/// First topic whose keywords appear in the message, "General" otherwise.
pub fn classify_topic(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    TOPICS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or("General")
}

pub fn parse(text: &str) -> ParseOutput<FeedbackRecord> {
    parse_at(text, Utc::now())
}

pub fn parse_at(text: &str, now: DateTime<Utc>) -> ParseOutput<FeedbackRecord> {
    let mut warnings = Vec::new();
    let table = read_table(&SPEC, text, &mut warnings);

    let records = table
        .fitting_rows()
        .map(|row| {
            let fields = MessageFields::from_row(row, now);
            let title = if fields.category.is_empty() {
                "Feedback".to_string()
            } else {
                fields.category.clone()
            };
            FeedbackRecord {
                rating: extract_rating_or_default(&fields.description),
                topic: classify_topic(&fields.description).to_string(),
                kind: fields.category.clone(),
                message: fields.description.clone(),
                id: fields.id,
                category: fields.category,
                description: fields.description,
                timestamp: fields.timestamp,
                status: "Received".to_string(),
                vehicle_number: fields.vehicle_number,
                title,
                date: fields.timestamp,
                admin_response: String::new(),
            }
        })
        .collect();

    ParseOutput { records, warnings }
}

/// Newest first, as the feedback page lists them.
pub fn sort_newest_first(records: &mut [FeedbackRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
