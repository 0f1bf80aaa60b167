// crates/core/src/extract.rs
//! Heuristic field extraction from free-text complaint and feedback messages.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Rating assumed when a feedback message does not mention one.
pub const DEFAULT_RATING: u8 = 5;

fn plate_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            // Standard registration: MH12AB1234
            Regex::new(r"[A-Z]{2}[0-9]{2}[A-Z]{2}[0-9]{4}").unwrap(),
            // Older and short-series plates: DL3C1234, KA5M12
            Regex::new(r"[A-Z]{2}[0-9]{1,2}[A-Z]{1,2}[0-9]{1,4}").unwrap(),
        ]
    })
}

fn rating_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)(\d+)\s*stars?").unwrap(),
            Regex::new(r"(?i)rating[:\s]*(\d+)").unwrap(),
            Regex::new(r"(\d+)/5").unwrap(),
            Regex::new(r"(?i)(\d+)\s*out\s*of\s*5").unwrap(),
        ]
    })
}

/// Find a vehicle registration number in free text.
///
/// The strict pattern is tried first so a full plate wins over a shorter
/// match of the loose one.
pub fn extract_vehicle_identifier(text: &str) -> Option<String> {
    plate_patterns()
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

/// Find a 1-5 rating in free text ("4 stars", "rating: 3", "4/5", "2 out of 5").
///
/// A pattern whose number falls outside 1..=5 does not stop the search.
pub fn extract_rating(text: &str) -> Option<u8> {
    rating_patterns().iter().find_map(|re| {
        let caps = re.captures(text)?;
        let value: u8 = caps.get(1)?.as_str().parse().ok()?;
        (1..=5).contains(&value).then_some(value)
    })
}

/// [`extract_rating`] with the dashboard's fallback applied.
pub fn extract_rating_or_default(text: &str) -> u8 {
    extract_rating(text).unwrap_or(DEFAULT_RATING)
}
