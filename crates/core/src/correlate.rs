// crates/core/src/correlate.rs
//! Merge records from independent sensor logs into one vehicle timeline.
//!
//! The logs share no key, so the join is approximate: same vehicle
//! identifier (case-insensitive) and a display timestamp inside the window.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{
    AlcoholRecord, DrowsinessRecord, HistoryRecord, LogFamily, ObdRecord, TimelineRecord,
    VisibilityRecord,
};

/// Inclusive time window; an open bound matches everything on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// A record without a usable timestamp only matches an unbounded window.
    pub fn contains(&self, ts: Option<DateTime<Utc>>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(ts) = ts else {
            return false;
        };
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts <= e)
    }
}

/// Which records to keep: an optional vehicle and a time window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationQuery {
    pub vehicle: Option<String>,
    pub window: TimeWindow,
}

impl CorrelationQuery {
    pub fn new(vehicle: Option<String>, window: TimeWindow) -> Self {
        Self {
            vehicle: vehicle.filter(|v| !v.trim().is_empty()),
            window,
        }
    }

    pub fn is_scoped(&self) -> bool {
        self.vehicle.is_some()
    }

    pub fn matches<R: TimelineRecord + ?Sized>(&self, record: &R) -> bool {
        let vehicle_ok = self
            .vehicle
            .as_deref()
            .map_or(true, |v| record.vehicle_identifier().eq_ignore_ascii_case(v.trim()));
        vehicle_ok && self.window.contains(record.display_timestamp())
    }

    /// Keep only matching records, preserving order.
    pub fn filter<R: TimelineRecord>(&self, records: Vec<R>) -> Vec<R> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Any record that can be placed on a vehicle timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceRecord {
    History(HistoryRecord),
    Obd(ObdRecord),
    Alcohol(AlcoholRecord),
    Drowsiness(DrowsinessRecord),
    Visibility(VisibilityRecord),
}

impl SourceRecord {
    fn inner(&self) -> &dyn TimelineRecord {
        match self {
            SourceRecord::History(r) => r,
            SourceRecord::Obd(r) => r,
            SourceRecord::Alcohol(r) => r,
            SourceRecord::Drowsiness(r) => r,
            SourceRecord::Visibility(r) => r,
        }
    }
}

impl TimelineRecord for SourceRecord {
    fn family(&self) -> LogFamily {
        self.inner().family()
    }
    fn vehicle_identifier(&self) -> &str {
        self.inner().vehicle_identifier()
    }
    fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        self.inner().display_timestamp()
    }
}

macro_rules! impl_from_record {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for SourceRecord {
            fn from(record: $ty) -> Self {
                SourceRecord::$variant(record)
            }
        })*
    };
}

impl_from_record! {
    History => HistoryRecord,
    Obd => ObdRecord,
    Alcohol => AlcoholRecord,
    Drowsiness => DrowsinessRecord,
    Visibility => VisibilityRecord,
}

/// One timeline row, built per response and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelatedHistoryEntry {
    pub source: LogFamily,
    pub display_timestamp: Option<DateTime<Utc>>,
    pub record: SourceRecord,
}

/// Filter each source by `query`, tag survivors with their family, and order
/// the union by display timestamp.
///
/// Scoped queries (a vehicle is given) read oldest-first; the unscoped
/// "all history" view reads newest-first. Entries without a timestamp go
/// last either way. Sorting is stable, so ties keep source-then-row order.
pub fn correlate<I>(query: &CorrelationQuery, sources: I) -> Vec<CorrelatedHistoryEntry>
where
    I: IntoIterator<Item = Vec<SourceRecord>>,
{
    let mut entries: Vec<CorrelatedHistoryEntry> = sources
        .into_iter()
        .flatten()
        .filter(|record| query.matches(record))
        .map(|record| CorrelatedHistoryEntry {
            source: record.family(),
            display_timestamp: record.display_timestamp(),
            record,
        })
        .collect();

    let ascending = query.is_scoped();
    entries.sort_by(|a, b| match (a.display_timestamp, b.display_timestamp) {
        (Some(x), Some(y)) if ascending => x.cmp(&y),
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    entries
}

/// Wrap a parsed batch for [`correlate`].
pub fn source<R: Into<SourceRecord>>(records: Vec<R>) -> Vec<SourceRecord> {
    records.into_iter().map(Into::into).collect()
}
