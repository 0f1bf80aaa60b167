// crates/server/src/routes/filter.rs
//! `vehicleNumber` / `startTime` / `endTime` query filter shared by the log endpoints.

use chrono::{DateTime, Utc};
use drishti_core::{parse_timestamp, CorrelationQuery, TimeWindow};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    pub vehicle_number: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl RecordQuery {
    /// Empty parameters count as absent; an unreadable time is a 400.
    pub fn to_correlation(&self) -> ApiResult<CorrelationQuery> {
        let window = TimeWindow {
            start: parse_bound("startTime", self.start_time.as_deref())?,
            end: parse_bound("endTime", self.end_time.as_deref())?,
        };
        Ok(CorrelationQuery::new(self.vehicle_number.clone(), window))
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid {name}: {value}"))),
    }
}
