//! Export timestamp parsing.
//!
//! GTM writes `exportTime` as `YYYY-MM-DD HH:MM:SS` in UTC without an offset.
//! RFC 3339 values (as produced by the API) are accepted as well.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{ModelError, ModelResult};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses an export timestamp into a UTC instant.
pub fn parse_export_time(value: &str) -> ModelResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ModelError::InvalidExportTime {
            value: value.to_string(),
        })
}
