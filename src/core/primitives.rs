use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

pub fn unix_millis_to_datetime(millis: i64) -> ChartResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ChartError::InvalidTimestamp(format!("{millis} ms is out of range")))
}

/// Parses RFC 3339 first, then the naive `YYYY-MM-DD HH:MM[:SS]` forms as UTC.
pub fn parse_datetime_text(text: &str) -> ChartResult<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(ChartError::InvalidTimestamp(format!("`{trimmed}`")))
}

/// Rounds `.5` towards positive infinity, so `-0.5` becomes `0.0`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snaps a coordinate to the centre of its pixel for crisp 1px strokes.
#[must_use]
pub fn pixel_center(value: f64) -> f64 {
    value.floor() + 0.5
}
