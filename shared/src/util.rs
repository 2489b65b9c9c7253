//! Time and id helpers

use chrono::{Duration, Local, NaiveDateTime, TimeZone};
use thiserror::Error;

/// `YYYY-MM-DDTHH:mm`, the format of `datetime-local` inputs and of the
/// availability query
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid date '{0}', expected YYYY-MM-DDTHH:MM")]
pub struct DateFormatError(pub String);

/// Parse a local `YYYY-MM-DDTHH:mm` string
pub fn parse_query_date(local: &str) -> Result<NaiveDateTime, DateFormatError> {
    NaiveDateTime::parse_from_str(local.trim(), QUERY_DATE_FORMAT)
        .map_err(|_| DateFormatError(local.to_string()))
}

/// Minutes to add to `local` to reach UTC (UTC minus local) in the host's
/// timezone, as in effect on that date.
///
/// Positive west of Greenwich, e.g. `300` for UTC-5. A time skipped by a
/// DST change is an error; a repeated one takes the earlier instant.
pub fn local_offset_minutes_at(local: NaiveDateTime) -> Result<i32, DateFormatError> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| -dt.offset().local_minus_utc() / 60)
        .ok_or_else(|| DateFormatError(local.format(QUERY_DATE_FORMAT).to_string()))
}

/// Convert a local `YYYY-MM-DDTHH:mm` string to UTC in the same format,
/// with the offset (UTC minus local, minutes) looked up for that date.
pub fn local_to_utc_query_with<F>(local: &str, offset_at: F) -> Result<String, DateFormatError>
where
    F: FnOnce(NaiveDateTime) -> Result<i32, DateFormatError>,
{
    let naive = parse_query_date(local)?;
    let utc = naive + Duration::minutes(i64::from(offset_at(naive)?));
    Ok(utc.format(QUERY_DATE_FORMAT).to_string())
}

/// [`local_to_utc_query_with`] using a fixed offset
pub fn local_to_utc_query(local: &str, offset_minutes: i32) -> Result<String, DateFormatError> {
    local_to_utc_query_with(local, |_| Ok(offset_minutes))
}

/// [`local_to_utc_query_with`] in the host's timezone
pub fn host_local_to_utc_query(local: &str) -> Result<String, DateFormatError> {
    local_to_utc_query_with(local, local_offset_minutes_at)
}
