//! Helpers for converting timestamps between their wire, form and in-memory representations
use crate::error::{Error, Result};
use time::{
    OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

/// The format used for editing a timestamp in a form, e.g. `2021-05-01T14:30`
pub const FORM_DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// The offset of the local timezone, or UTC if it cannot be determined
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Midnight of the current day in the given timezone
pub fn start_of_today(offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc()
        .to_offset(offset)
        .replace_time(Time::MIDNIGHT)
}

/// Format a timestamp for a form field, expressed in the given timezone
pub fn format_form_datetime(value: OffsetDateTime, offset: UtcOffset) -> Result<String> {
    value
        .to_offset(offset)
        .format(FORM_DATE_TIME_FORMAT)
        .map_err(|e| Error::InvalidDate(e.to_string()))
}

/// Parse a form field value as a timestamp in the given timezone. Blank values are
/// treated as missing.
pub fn parse_form_datetime(value: &str, offset: UtcOffset) -> Result<Option<OffsetDateTime>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    PrimitiveDateTime::parse(value, FORM_DATE_TIME_FORMAT)
        .map(|dt| Some(dt.assume_offset(offset)))
        .map_err(|_| Error::InvalidDate(value.to_string()))
}
