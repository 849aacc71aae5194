use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::errors::{Result, ValidationError};

/// Parses a user-supplied expense date.
///
/// Accepts RFC 3339 (converted to UTC), a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (or with a space separator), or a bare `YYYY-MM-DD` (midnight).
pub fn parse_expense_date(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ValidationError::InvalidInput(format!("Invalid date '{}'", raw)).into())
}

pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}
