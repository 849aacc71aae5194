//! Calendar-month keys (`YYYY-MM`) and their date windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result, ValidationError};

// December of the last year must still end inside four-digit years; stored
// timestamps are compared against window bounds as text.
const MAX_YEAR: i32 = 9998;

/// A calendar month, always rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// Half-open window `[start, end)` covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl MonthRange {
    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=MAX_YEAR).contains(&year) {
            return Err(invalid(&format!("{year:04}-{month:02}")));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid(&format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parses a strict `YYYY-MM` key.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let bytes = raw.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid(raw));
        }
        let all_digits = bytes[..4]
            .iter()
            .chain(&bytes[5..])
            .all(|b| b.is_ascii_digit());
        if !all_digits {
            return Err(invalid(raw));
        }
        let year: i32 = raw[..4].parse().map_err(|_| invalid(raw))?;
        let month: u32 = raw[5..].parse().map_err(|_| invalid(raw))?;
        Self::new(year, month).map_err(|_| invalid(raw))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing the current UTC instant.
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // year and month are validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The calendar window of this month, ending at the first instant of the next month.
    pub fn range(&self) -> MonthRange {
        MonthRange {
            start: self.first_day().and_time(chrono::NaiveTime::MIN),
            end: self.next().first_day().and_time(chrono::NaiveTime::MIN),
        }
    }
}

fn invalid(raw: &str) -> Error {
    Error::Validation(ValidationError::InvalidInput(format!(
        "Invalid month '{}', expected YYYY-MM",
        raw
    )))
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, s).unwrap())
    }

    #[test]
    fn parses_canonical_keys() {
        let key = MonthKey::parse("2025-06").unwrap();
        assert_eq!(key.year(), 2025);
        assert_eq!(key.month(), 6);
        assert_eq!(key.to_string(), "2025-06");
    }

    #[test]
    fn rejects_malformed_keys() {
        for raw in ["2025-13", "2025-00", "2025-6", "25-06", "2025-06-01", "2025/06", "", "abcd-ef"] {
            assert!(MonthKey::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn range_ends_at_next_month_start() {
        let range = MonthKey::parse("2025-06").unwrap().range();
        assert_eq!(range.start, at(2025, 6, 1, 0, 0, 0));
        assert_eq!(range.end, at(2025, 7, 1, 0, 0, 0));
    }

    #[test]
    fn range_handles_short_and_leap_months() {
        let feb_leap = MonthKey::parse("2024-02").unwrap().range();
        assert_eq!(feb_leap.end, at(2024, 3, 1, 0, 0, 0));
        assert!(feb_leap.contains(&at(2024, 2, 29, 12, 0, 0)));

        let feb = MonthKey::parse("2025-02").unwrap().range();
        assert!(!feb.contains(&at(2025, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let key = MonthKey::parse("2025-12").unwrap();
        assert_eq!(key.next().to_string(), "2026-01");
        assert_eq!(key.range().end, at(2026, 1, 1, 0, 0, 0));
    }

    #[test]
    fn last_supported_month_ends_in_four_digit_year() {
        let key = MonthKey::parse("9998-12").unwrap();
        assert_eq!(key.range().end, at(9999, 1, 1, 0, 0, 0));
        assert!(MonthKey::parse("9999-01").is_err());
        assert!(MonthKey::parse("9999-12").is_err());
    }

    #[test]
    fn window_is_half_open() {
        let range = MonthKey::parse("2025-06").unwrap().range();
        assert!(range.contains(&at(2025, 6, 1, 0, 0, 0)));
        assert!(range.contains(&at(2025, 6, 30, 23, 59, 59)));
        assert!(!range.contains(&at(2025, 7, 1, 0, 0, 0)));
        assert!(!range.contains(&at(2025, 5, 31, 23, 59, 59)));
    }

    #[test]
    fn serde_uses_string_form() {
        let key: MonthKey = serde_json::from_str("\"2025-06\"").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-06\"");
        assert!(serde_json::from_str::<MonthKey>("\"2025-6\"").is_err());
    }
}
