//! Calendar month identifier

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};

/// A calendar month (year + month, no day)
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period; month is 1-12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriodFormat(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Strict `YYYY-MM` parser
    ///
    /// Exactly four digits, a dash, two digits. No surrounding whitespace,
    /// no other separators, month within 01-12.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidPeriodFormat(token.to_string());

        let bytes = token.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let digits_ok = bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit);
        if !digits_ok {
            return Err(invalid());
        }

        let year: i32 = token[..4].parse().map_err(|_| invalid())?;
        let month: u32 = token[5..].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Current month in UTC
    pub fn current() -> Self {
        Self::from_date(chrono::Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The period `months` months after this one (negative goes back)
    pub fn add_months(&self, months: i32) -> Self {
        let index = self.ordinal() + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Signed number of months from `self` to `other`
    pub fn months_until(&self, other: Period) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// Whether the date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    // Months since year 0, month index zero-based
    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Period::parse(s)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Period::parse(&token).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse() {
        let p = Period::parse("2025-05").unwrap();
        assert_eq!((p.year(), p.month()), (2025, 5));
        assert_eq!(p.to_string(), "2025-05");

        for bad in ["2025/05", "2025-5", "25-05", "2025-13", "2025-00", " 2025-05", "2025-05-01", "abcd-ef", ""] {
            assert_eq!(
                Period::parse(bad),
                Err(EngineError::InvalidPeriodFormat(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_add_months_rolls_year() {
        let nov = Period::new(2024, 11).unwrap();
        assert_eq!(nov.add_months(1), Period::new(2024, 12).unwrap());
        assert_eq!(nov.add_months(2), Period::new(2025, 1).unwrap());
        assert_eq!(nov.add_months(14), Period::new(2026, 1).unwrap());
        assert_eq!(nov.add_months(-11), Period::new(2023, 12).unwrap());
        assert_eq!(nov.add_months(0), nov);
    }

    #[test]
    fn test_ordering_and_difference() {
        let a = Period::parse("2024-12").unwrap();
        let b = Period::parse("2025-01").unwrap();
        assert!(a < b);
        assert_eq!(a.months_until(b), 1);
        assert_eq!(b.months_until(a), -1);
        assert_eq!(a.months_until(a.add_months(30)), 30);
    }

    #[test]
    fn test_contains() {
        let may = Period::parse("2025-05").unwrap();
        assert!(may.contains(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
        assert!(may.contains(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()));
        assert!(!may.contains(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(!may.contains(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()));
    }

    #[test]
    fn test_serde_uses_strict_token() {
        let p: Period = serde_json::from_str("\"2025-04\"").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2025-04\"");
        assert!(serde_json::from_str::<Period>("\"2025/04\"").is_err());
    }
}
