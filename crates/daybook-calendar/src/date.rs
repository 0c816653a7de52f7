//! Calendar date value (year, month, day) without time-of-day or zone.
//!
//! Arithmetic goes through chrono's fixed-epoch day count, so day offsets
//! never see leap seconds or zone transitions.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DateError, DateResult};

/// Text layout of a date, in chrono's strftime syntax.
const TEXT_FORMAT: &str = "%Y-%m-%d";

/// Years the four-digit text layout can carry.
pub const TEXT_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A calendar date (year, month, day).
///
/// The triple is stored as given: `Date::new(2018, 2, 30)` is representable
/// and reports `is_valid() == false`. Arithmetic normalizes first, carrying
/// overflow forward the way a calendar would (`2018-02-30` is treated as
/// `2018-03-02`).
///
/// Ordering is lexicographic on (year, month, day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    /// Year (e.g., 2018).
    pub year: i32,
    /// Month of the year (January = 1).
    pub month: u32,
    /// Day of the month, starting at 1.
    pub day: u32,
}

impl Date {
    /// The zero date `0000-00-00`, produced by an absent persisted value.
    pub const ZERO: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// ## Summary
    /// Parses a `YYYY-MM-DD` full-date string.
    ///
    /// ## Errors
    /// Returns `DateError::InvalidFormat` if the text does not follow the
    /// layout (exactly four year digits, two month digits, two day digits),
    /// and `DateError::Parse` if it does but names no calendar day.
    pub fn parse(s: &str) -> DateResult<Self> {
        if !has_text_layout(s) {
            return Err(DateError::InvalidFormat(s.to_string()));
        }

        let date = NaiveDate::parse_from_str(s, TEXT_FORMAT)?;
        Ok(Self::from(date))
    }

    /// ## Summary
    /// Returns the date in which `time` occurs, in that time's own zone.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::from(time.date_naive())
    }

    /// Reports whether the triple names a real calendar day.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.checked_naive().is_some_and(|date| Self::from(date) == self)
    }

    /// ## Summary
    /// Normalizes the triple through the proleptic Gregorian calendar.
    ///
    /// Month overflow carries into the year and day overflow into the month,
    /// in both directions: day 0 is the last day of the previous month and
    /// month 13 is January of the following year. Returns `None` when the
    /// result falls outside chrono's supported range.
    #[must_use]
    pub fn checked_naive(self) -> Option<NaiveDate> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;

        NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_signed(TimeDelta::try_days(i64::from(self.day) - 1)?)
    }

    /// Like [`Date::checked_naive`], saturating at chrono's bounds.
    #[must_use]
    pub fn to_naive(self) -> NaiveDate {
        self.checked_naive().unwrap_or(if self.year < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
    }

    /// ## Summary
    /// Returns the instant at 00:00:00 of the date in `tz`.
    ///
    /// A midnight repeated by a transition resolves to its earliest instant.
    /// A midnight skipped by a transition is read with the offset in effect
    /// at that wall-clock reading, so the result may land on another hour.
    ///
    /// ## Panics
    ///
    /// Panics if the date normalizes outside chrono's supported range, or if
    /// a skipped midnight on chrono's first or last day shifts the instant
    /// past that range. This is a caller precondition, not a recoverable
    /// error.
    #[must_use]
    pub fn in_zone<Tz: TimeZone>(self, tz: &Tz) -> DateTime<Tz> {
        let Some(date) = self.checked_naive() else {
            panic!("date {self} is outside the supported calendar range");
        };
        let midnight = date.and_time(NaiveTime::MIN);

        match tz.from_local_datetime(&midnight) {
            LocalResult::Single(time) | LocalResult::Ambiguous(time, _) => time,
            LocalResult::None => {
                let offset = tz.offset_from_utc_datetime(&midnight).fix();
                let Some(utc) = midnight.checked_sub_offset(offset) else {
                    panic!("midnight of {self} shifted by {offset} leaves the supported range");
                };
                tz.from_utc_datetime(&utc)
            }
        }
    }

    /// ## Summary
    /// Returns the date `n` days later; `n` may be negative.
    ///
    /// The inverse of [`Date::days_since`]. Results past chrono's range
    /// saturate at its first or last day.
    #[must_use]
    pub fn add_days(self, n: i64) -> Self {
        let shifted = TimeDelta::try_days(n)
            .and_then(|delta| self.to_naive().checked_add_signed(delta))
            .unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX });

        Self::from(shifted)
    }

    /// ## Summary
    /// Returns the signed number of days from `other` to `self`, not
    /// counting the end day. `a.add_days(n).days_since(a) == n`.
    #[must_use]
    pub fn days_since(self, other: Self) -> i64 {
        i64::from(self.to_naive().num_days_from_ce()) - i64::from(other.to_naive().num_days_from_ce())
    }

    /// Reports whether `self` occurs before `other`.
    #[must_use]
    pub fn before(self, other: Self) -> bool {
        self < other
    }

    /// Reports whether `self` occurs after `other`.
    #[must_use]
    pub fn after(self, other: Self) -> bool {
        other.before(self)
    }

    #[must_use]
    pub fn equal(self, other: Self) -> bool {
        self == other
    }
}

fn has_text_layout(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl From<NaiveDateTime> for Date {
    fn from(time: NaiveDateTime) -> Self {
        Self::from(time.date())
    }
}

/// Writes `YYYY-MM-DD` with each field zero-padded.
///
/// Only years in [`TEXT_YEARS`] produce text that [`Date::parse`] reads
/// back; other years are written with a sign or a fifth digit for
/// diagnostics. [`Serialize`] refuses them.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !TEXT_YEARS.contains(&self.year) {
            return Err(serde::ser::Error::custom(format_args!(
                "year {} of {self} does not fit the YYYY-MM-DD layout",
                self.year
            )));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike, Utc};

    use super::*;

    #[test]
    fn test_parse_and_format() {
        let date = Date::parse("2018-07-05").unwrap();
        assert_eq!(date, Date::new(2018, 7, 5));
        assert_eq!(date.to_string(), "2018-07-05");
        assert_eq!("0042-01-09".parse::<Date>().unwrap(), Date::new(42, 1, 9));
    }

    #[test]
    fn test_format_zero_pads() {
        assert_eq!(Date::new(7, 3, 4).to_string(), "0007-03-04");
        assert_eq!(Date::ZERO.to_string(), "0000-00-00");
    }

    #[test]
    fn test_parse_rejects_layout() {
        for input in ["2018-7-05", "18-07-05", "2018/07/05", "2018-07-05 ", "", "20180705"] {
            assert!(
                matches!(Date::parse(input), Err(DateError::InvalidFormat(_))),
                "{input:?} should be rejected by layout"
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_day() {
        assert!(matches!(Date::parse("2018-02-30"), Err(DateError::Parse(_))));
        assert!(matches!(Date::parse("2018-13-01"), Err(DateError::Parse(_))));
        assert!(Date::parse("2016-02-29").is_ok());
    }

    #[test]
    fn test_round_trip_over_two_years() {
        let start = Date::new(2015, 12, 20);
        for n in 0..800 {
            let date = start.add_days(n);
            assert_eq!(Date::parse(&date.to_string()).unwrap(), date);
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(Date::new(2018, 4, 30).is_valid());
        assert!(Date::new(2016, 2, 29).is_valid());
        assert!(!Date::new(2018, 4, 31).is_valid());
        assert!(!Date::new(2018, 2, 29).is_valid());
        assert!(!Date::new(2018, 0, 10).is_valid());
        assert!(!Date::ZERO.is_valid());
        assert!(!Date::default().is_valid());
    }

    #[test]
    fn test_normalization_carries_overflow() {
        assert_eq!(Date::new(2018, 2, 30).add_days(0), Date::new(2018, 3, 2));
        assert_eq!(Date::new(2018, 3, 0).add_days(0), Date::new(2018, 2, 28));
        assert_eq!(Date::new(2018, 13, 1).add_days(0), Date::new(2019, 1, 1));
        assert_eq!(Date::new(2018, 0, 1).add_days(0), Date::new(2017, 12, 1));
        assert_eq!(Date::ZERO.add_days(0), Date::new(-1, 11, 30));
    }

    #[test]
    fn test_add_days_crosses_boundaries() {
        assert_eq!(Date::new(2018, 12, 31).add_days(1), Date::new(2019, 1, 1));
        assert_eq!(Date::new(2016, 2, 28).add_days(1), Date::new(2016, 2, 29));
        assert_eq!(Date::new(2017, 2, 28).add_days(1), Date::new(2017, 3, 1));
        assert_eq!(Date::new(2018, 3, 1).add_days(-1), Date::new(2018, 2, 28));
        assert_eq!(Date::new(2000, 1, 1).add_days(366), Date::new(2001, 1, 1));
    }

    #[test]
    fn test_days_since_is_inverse_of_add_days() {
        let anchors = [
            Date::new(2018, 10, 15),
            Date::new(2016, 2, 29),
            Date::new(1999, 12, 31),
            Date::new(1, 1, 1),
        ];
        for anchor in anchors {
            for n in [-1000, -366, -365, -31, -1, 0, 1, 28, 29, 365, 366, 10_000] {
                assert_eq!(anchor.add_days(n).days_since(anchor), n, "{anchor} + {n}");
            }
        }
    }

    #[test]
    fn test_days_since_sign() {
        let a = Date::new(2018, 10, 15);
        let b = Date::new(2018, 10, 20);
        assert_eq!(b.days_since(a), 5);
        assert_eq!(a.days_since(b), -5);
        assert_eq!(a.days_since(a), 0);
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(Date::new(2018, 1, 1).add_days(i64::MAX), Date::from(NaiveDate::MAX));
        assert_eq!(Date::new(2018, 1, 1).add_days(i64::MIN), Date::from(NaiveDate::MIN));
    }

    #[test]
    fn test_ordering_predicates() {
        let early = Date::new(2018, 7, 31);
        let late = Date::new(2018, 8, 1);
        assert!(early.before(late));
        assert!(late.after(early));
        assert!(!early.after(late));
        assert!(!early.before(early));
        assert!(early.equal(Date::new(2018, 7, 31)));
        assert!(Date::new(2017, 12, 31) < Date::new(2018, 1, 1));

        let mut dates = vec![late, Date::new(2017, 1, 1), early];
        dates.sort();
        assert_eq!(dates, vec![Date::new(2017, 1, 1), early, late]);
    }

    #[test]
    fn test_from_chrono_values() {
        let time = NaiveDate::from_ymd_opt(2018, 7, 15)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(Date::from(time), Date::new(2018, 7, 15));

        let zoned = time
            .and_utc()
            .with_timezone(&chrono_tz::Asia::Tokyo);
        assert_eq!(Date::from_datetime(&zoned), Date::new(2018, 7, 16));
    }

    #[test]
    fn test_in_zone_utc_midnight() {
        let time = Date::new(2018, 7, 15).in_zone(&Utc);
        assert_eq!(time.to_rfc3339(), "2018-07-15T00:00:00+00:00");
    }

    #[test]
    fn test_in_zone_named_zone() {
        let time = Date::new(2018, 1, 15).in_zone(&chrono_tz::America::New_York);
        assert_eq!(time.with_timezone(&Utc).hour(), 5);
        assert_eq!(Date::from_datetime(&time), Date::new(2018, 1, 15));
    }

    #[test]
    fn test_in_zone_skipped_midnight() {
        // Clocks jumped from 00:00 to 01:00 on this day.
        let time = Date::new(2018, 11, 4).in_zone(&chrono_tz::America::Sao_Paulo);
        assert_eq!(
            time.naive_local(),
            NaiveDate::from_ymd_opt(2018, 11, 4)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    #[should_panic(expected = "outside the supported calendar range")]
    fn test_in_zone_out_of_range_panics() {
        let _ = Date::new(i32::MAX, 1, 1).in_zone(&Utc);
    }

    #[test]
    fn test_serde_text_form() {
        let date = Date::new(2025, 7, 15);
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2025-07-15\"");
        assert_eq!(serde_json::from_str::<Date>("\"2025-07-15\"").unwrap(), date);
        assert!(serde_json::from_str::<Date>("\"2025-7-15\"").is_err());
        assert!(serde_json::from_str::<Date>("20250715").is_err());
    }

    #[test]
    fn test_text_year_bounds_round_trip() {
        for date in [Date::new(0, 1, 1), Date::new(9999, 12, 31)] {
            let json = serde_json::to_string(&date).unwrap();
            assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date);
            assert_eq!(Date::parse(&date.to_string()).unwrap(), date);
        }
    }

    #[test]
    fn test_serialize_rejects_years_outside_text_layout() {
        let before = Date::new(0, 1, 1).add_days(-1);
        let after = Date::new(9999, 12, 31).add_days(1);
        assert_eq!(before, Date::new(-1, 12, 31));
        assert_eq!(after, Date::new(10000, 1, 1));

        for date in [before, after] {
            assert!(date.is_valid());
            assert!(Date::parse(&date.to_string()).is_err());
            let err = serde_json::to_string(&date).unwrap_err();
            assert!(err.to_string().contains("YYYY-MM-DD"), "{err}");
        }
    }
}
