//! Closed interval between two calendar dates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::Date;

/// A closed date range `[start, end]`, inclusive on both ends.
///
/// No `start <= end` invariant is enforced. A reversed range (end before
/// start) covers no day: it never contains a date, never intersects, and
/// contributes nothing to set algebra. Reversed ranges are kept as given
/// rather than swapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Date,
    pub end: Date,
}

impl Range {
    #[must_use]
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Returns the single-day range `[date, date]`.
    #[must_use]
    pub const fn day(date: Date) -> Self {
        Self::new(date, date)
    }

    /// Reports whether both endpoints are valid dates.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// ## Summary
    /// Returns true if `start == end`.
    ///
    /// A range is closed, so an "empty" range still covers exactly one day.
    /// This is the predicate [`crate::RangeSet::filter_empty`] drops on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Reports whether `end` lies before `start`.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    /// Reports whether `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// ## Summary
    /// Returns true if the bounds of `other` do not extend outside the
    /// bounds of `self`.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// ## Summary
    /// Returns true if the two ranges share at least one day.
    ///
    /// Touching at a single endpoint counts. A reversed range intersects
    /// nothing.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
            && !self.is_reversed()
            && !other.is_reversed()
    }

    /// ## Summary
    /// Iterates over every day covered by the range, start and end included.
    ///
    /// Yields nothing for a reversed range.
    #[must_use]
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let start = self.start;
        (0..=self.end.days_since(start)).map(move |offset| start.add_days(offset))
    }

    /// Number of days [`Range::days`] yields.
    #[must_use]
    pub fn day_count(&self) -> u64 {
        u64::try_from(self.end.days_since(self.start) + 1).unwrap_or(0)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::new(2018, 10, day)
    }

    fn r(start: u32, end: u32) -> Range {
        Range::new(d(start), d(end))
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = r(10, 15);
        assert!(range.contains(d(10)));
        assert!(range.contains(d(12)));
        assert!(range.contains(d(15)));
        assert!(!range.contains(d(9)));
        assert!(!range.contains(d(16)));
    }

    #[test]
    fn test_single_day_range() {
        let range = Range::day(d(10));
        assert!(range.is_empty());
        assert!(range.contains(d(10)));
        assert_eq!(range.day_count(), 1);
        assert_eq!(range.days().collect::<Vec<_>>(), vec![d(10)]);
    }

    #[test]
    fn test_reversed_range_covers_nothing() {
        let range = r(15, 10);
        assert!(range.is_reversed());
        assert!(!range.is_empty());
        for day in 1..=31 {
            assert!(!range.contains(d(day)));
        }
        assert_eq!(range.days().count(), 0);
        assert_eq!(range.day_count(), 0);
        assert!(!range.intersects(&r(1, 31)));
        assert!(!r(1, 31).intersects(&range));
    }

    #[test]
    fn test_encloses() {
        assert!(r(10, 20).encloses(&r(12, 18)));
        assert!(r(10, 20).encloses(&r(10, 20)));
        assert!(!r(10, 20).encloses(&r(9, 18)));
        assert!(!r(10, 20).encloses(&r(12, 21)));
        assert!(!r(12, 18).encloses(&r(10, 20)));
    }

    #[test]
    fn test_intersects() {
        assert!(r(10, 15).intersects(&r(13, 22)));
        assert!(r(13, 22).intersects(&r(10, 15)));
        assert!(r(10, 15).intersects(&r(15, 20)));
        assert!(r(10, 20).intersects(&r(12, 13)));
        assert!(!r(10, 15).intersects(&r(16, 20)));
        assert!(!r(16, 20).intersects(&r(10, 15)));
    }

    #[test]
    fn test_days_crosses_month_end() {
        let range = Range::new(Date::new(2018, 2, 27), Date::new(2018, 3, 2));
        assert_eq!(
            range.days().collect::<Vec<_>>(),
            vec![
                Date::new(2018, 2, 27),
                Date::new(2018, 2, 28),
                Date::new(2018, 3, 1),
                Date::new(2018, 3, 2),
            ]
        );
        assert_eq!(range.day_count(), 4);
    }

    #[test]
    fn test_is_valid() {
        assert!(r(1, 31).is_valid());
        assert!(!Range::new(Date::new(2018, 11, 31), d(1)).is_valid());
    }

    #[test]
    fn test_json_field_order_is_irrelevant() {
        for (data, want) in [
            (
                r#"{"start": "2018-07-15","end": "2018-07-20"}"#,
                Range::new(Date::new(2018, 7, 15), Date::new(2018, 7, 20)),
            ),
            (
                r#"{"end": "2040-11-01","start": "2025-07-15"}"#,
                Range::new(Date::new(2025, 7, 15), Date::new(2040, 11, 1)),
            ),
        ] {
            assert_eq!(serde_json::from_str::<Range>(data).unwrap(), want);
        }
    }

    #[test]
    fn test_json_output() {
        assert_eq!(
            serde_json::to_string(&r(1, 2)).unwrap(),
            r#"{"start":"2018-10-01","end":"2018-10-02"}"#
        );
        assert_eq!(r(1, 2).to_string(), "2018-10-01/2018-10-02");
    }
}
