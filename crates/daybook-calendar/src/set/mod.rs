//! Set algebra over collections of date ranges.
//!
//! `sub` and `impose` work at day granularity: every range is expanded into
//! the days it covers, the days are marked covered or uncovered, and the
//! surviving days are collapsed back into ranges. Memory and time grow with
//! the total number of days spanned, not with the number of ranges, so
//! ranges spanning many years are expensive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::range::Range;
use crate::reconstruct::build_ranges;

/// An ordered collection of ranges.
///
/// Nothing is required of a set on construction: it may hold overlapping,
/// duplicate, reversed or unsorted ranges. The results of [`RangeSet::sub`]
/// and [`RangeSet::impose`] are always sorted by start date with no two
/// ranges overlapping or adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeSet(Vec<Range>);

impl RangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// ## Summary
    /// Builds the canonical set covering exactly `days`.
    ///
    /// Days may arrive in any order and repeat.
    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = Date>) -> Self {
        let mut days: Vec<Date> = days.into_iter().collect();
        days.sort_unstable();
        days.dedup();

        Self(build_ranges(&days))
    }

    /// Returns the ranges in the set.
    #[must_use]
    pub fn list(&self) -> &[Range] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Range> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the set holds no ranges at all (compare
    /// [`RangeSet::filter_empty`], which is about single-day ranges).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.0.iter()
    }

    /// Every day of every range, in set order. Days covered twice repeat.
    #[must_use]
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.0.iter().flat_map(Range::days)
    }

    /// Total number of days spanned by the ranges, counting overlaps twice.
    #[must_use]
    pub fn day_count(&self) -> u64 {
        self.0.iter().map(Range::day_count).sum()
    }

    /// ## Summary
    /// Subtracts the union of `others` from the set.
    ///
    /// Ranges are split or shrunk as needed and dropped when fully covered.
    /// A day covered by any of `others` is removed, whatever order `others`
    /// comes in. Reversed ranges in `others` remove nothing.
    #[must_use]
    #[tracing::instrument(skip_all, fields(ranges = self.len(), others = others.len()))]
    pub fn sub(&self, others: &[Range]) -> Self {
        let mut busy = self.busy_days();
        mark(&mut busy, others, false);

        let result = collect(&busy);
        tracing::trace!(result = result.len(), "Subtracted ranges");
        result
    }

    /// [`RangeSet::sub`] taking the exclusions from another set.
    #[must_use]
    pub fn sub_set(&self, set: &Self) -> Self {
        self.sub(set.list())
    }

    /// ## Summary
    /// Unions `others` into the set, merging ranges that overlap or touch.
    ///
    /// `[10, 15]` imposed with `[13, 22]` gives `[10, 22]`; `[10, 15]` imposed
    /// with `[16, 25]` gives `[10, 25]`; `[10, 15]` imposed with `[20, 25]`
    /// keeps both. Reversed ranges in `others` add nothing.
    #[must_use]
    #[tracing::instrument(skip_all, fields(ranges = self.len(), others = others.len()))]
    pub fn impose(&self, others: &[Range]) -> Self {
        let mut busy = self.busy_days();
        mark(&mut busy, others, true);

        let result = collect(&busy);
        tracing::trace!(result = result.len(), "Imposed ranges");
        result
    }

    /// [`RangeSet::impose`] taking the additions from another set.
    #[must_use]
    pub fn impose_set(&self, set: &Self) -> Self {
        self.impose(set.list())
    }

    /// Returns the ranges passing `test`, in their original order.
    #[must_use]
    pub fn filter(&self, test: impl Fn(&Range) -> bool) -> Self {
        self.0.iter().filter(|range| test(range)).copied().collect()
    }

    /// ## Summary
    /// Drops every range whose start equals its end.
    ///
    /// Those are single-day ranges; see [`Range::is_empty`].
    #[must_use]
    pub fn filter_empty(&self) -> Self {
        self.filter(|range| !range.is_empty())
    }

    /// Moves every end date one day earlier. See [`RangeSet::shift_end`].
    pub fn trim_end(&mut self) -> &mut Self {
        self.shift_end(-1)
    }

    /// Moves every end date one day later. See [`RangeSet::shift_end`].
    pub fn extend_end(&mut self) -> &mut Self {
        self.shift_end(1)
    }

    /// ## Summary
    /// Moves every end date by `n` days; `n` may be negative.
    ///
    /// ## Side Effects
    /// Mutates the ranges of `self` in place and returns the same set, so
    /// calls chain. Nothing is re-sorted or merged; shifting can produce
    /// reversed ranges.
    pub fn shift_end(&mut self, n: i64) -> &mut Self {
        for range in &mut self.0 {
            range.end = range.end.add_days(n);
        }
        self
    }

    fn busy_days(&self) -> BTreeMap<Date, bool> {
        let mut busy = BTreeMap::new();
        mark(&mut busy, &self.0, true);
        busy
    }
}

/// Sets the flag of every day covered by `ranges`.
fn mark(busy: &mut BTreeMap<Date, bool>, ranges: &[Range], covered: bool) {
    for range in ranges {
        for day in range.days() {
            busy.insert(day, covered);
        }
    }
}

/// Days flagged covered, ascending, collapsed into ranges.
fn collect(busy: &BTreeMap<Date, bool>) -> RangeSet {
    let days: Vec<Date> = busy
        .iter()
        .filter_map(|(&day, &covered)| covered.then_some(day))
        .collect();

    RangeSet(build_ranges(&days))
}

impl From<Vec<Range>> for RangeSet {
    fn from(ranges: Vec<Range>) -> Self {
        Self(ranges)
    }
}

impl From<RangeSet> for Vec<Range> {
    fn from(set: RangeSet) -> Self {
        set.0
    }
}

impl FromIterator<Range> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RangeSet {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
