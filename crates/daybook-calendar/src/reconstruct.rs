//! Rebuilds maximal contiguous ranges from individual days.

use crate::date::Date;
use crate::range::Range;

/// ## Summary
/// Collapses ascending, unique `dates` into the minimal list of maximal
/// contiguous ranges covering exactly those days.
///
/// A run is closed whenever the next date is not exactly one day after the
/// previous one, so `[.., d]` and `[d + 1, ..]` never appear side by side in
/// the output. Empty input yields an empty list; a lone date yields `[d, d]`.
#[must_use]
pub fn build_ranges(dates: &[Date]) -> Vec<Range> {
    let Some((&first, rest)) = dates.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut previous = first;

    for &date in rest {
        if date.days_since(previous) != 1 {
            ranges.push(Range::new(start, previous));
            start = date;
        }
        previous = date;
    }

    ranges.push(Range::new(start, previous));

    ranges
}
