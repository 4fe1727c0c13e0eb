//! Candidate split search along one axis.
//!
//! Every entry interval has to end up inside a left interval `(.., left_upper)`
//! or a right interval `(right_lower, ..)`, or both. For the intervals
//! (0,1), (1,3), (2,3), (2,4):
//!
//! ```text
//! 0 1 2 3 4
//! +-+
//!   +---+
//!     +-+
//!     +---+
//! ```
//!
//! the first sweep walks `right_lower` over the distinct lower bounds and
//! finds the smallest feasible `left_upper` for each:
//! `b=1: (0,1)-(1,4)`, `b=2: (0,3)-(2,4)`. The second sweep walks
//! `left_upper` down over the distinct upper bounds and finds the greatest
//! feasible `right_lower`: `a=3: (0,3)-(2,4)`, `a=1: (0,1)-(1,4)`.
//! Together they visit every locally optimal split without enumerating the
//! partitions.

use crate::bounding_box::TBox;
use crate::float8::{float8_eq, float8_ge, float8_gt, float8_le, float8_lt, non_negative};

use super::interval::{Axis, AxisProjection};

/// The split chosen by the sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedSplit {
    /// Axis the split runs along
    pub axis: Axis,
    /// Upper bound of the left group's interval
    pub left_upper: f64,
    /// Lower bound of the right group's interval
    pub right_lower: f64,
    /// Size of the smaller group divided by the entry count, assuming the
    /// most even distribution of common entries
    pub ratio: f64,
    /// `(left_upper - right_lower) / range`; negative when the groups are
    /// separated by a gap
    pub overlap: f64,
    /// Width of the overall bounding box along `axis`
    pub range: f64,
}

/// Best split seen so far during one picksplit call.
#[derive(Debug)]
pub(crate) struct ConsiderSplitContext {
    entries_count: usize,
    bounding_box: TBox,
    min_ratio: f64,
    best: Option<SelectedSplit>,
}

impl ConsiderSplitContext {
    pub(crate) fn new(entries_count: usize, bounding_box: TBox, min_ratio: f64) -> Self {
        ConsiderSplitContext {
            entries_count,
            bounding_box,
            min_ratio,
            best: None,
        }
    }

    pub(crate) fn into_best(self) -> Option<SelectedSplit> {
        self.best
    }

    /// Runs both sweeps over one axis.
    pub(crate) fn sweep_axis(&mut self, axis: Axis, projection: &AxisProjection) {
        let n = projection.len();
        if n == 0 {
            return;
        }
        let by_lower = &projection.by_lower;
        let by_upper = &projection.by_upper;

        // Walk the lower bound of the right group upwards, tracking the
        // smallest upper bound the left group can get away with.
        let mut i1 = 0;
        let mut i2 = 0;
        let mut right_lower = by_lower[0].lower;
        let mut left_upper = by_upper[0].lower;
        loop {
            while i1 < n && float8_eq(right_lower, by_lower[i1].lower) {
                if float8_lt(left_upper, by_lower[i1].upper) {
                    left_upper = by_lower[i1].upper;
                }
                i1 += 1;
            }
            if i1 >= n {
                break;
            }
            right_lower = by_lower[i1].lower;

            // Intervals that have to go left whatever happens.
            while i2 < n && float8_le(by_upper[i2].upper, left_upper) {
                i2 += 1;
            }

            self.consider(axis, right_lower, i1, left_upper, i2);
        }

        // Walk the upper bound of the left group downwards, tracking the
        // greatest lower bound the right group can get away with. The two
        // counters hold how many entries are still below the cursor.
        let mut lower_count = n;
        let mut upper_count = n;
        let mut right_lower = by_lower[n - 1].upper;
        let mut left_upper = by_upper[n - 1].upper;
        loop {
            while upper_count > 0 && float8_eq(left_upper, by_upper[upper_count - 1].upper) {
                if float8_gt(right_lower, by_upper[upper_count - 1].lower) {
                    right_lower = by_upper[upper_count - 1].lower;
                }
                upper_count -= 1;
            }
            if upper_count == 0 {
                break;
            }
            left_upper = by_upper[upper_count - 1].upper;

            // Intervals that have to go right whatever happens.
            while lower_count > 0 && float8_ge(by_lower[lower_count - 1].lower, right_lower) {
                lower_count -= 1;
            }

            self.consider(axis, right_lower, lower_count, left_upper, upper_count);
        }
    }

    /// Replaces the current selection if the candidate is acceptable and
    /// better.
    ///
    /// `min_left_count` entries are certain to go left and up to
    /// `max_left_count` may.
    pub(crate) fn consider(
        &mut self,
        axis: Axis,
        right_lower: f64,
        min_left_count: usize,
        left_upper: f64,
        max_left_count: usize,
    ) {
        let n = self.entries_count;

        // Distribute the common entries as evenly as possible.
        let left_count = if min_left_count >= (n + 1) / 2 {
            min_left_count
        } else if max_left_count <= n / 2 {
            max_left_count
        } else {
            n / 2
        };
        let right_count = n - left_count;
        let ratio = left_count.min(right_count) as f64 / n as f64;

        if !float8_gt(ratio, self.min_ratio) {
            return;
        }

        let range = axis.range(&self.bounding_box);
        let overlap = (left_upper - right_lower) / range;

        let select = match &self.best {
            None => true,
            // Same axis: least overlap, negative values allowed, then best ratio.
            Some(best) if best.axis == axis => {
                float8_lt(overlap, best.overlap)
                    || (float8_eq(overlap, best.overlap) && float8_gt(ratio, best.ratio))
            }
            // Other axis: least non-negative overlap, then the wider axis.
            // Comparing clamped overlaps lets the range decide between two
            // gap splits, which keeps the resulting boxes closer to square.
            Some(best) => {
                let candidate = non_negative(overlap);
                let current = non_negative(best.overlap);
                float8_lt(candidate, current)
                    || (float8_gt(range, best.range) && float8_le(candidate, current))
            }
        };

        if select {
            log::trace!(
                "picksplit candidate on {} axis: left_upper={}, right_lower={}, overlap={}, ratio={}",
                axis,
                left_upper,
                right_lower,
                overlap,
                ratio
            );
            self.best = Some(SelectedSplit {
                axis,
                left_upper,
                right_lower,
                ratio,
                overlap,
                range,
            });
        }
    }
}
