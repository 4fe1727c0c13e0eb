//! Projection of boxes onto a single axis.

use std::fmt;

use crate::bounding_box::TBox;
use crate::float8::float8_cmp;

/// One of the two dimensions of a [`TBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Value,
    Time,
}

impl Axis {
    /// Axes in the order the split sweeps them.
    pub const ALL: [Axis; 2] = [Axis::Value, Axis::Time];

    /// Lower and upper bound of `tbox` along this axis.
    #[inline]
    pub fn bounds(self, tbox: &TBox) -> (f64, f64) {
        match self {
            Axis::Value => (tbox.value_min, tbox.value_max),
            Axis::Time => (tbox.time_min, tbox.time_max),
        }
    }

    /// Width of `tbox` along this axis.
    #[inline]
    pub fn range(self, tbox: &TBox) -> f64 {
        let (lower, upper) = self.bounds(tbox);
        upper - lower
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Value => write!(f, "value"),
            Axis::Time => write!(f, "time"),
        }
    }
}

/// Projection of one entry's box onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitInterval {
    pub lower: f64,
    pub upper: f64,
}

/// The same intervals in two orders: ascending by lower bound and ascending
/// by upper bound.
#[derive(Debug)]
pub(crate) struct AxisProjection {
    pub(crate) by_lower: Vec<SplitInterval>,
    pub(crate) by_upper: Vec<SplitInterval>,
}

impl AxisProjection {
    pub(crate) fn new(entries: &[TBox], axis: Axis) -> Self {
        let mut by_lower: Vec<SplitInterval> = entries
            .iter()
            .map(|e| {
                let (lower, upper) = axis.bounds(e);
                SplitInterval { lower, upper }
            })
            .collect();
        let mut by_upper = by_lower.clone();

        by_lower.sort_by(|a, b| float8_cmp(a.lower, b.lower));
        by_upper.sort_by(|a, b| float8_cmp(a.upper, b.upper));

        AxisProjection { by_lower, by_upper }
    }

    pub(crate) fn len(&self) -> usize {
        self.by_lower.len()
    }
}
