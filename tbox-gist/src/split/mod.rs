//! Double sorting node split.
//!
//! The split looks at each axis in turn. Entries are projected onto the axis
//! as intervals, and the ways of dividing the intervals into a left and a
//! right group are swept (see [`selector`]) while minimizing the overlap of
//! the groups. The best candidate over both axes wins.
//!
//! The winning split sorts every entry into one of three buckets:
//!
//! 1. entries that only fit the left group,
//! 2. entries that only fit the right group,
//! 3. common entries that fit both without changing the overlap along the
//!    selected axis. These are distributed by penalty (see [`common`]).
//!
//! When no candidate keeps the smaller group above the configured ratio the
//! node is simply cut in half by position.
//!
//! Reference: A. Korotkov, "A new double sorting-based node splitting
//! algorithm for R-tree", SYRCoSE 2011.

pub mod common;
mod fallback;
pub mod interval;
pub mod selector;

use crate::bounding_box::{union_all, TBox};
use crate::config::SplitConfig;
use crate::errors::{GistError, GistResult};
use crate::float8::{float8_ge, float8_gt, float8_le};

pub use common::CommonEntry;
pub use interval::{Axis, SplitInterval};
pub use selector::SelectedSplit;

use common::{distribute_common_entries, rank_common_entries, SplitGroup};
use fallback::fallback_split;
use interval::AxisProjection;
use selector::ConsiderSplitContext;

/// How a split was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitKind {
    /// Double sorting split along the recorded axis and thresholds.
    DoubleSorting(SelectedSplit),
    /// No acceptable split existed; entries were bisected by position.
    Fallback,
}

/// Result of [`pick_split`]: a partition of the entry positions into two
/// groups and the bounding box of each group.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitVec {
    pub left: Vec<usize>,
    pub right: Vec<usize>,
    pub left_box: TBox,
    pub right_box: TBox,
    pub kind: SplitKind,
}

impl SplitVec {
    pub fn is_fallback(&self) -> bool {
        matches!(self.kind, SplitKind::Fallback)
    }

    /// Fraction of the entries held by the smaller group.
    pub fn ratio(&self) -> f64 {
        let total = self.left.len() + self.right.len();
        if total == 0 {
            return 0.0;
        }
        self.left.len().min(self.right.len()) as f64 / total as f64
    }
}

/// Where the selected split sends one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Left,
    Right,
    Common,
}

fn classify(lower: f64, upper: f64, split: &SelectedSplit) -> Option<Placement> {
    let fits_left = float8_le(upper, split.left_upper);
    let fits_right = float8_ge(lower, split.right_lower);
    match (fits_left, fits_right) {
        (true, true) => Some(Placement::Common),
        (true, false) => Some(Placement::Left),
        (false, true) => Some(Placement::Right),
        (false, false) => None,
    }
}

/// Smallest group size whose share of `n` entries is strictly above `ratio`.
pub(crate) fn min_group_size(n: usize, ratio: f64) -> usize {
    let mut m = (ratio * n as f64).floor().max(0.0) as usize;
    while m < n && !float8_gt(m as f64 / n as f64, ratio) {
        m += 1;
    }
    m
}

/// Splits an overflowing node into two groups.
///
/// `entries` holds the key of every entry of the node; the groups in the
/// result refer to entries by their position in this slice. Every position
/// lands in exactly one group and the union of the two group boxes equals the
/// union of all entries.
///
/// # Errors
///
/// * [`GistError::InvalidConfig`] when the ratio in `config` is outside
///   `(0, 0.5)`, which can happen for a deserialized config.
/// * [`GistError::EmptyInput`] for an empty slice and
///   [`GistError::TooFewEntries`] for a single entry.
/// * [`GistError::Internal`] if an entry fits neither side of the selected
///   split, which means the sweep is broken.
pub fn pick_split(entries: &[TBox], config: &SplitConfig) -> GistResult<SplitVec> {
    if let Err(e) = config.validate() {
        log::error!("refusing to split with {:?}: {}", config, e);
        return Err(e);
    }
    let n = entries.len();
    if n < 2 {
        return Err(if n == 0 {
            GistError::EmptyInput
        } else {
            GistError::TooFewEntries(n)
        });
    }

    let bounding_box = union_all(entries)?;
    let mut context = ConsiderSplitContext::new(n, bounding_box, config.min_split_ratio());
    for axis in Axis::ALL {
        let projection = AxisProjection::new(entries, axis);
        context.sweep_axis(axis, &projection);
    }

    let Some(selected) = context.into_best() else {
        log::debug!(
            "no split of {} entries reaches ratio {}, bisecting by position",
            n,
            config.min_split_ratio()
        );
        return Ok(fallback_split(entries));
    };

    // The sweep only counted entries; now decide where each one goes.
    let mut left = SplitGroup::with_capacity(n);
    let mut right = SplitGroup::with_capacity(n);
    let mut common = Vec::new();

    for (index, tbox) in entries.iter().enumerate() {
        let (lower, upper) = selected.axis.bounds(tbox);
        match classify(lower, upper, &selected) {
            Some(Placement::Left) => left.place(index, tbox),
            Some(Placement::Right) => right.place(index, tbox),
            Some(Placement::Common) => common.push(index),
            None => {
                log::error!(
                    "entry {} ({}) fits neither side of the {} axis split at ({}, {})",
                    index,
                    tbox,
                    selected.axis,
                    selected.left_upper,
                    selected.right_lower
                );
                return Err(GistError::Internal(format!(
                    "entry {} fits neither group of the selected split",
                    index
                )));
            }
        }
    }

    if !common.is_empty() {
        let min_count = min_group_size(n, config.min_split_ratio());
        let ranked = rank_common_entries(entries, &common, &left, &right);
        distribute_common_entries(entries, &ranked, &mut left, &mut right, min_count);
    }

    let (Some(left_box), Some(right_box)) = (left.bbox, right.bbox) else {
        log::error!(
            "split of {} entries left a group empty ({} left, {} right)",
            n,
            left.len(),
            right.len()
        );
        return Err(GistError::Internal("split produced an empty group".into()));
    };

    log::debug!(
        "split {} entries on {} axis: {} left, {} right, overlap {}",
        n,
        selected.axis,
        left.len(),
        right.len(),
        selected.overlap
    );

    Ok(SplitVec {
        left: left.indices,
        right: right.indices,
        left_box,
        right_box,
        kind: SplitKind::DoubleSorting(selected),
    })
}
