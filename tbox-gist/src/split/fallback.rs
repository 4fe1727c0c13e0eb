use crate::bounding_box::TBox;

use super::common::SplitGroup;
use super::{SplitKind, SplitVec};

/// Trivial split: the first half of the entries, by position, goes left and
/// the rest goes right.
///
/// Callers guarantee at least two entries, so both halves are non-empty.
pub(crate) fn fallback_split(entries: &[TBox]) -> SplitVec {
    let half = entries.len() / 2;
    let mut left = SplitGroup::with_capacity(half);
    let mut right = SplitGroup::with_capacity(entries.len() - half);

    for (index, tbox) in entries.iter().enumerate() {
        if index < half {
            left.place(index, tbox);
        } else {
            right.place(index, tbox);
        }
    }

    SplitVec {
        left: left.indices,
        right: right.indices,
        left_box: left.bbox.unwrap_or_default(),
        right_box: right.bbox.unwrap_or_default(),
        kind: SplitKind::Fallback,
    }
}
