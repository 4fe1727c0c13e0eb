//! Placement of "common entries": entries whose interval fits both groups of
//! the selected split, so either choice leaves the split's overlap unchanged.

use std::cmp::Ordering;

use crate::bounding_box::TBox;
use crate::float8::{float8_cmp, float8_eq};

/// An entry that may join either group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommonEntry {
    /// Position of the entry in the input slice
    pub index: usize,
    /// Absolute difference between the penalties of joining the left and the
    /// right group
    pub delta: f64,
}

/// One side of a split under construction.
#[derive(Debug, Default)]
pub(crate) struct SplitGroup {
    pub(crate) indices: Vec<usize>,
    pub(crate) bbox: Option<TBox>,
}

impl SplitGroup {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        SplitGroup {
            indices: Vec::with_capacity(capacity),
            bbox: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn place(&mut self, index: usize, tbox: &TBox) {
        match &mut self.bbox {
            Some(bbox) => bbox.adjust(tbox),
            None => self.bbox = Some(*tbox),
        }
        self.indices.push(index);
    }

    /// Penalty of adding `tbox` to this group. An empty group has no box to
    /// enlarge, so it takes any entry for free.
    pub(crate) fn penalty(&self, tbox: &TBox) -> f64 {
        self.bbox.map_or(0.0, |bbox| bbox.penalty(tbox))
    }
}

fn penalty_delta(left: &SplitGroup, right: &SplitGroup, tbox: &TBox) -> f64 {
    let left_penalty = left.penalty(tbox);
    let right_penalty = right.penalty(tbox);
    // Two infinite penalties are equally bad, not NaN apart.
    if float8_eq(left_penalty, right_penalty) {
        0.0
    } else {
        (left_penalty - right_penalty).abs()
    }
}

/// Computes the penalty delta of every common entry against the groups built
/// so far and sorts them by ascending delta, least ambiguous first.
pub(crate) fn rank_common_entries(
    entries: &[TBox],
    common: &[usize],
    left: &SplitGroup,
    right: &SplitGroup,
) -> Vec<CommonEntry> {
    let mut ranked: Vec<CommonEntry> = common
        .iter()
        .map(|&index| CommonEntry {
            index,
            delta: penalty_delta(left, right, &entries[index]),
        })
        .collect();
    ranked.sort_by(|a, b| float8_cmp(a.delta, b.delta));
    ranked
}

/// Assigns ranked common entries to the two groups.
///
/// Each group must end up with at least `min_count` entries. As long as that
/// is still reachable without forcing, an entry goes to the group whose box
/// grows least; exact ties go to the smaller group.
pub(crate) fn distribute_common_entries(
    entries: &[TBox],
    ranked: &[CommonEntry],
    left: &mut SplitGroup,
    right: &mut SplitGroup,
    min_count: usize,
) {
    for (i, common) in ranked.iter().enumerate() {
        let tbox = &entries[common.index];
        let remaining = ranked.len() - i;

        if left.len() + remaining <= min_count {
            left.place(common.index, tbox);
        } else if right.len() + remaining <= min_count {
            right.place(common.index, tbox);
        } else {
            match float8_cmp(left.penalty(tbox), right.penalty(tbox)) {
                Ordering::Less => left.place(common.index, tbox),
                Ordering::Greater => right.place(common.index, tbox),
                Ordering::Equal => {
                    if left.len() < right.len() {
                        left.place(common.index, tbox)
                    } else {
                        right.place(common.index, tbox)
                    }
                }
            }
        }
    }
}
