//! Constants shared by the split engine and the box codec.

/// Minimum accepted ratio of a split: the smaller group must hold more than
/// this fraction of the node's entries.
pub const LIMIT_RATIO: f64 = 0.3;

/// Number of coordinates stored per box.
pub const TBOX_FIELDS: usize = 4;

/// Size of an encoded box: four IEEE-754 doubles, no padding.
pub const TBOX_SIZE: usize = TBOX_FIELDS * std::mem::size_of::<f64>();
