//! # tbox-gist - GiST support engine for temporal boxes
//!
//! This crate provides the support functions a GiST index needs to index
//! values summarized by a `TBox`: a bounding box with a value axis and a time
//! axis. It does not store anything itself; a host tree calls into it to
//! merge keys, choose insertion paths, split overflowing nodes and prune the
//! search.
//!
//! ## Features
//!
//! - **Double Sorting Split**: Korotkov's node split with a minimum ratio
//!   guard and a positional fallback
//! - **NaN-Aware Arithmetic**: every comparison follows one total order where
//!   NaN sorts after +Infinity
//! - **Search Operators**: twelve positional and topological operators with
//!   leaf and internal consistency checks
//! - **Pluggable Values**: anything implementing `BoxExtractor` can be indexed
//! - **Fixed Layout**: keys encode to 32 little-endian bytes
//!
//! ## Quick Start
//!
//! ```rust
//! use tbox_gist::{pick_split, leaf_consistent, SplitConfig, Strategy, TBox};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let entries = [
//!     TBox::new(0.0, 10.0, 0.0, 5.0),
//!     TBox::new(20.0, 30.0, 0.0, 5.0),
//!     TBox::new(5.0, 15.0, 10.0, 20.0),
//! ];
//!
//! let split = pick_split(&entries, &SplitConfig::default())?;
//! assert_eq!(split.left.len() + split.right.len(), 3);
//!
//! let query = TBox::new(12.0, 40.0, 0.0, 100.0);
//! let check = leaf_consistent(&entries[1], Some(&query), Strategy::Overlaps);
//! assert!(check.matches && check.recheck);
//! # Ok(())
//! # }
//! ```

// Box arithmetic
pub mod bounding_box;
pub mod constants;
pub mod float8;

// Index support
pub mod consistent;
pub mod extract;
pub mod opclass;
pub mod predicates;
pub mod split;
pub mod strategy;

pub mod config;
pub mod errors;

pub use bounding_box::{same_box, union_all, TBox};
pub use config::SplitConfig;
pub use errors::{GistError, GistResult};

pub use consistent::{
    consistent, consistent_by_code, internal_consistent, leaf_consistent, Consistency, NodeKind,
};
pub use extract::{compress, BoxExtractor};
pub use opclass::{GistOpClass, TBoxOpClass};
pub use split::{pick_split, Axis, SelectedSplit, SplitKind, SplitVec};
pub use strategy::Strategy;
