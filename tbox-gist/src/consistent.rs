//! Consistency checks between index keys and search queries.
//!
//! A leaf key summarizes one indexed value, so the leaf check tells whether
//! that value may satisfy `value op query`. Boxes lose precision, so a leaf
//! match always asks the caller to recheck the value. An internal key covers
//! every key below it, so the internal check only answers whether some key
//! below could still match. It must never reject a subtree that holds a
//! matching leaf.

use crate::bounding_box::TBox;
use crate::errors::GistResult;
use crate::extract::BoxExtractor;
use crate::float8::{float8_ge, float8_le};
use crate::predicates::{self, inclusive};
use crate::strategy::Strategy;

type BoxPredicate = fn(&TBox, &TBox) -> bool;

/// Leaf tests, indexed by [`Strategy::ordinal`].
const LEAF_PREDICATES: [BoxPredicate; 12] = [
    inclusive::left,
    predicates::overleft,
    predicates::overlaps,
    predicates::overright,
    inclusive::right,
    predicates::same,
    predicates::contains,
    predicates::contained,
    predicates::overbefore,
    inclusive::before,
    inclusive::after,
    predicates::overafter,
];

// An internal key covers entries anywhere inside it. Each positional test
// keeps the subtree while some entry inside the key could still pass the
// leaf test, including entries that share a bound with the query.
fn may_hold_left(key: &TBox, query: &TBox) -> bool {
    float8_le(key.value_min, query.value_min)
}

fn may_hold_overleft(key: &TBox, query: &TBox) -> bool {
    float8_le(key.value_min, query.value_max)
}

fn may_hold_right(key: &TBox, query: &TBox) -> bool {
    float8_ge(key.value_max, query.value_max)
}

fn may_hold_overright(key: &TBox, query: &TBox) -> bool {
    float8_ge(key.value_max, query.value_min)
}

fn may_hold_before(key: &TBox, query: &TBox) -> bool {
    float8_le(key.time_min, query.time_min)
}

fn may_hold_overbefore(key: &TBox, query: &TBox) -> bool {
    float8_le(key.time_min, query.time_max)
}

fn may_hold_after(key: &TBox, query: &TBox) -> bool {
    float8_ge(key.time_max, query.time_max)
}

fn may_hold_overafter(key: &TBox, query: &TBox) -> bool {
    float8_ge(key.time_max, query.time_min)
}

/// Internal tests, indexed by [`Strategy::ordinal`].
const INTERNAL_PREDICATES: [BoxPredicate; 12] = [
    may_hold_left,
    may_hold_overleft,
    predicates::overlaps,
    may_hold_overright,
    may_hold_right,
    predicates::contains,
    predicates::contains,
    predicates::overlaps,
    may_hold_overbefore,
    may_hold_before,
    may_hold_after,
    may_hold_overafter,
];

/// Outcome of a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Consistency {
    pub matches: bool,
    /// The caller must re-evaluate the operator on the original value
    pub recheck: bool,
}

impl Consistency {
    const NO_MATCH: Consistency = Consistency {
        matches: false,
        recheck: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Internal,
}

/// Checks a leaf key against a query. A missing query matches nothing.
pub fn leaf_consistent(key: &TBox, query: Option<&TBox>, strategy: Strategy) -> Consistency {
    match query {
        Some(query) => Consistency {
            matches: LEAF_PREDICATES[strategy.ordinal()](key, query),
            recheck: true,
        },
        None => Consistency::NO_MATCH,
    }
}

/// Checks whether the subtree under an internal key may hold matches.
pub fn internal_consistent(key: &TBox, query: Option<&TBox>, strategy: Strategy) -> bool {
    query.is_some_and(|query| INTERNAL_PREDICATES[strategy.ordinal()](key, query))
}

/// Full consistency entry point: the query may be any value that has a
/// bounding box, and either side may be absent.
pub fn consistent<Q: BoxExtractor + ?Sized>(
    key: Option<&TBox>,
    query: Option<&Q>,
    strategy: Strategy,
    node: NodeKind,
) -> Consistency {
    let (Some(key), Some(query)) = (key, query) else {
        return Consistency::NO_MATCH;
    };
    let query = query.extract_box();
    match node {
        NodeKind::Leaf => leaf_consistent(key, Some(&query), strategy),
        NodeKind::Internal => Consistency {
            matches: internal_consistent(key, Some(&query), strategy),
            recheck: false,
        },
    }
}

/// Like [`consistent`] but takes the host's strategy number.
///
/// # Errors
///
/// [`GistError::UnrecognizedStrategy`](crate::errors::GistError::UnrecognizedStrategy)
/// when `code` is not one of the supported operators.
pub fn consistent_by_code<Q: BoxExtractor + ?Sized>(
    key: Option<&TBox>,
    query: Option<&Q>,
    code: u16,
    node: NodeKind,
) -> GistResult<Consistency> {
    let strategy = Strategy::try_from(code)?;
    Ok(consistent(key, query, strategy, node))
}
