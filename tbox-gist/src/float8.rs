//! NaN-aware total order for `f64`.
//!
//! Every comparison the engine performs on box coordinates goes through
//! [`float8_cmp`]. `NaN` is equal to itself and sorts above every other value,
//! `+Infinity` included, so no comparison is ever "unordered". Apart from NaN
//! the order is the ordinary numeric one, which means `-0.0 == 0.0`.

use std::cmp::Ordering;

/// Compares two doubles under the NaN-is-largest total order.
#[inline]
pub fn float8_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            if a > b {
                Ordering::Greater
            } else if a < b {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        }
    }
}

#[inline]
pub fn float8_eq(a: f64, b: f64) -> bool {
    float8_cmp(a, b) == Ordering::Equal
}

#[inline]
pub fn float8_lt(a: f64, b: f64) -> bool {
    float8_cmp(a, b) == Ordering::Less
}

#[inline]
pub fn float8_le(a: f64, b: f64) -> bool {
    float8_cmp(a, b) != Ordering::Greater
}

#[inline]
pub fn float8_gt(a: f64, b: f64) -> bool {
    float8_cmp(a, b) == Ordering::Greater
}

#[inline]
pub fn float8_ge(a: f64, b: f64) -> bool {
    float8_cmp(a, b) != Ordering::Less
}

/// The larger of two values; `a` wins ties.
#[inline]
pub fn float8_max(a: f64, b: f64) -> f64 {
    if float8_lt(a, b) {
        b
    } else {
        a
    }
}

/// The smaller of two values; `a` wins ties.
#[inline]
pub fn float8_min(a: f64, b: f64) -> f64 {
    if float8_gt(a, b) {
        b
    } else {
        a
    }
}

/// Replaces a negative value with zero. NaN stays NaN, so it keeps losing
/// every "smaller is better" comparison.
#[inline]
pub fn non_negative(v: f64) -> f64 {
    if float8_ge(v, 0.0) {
        v
    } else {
        0.0
    }
}
