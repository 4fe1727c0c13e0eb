//! Box relationship operators.
//!
//! `left`, `right`, `before` and `after` are strict: touching boxes are not
//! left of each other. The "over" operators compare one bound of each box
//! and accept equality. A box does not record whether its bounds are
//! inclusive, so index leaves test the strict operators with the forms in
//! [`inclusive`], which also accept touching boxes.
//!
//! All comparisons use the float8 order, so NaN coordinates compare as
//! greater than every number and equal to each other.

use crate::bounding_box::{same_box, TBox};
use crate::float8::{float8_ge, float8_gt, float8_le, float8_lt};

/// Both boxes share at least one point on both axes.
pub fn overlaps(a: &TBox, b: &TBox) -> bool {
    float8_le(a.value_min, b.value_max)
        && float8_le(b.value_min, a.value_max)
        && float8_le(a.time_min, b.time_max)
        && float8_le(b.time_min, a.time_max)
}

/// `a` covers `b` on both axes.
pub fn contains(a: &TBox, b: &TBox) -> bool {
    a.contains_box(b)
}

/// `a` is covered by `b` on both axes.
pub fn contained(a: &TBox, b: &TBox) -> bool {
    b.contains_box(a)
}

pub fn same(a: &TBox, b: &TBox) -> bool {
    same_box(a, b)
}

/// `a` is strictly left of `b` on the value axis.
pub fn left(a: &TBox, b: &TBox) -> bool {
    float8_lt(a.value_max, b.value_min)
}

/// `a` does not extend to the right of `b`.
pub fn overleft(a: &TBox, b: &TBox) -> bool {
    float8_le(a.value_max, b.value_max)
}

/// `a` is strictly right of `b` on the value axis.
pub fn right(a: &TBox, b: &TBox) -> bool {
    float8_gt(a.value_min, b.value_max)
}

/// `a` does not extend to the left of `b`.
pub fn overright(a: &TBox, b: &TBox) -> bool {
    float8_ge(a.value_min, b.value_min)
}

/// `a` is strictly before `b` on the time axis.
pub fn before(a: &TBox, b: &TBox) -> bool {
    float8_lt(a.time_max, b.time_min)
}

/// `a` does not extend after `b`.
pub fn overbefore(a: &TBox, b: &TBox) -> bool {
    float8_le(a.time_max, b.time_max)
}

/// `a` is strictly after `b` on the time axis.
pub fn after(a: &TBox, b: &TBox) -> bool {
    float8_gt(a.time_min, b.time_max)
}

/// `a` does not extend before `b`.
pub fn overafter(a: &TBox, b: &TBox) -> bool {
    float8_ge(a.time_min, b.time_min)
}

/// Strict positional operators relaxed to accept boxes sharing a bound.
pub mod inclusive {
    use super::*;

    pub fn left(a: &TBox, b: &TBox) -> bool {
        float8_le(a.value_max, b.value_min)
    }

    pub fn right(a: &TBox, b: &TBox) -> bool {
        float8_ge(a.value_min, b.value_max)
    }

    pub fn before(a: &TBox, b: &TBox) -> bool {
        float8_le(a.time_max, b.time_min)
    }

    pub fn after(a: &TBox, b: &TBox) -> bool {
        float8_ge(a.time_min, b.time_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(vmin: f64, vmax: f64, tmin: f64, tmax: f64) -> TBox {
        TBox::new(vmin, vmax, tmin, tmax)
    }

    #[test]
    fn test_overlaps_touching() {
        let a = b(0.0, 5.0, 0.0, 5.0);
        assert!(overlaps(&a, &b(5.0, 10.0, 5.0, 10.0)));
        assert!(!overlaps(&a, &b(5.1, 10.0, 0.0, 5.0)));
        assert!(!overlaps(&a, &b(0.0, 5.0, 6.0, 7.0)));
    }

    #[test]
    fn test_contains_and_contained() {
        let outer = b(0.0, 10.0, 0.0, 10.0);
        let inner = b(2.0, 3.0, 4.0, 5.0);
        assert!(contains(&outer, &inner));
        assert!(contained(&inner, &outer));
        assert!(!contains(&inner, &outer));
        assert!(contains(&outer, &outer));
    }

    #[test]
    fn test_strict_and_inclusive_left_right() {
        let a = b(0.0, 5.0, 0.0, 1.0);
        let touching = b(5.0, 9.0, 0.0, 1.0);
        assert!(!left(&a, &touching));
        assert!(inclusive::left(&a, &touching));
        assert!(!right(&touching, &a));
        assert!(inclusive::right(&touching, &a));
        assert!(left(&a, &b(6.0, 9.0, 0.0, 1.0)));
    }

    #[test]
    fn test_over_operators_accept_shared_bound() {
        let a = b(0.0, 5.0, 0.0, 5.0);
        let c = b(2.0, 5.0, 2.0, 5.0);
        assert!(overleft(&a, &c));
        assert!(overleft(&c, &a));
        assert!(!overleft(&b(0.0, 6.0, 0.0, 1.0), &c));
        assert!(overright(&c, &b(2.0, 8.0, 0.0, 1.0)));
        assert!(!overright(&a, &c));
        assert!(overbefore(&a, &c));
        assert!(!overbefore(&b(0.0, 1.0, 0.0, 6.0), &c));
        assert!(overafter(&c, &a));
        assert!(overafter(&c, &c));
        assert!(!overafter(&a, &c));
    }

    #[test]
    fn test_time_axis() {
        let early = b(0.0, 1.0, 0.0, 10.0);
        let late = b(0.0, 1.0, 10.0, 20.0);
        assert!(!before(&early, &late));
        assert!(inclusive::before(&early, &late));
        assert!(!after(&late, &early));
        assert!(inclusive::after(&late, &early));
        assert!(before(&early, &b(0.0, 1.0, 11.0, 12.0)));
        assert!(after(&b(0.0, 1.0, 11.0, 12.0), &early));
    }

    #[test]
    fn test_over_operators_follow_single_bound() {
        let boxes = [
            b(0.0, 5.0, 0.0, 5.0),
            b(5.0, 6.0, 5.0, 6.0),
            b(-1.0, 2.0, 3.0, f64::NAN),
            b(f64::NEG_INFINITY, f64::INFINITY, 0.0, 0.0),
        ];
        for x in &boxes {
            for y in &boxes {
                assert_eq!(overleft(x, y), float8_le(x.value_max, y.value_max));
                assert_eq!(overright(x, y), float8_ge(x.value_min, y.value_min));
                assert_eq!(overbefore(x, y), float8_le(x.time_max, y.time_max));
                assert_eq!(overafter(x, y), float8_ge(x.time_min, y.time_min));
                assert_eq!(inclusive::left(x, y), float8_le(x.value_max, y.value_min));
            }
            assert!(overleft(x, x) && overright(x, x) && overbefore(x, x) && overafter(x, x));
        }
    }

    #[test]
    fn test_nan_coordinates() {
        let unbounded = b(0.0, f64::NAN, 0.0, 1.0);
        let finite = b(0.0, 1e300, 0.0, 1.0);
        assert!(contains(&unbounded, &finite));
        assert!(!contains(&finite, &unbounded));
        assert!(same(&unbounded, &b(0.0, f64::NAN, 0.0, 1.0)));
        assert!(overleft(&finite, &unbounded));
        assert!(!overleft(&unbounded, &finite));
    }
}
