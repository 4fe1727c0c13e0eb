use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::TBOX_SIZE;
use crate::errors::{GistError, GistResult};
use crate::float8::{float8_eq, float8_ge, float8_gt, float8_le, float8_lt, float8_max, float8_min};

/// A box spanning a value range and a time range.
///
/// `TBox` is the key stored in every node of the index. The value axis holds
/// the minimum and maximum of a numeric series, the time axis holds its
/// temporal extent (any monotonic encoding of time works, e.g. microseconds
/// since an epoch).
///
/// A `NaN` in a max field is tolerated as an "undefined" sentinel. All methods
/// compare coordinates with the float8 total order, so such a box behaves as
/// if it extended past `+Infinity`.
///
/// # Examples
///
/// ```rust
/// use tbox_gist::TBox;
///
/// let a = TBox::new(0.0, 10.0, 0.0, 5.0);
/// let b = TBox::new(20.0, 30.0, 0.0, 5.0);
///
/// let u = a.union(&b);
/// assert_eq!(u, TBox::new(0.0, 30.0, 0.0, 5.0));
/// assert_eq!(u.size(), 150.0);
/// assert_eq!(a.penalty(&b), 100.0);
/// ```
#[derive(Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub struct TBox {
    /// Minimum value
    pub value_min: f64,
    /// Maximum value
    pub value_max: f64,
    /// Start of the time extent
    pub time_min: f64,
    /// End of the time extent
    pub time_max: f64,
}

/// Equality is exact and field-wise under the float8 order: no tolerance,
/// `NaN` equals `NaN`, and `-0.0` equals `0.0`.
impl PartialEq for TBox {
    fn eq(&self, other: &Self) -> bool {
        same_box(self, other)
    }
}

impl Eq for TBox {}

impl Hash for TBox {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.value_min).hash(state);
        canonical_bits(self.value_max).hash(state);
        canonical_bits(self.time_min).hash(state);
        canonical_bits(self.time_max).hash(state);
    }
}

// Keeps Hash consistent with the float8 equality used by PartialEq.
fn canonical_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

impl std::fmt::Display for TBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TBox(value: [{}, {}], time: [{}, {}])",
            self.value_min, self.value_max, self.time_min, self.time_max
        )
    }
}

impl TBox {
    /// Creates a new box from its value range and time range.
    pub fn new(value_min: f64, value_max: f64, time_min: f64, time_max: f64) -> TBox {
        TBox {
            value_min,
            value_max,
            time_min,
            time_max,
        }
    }

    /// Width of the value range.
    pub fn width(&self) -> f64 {
        self.value_max - self.value_min
    }

    /// Length of the time range.
    pub fn duration(&self) -> f64 {
        self.time_max - self.time_min
    }

    /// Returns the minimal box covering both `self` and `other`.
    pub fn union(&self, other: &TBox) -> TBox {
        TBox {
            value_min: float8_min(self.value_min, other.value_min),
            value_max: float8_max(self.value_max, other.value_max),
            time_min: float8_min(self.time_min, other.time_min),
            time_max: float8_max(self.time_max, other.time_max),
        }
    }

    /// Enlarges `self` in place so that it also covers `addon`.
    pub fn adjust(&mut self, addon: &TBox) {
        if float8_lt(self.value_max, addon.value_max) {
            self.value_max = addon.value_max;
        }
        if float8_gt(self.value_min, addon.value_min) {
            self.value_min = addon.value_min;
        }
        if float8_lt(self.time_max, addon.time_max) {
            self.time_max = addon.time_max;
        }
        if float8_gt(self.time_min, addon.time_min) {
            self.time_min = addon.time_min;
        }
    }

    /// Area of the box for penalty calculations.
    ///
    /// The result can be `+Infinity` but never `NaN`: a box that is degenerate
    /// on either axis has size zero (even when the other axis is infinite),
    /// and a `NaN` upper value counts as infinitely large.
    pub fn size(&self) -> f64 {
        if float8_le(self.value_max, self.value_min) || float8_le(self.time_max, self.time_min) {
            return 0.0;
        }
        // The check above ruled out NaN in the min fields.
        if self.value_max.is_nan() || self.time_max.is_nan() {
            return f64::INFINITY;
        }
        self.width() * self.duration()
    }

    /// How much the area grows when `candidate` is merged into `self`.
    ///
    /// The result can be `+Infinity` but never `NaN`.
    pub fn penalty(&self, candidate: &TBox) -> f64 {
        let grown = self.union(candidate).size();
        let own = self.size();
        if grown.is_infinite() && own.is_infinite() {
            // inf - inf: the box was already unbounded, nothing more to pay.
            return 0.0;
        }
        grown - own
    }

    /// Checks if this box covers `other` on both axes.
    pub fn contains_box(&self, other: &TBox) -> bool {
        float8_le(self.value_min, other.value_min)
            && float8_ge(self.value_max, other.value_max)
            && float8_le(self.time_min, other.time_min)
            && float8_ge(self.time_max, other.time_max)
    }

    /// Encodes the box as four little-endian doubles in field order.
    pub fn to_bytes(&self) -> GistResult<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::legacy())
            .map_err(|e| GistError::Serialization(e.to_string()))
    }

    /// Decodes a box previously written by [`TBox::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> GistResult<TBox> {
        if bytes.len() != TBOX_SIZE {
            return Err(GistError::Serialization(format!(
                "expected {} bytes for a box, got {}",
                TBOX_SIZE,
                bytes.len()
            )));
        }
        let (tbox, _) = bincode::serde::decode_from_slice(bytes, bincode::config::legacy())
            .map_err(|e| GistError::Serialization(e.to_string()))?;
        Ok(tbox)
    }
}

/// Minimal box enclosing every box in `boxes`.
pub fn union_all(boxes: &[TBox]) -> GistResult<TBox> {
    let (first, rest) = boxes.split_first().ok_or(GistError::EmptyInput)?;
    let mut result = *first;
    for b in rest {
        result.adjust(b);
    }
    Ok(result)
}

/// Exact field-wise equality. No tolerance is applied: fuzzy equality would
/// let two distinct keys be treated as one and break index consistency.
pub fn same_box(a: &TBox, b: &TBox) -> bool {
    float8_eq(a.value_min, b.value_min)
        && float8_eq(a.value_max, b.value_max)
        && float8_eq(a.time_min, b.time_min)
        && float8_eq(a.time_max, b.time_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_new() {
        let b = TBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(b.value_min, 1.0);
        assert_eq!(b.value_max, 2.0);
        assert_eq!(b.time_min, 3.0);
        assert_eq!(b.time_max, 4.0);
    }

    #[test]
    fn test_union() {
        let a = TBox::new(0.0, 5.0, 0.0, 5.0);
        let b = TBox::new(3.0, 10.0, -2.0, 4.0);
        assert_eq!(a.union(&b), TBox::new(0.0, 10.0, -2.0, 5.0));
    }

    #[test]
    fn test_union_with_nan_sentinel() {
        let a = TBox::new(0.0, f64::NAN, 0.0, 5.0);
        let b = TBox::new(3.0, 10.0, 0.0, 8.0);
        let u = a.union(&b);
        assert!(u.value_max.is_nan());
        assert_eq!(u.time_max, 8.0);
        assert_eq!(b.union(&a), u);
    }

    #[test]
    fn test_adjust_matches_union() {
        let mut a = TBox::new(0.0, 5.0, 0.0, 5.0);
        let b = TBox::new(-1.0, 3.0, 2.0, 9.0);
        let expected = a.union(&b);
        a.adjust(&b);
        assert_eq!(a, expected);
    }

    #[test]
    fn test_size() {
        assert_eq!(TBox::new(0.0, 10.0, 0.0, 5.0).size(), 50.0);
        assert_eq!(TBox::new(0.0, 0.0, 0.0, 5.0).size(), 0.0);
        assert_eq!(TBox::new(5.0, 1.0, 0.0, 5.0).size(), 0.0);
    }

    #[test]
    fn test_size_zero_by_infinity_is_zero() {
        let b = TBox::new(0.0, 0.0, 0.0, f64::INFINITY);
        assert_eq!(b.size(), 0.0);
        let b = TBox::new(f64::NEG_INFINITY, f64::INFINITY, 3.0, 3.0);
        assert_eq!(b.size(), 0.0);
    }

    #[test]
    fn test_size_nan_is_infinite() {
        let b = TBox::new(0.0, f64::NAN, 0.0, 5.0);
        assert_eq!(b.size(), f64::INFINITY);
        let b = TBox::new(0.0, 1.0, 0.0, f64::NAN);
        assert_eq!(b.size(), f64::INFINITY);
    }

    #[test]
    fn test_size_nan_min_is_degenerate() {
        // NaN in a min field sorts above any max, so the axis is empty.
        let b = TBox::new(f64::NAN, 1.0, 0.0, 5.0);
        assert_eq!(b.size(), 0.0);
    }

    #[test]
    fn test_penalty() {
        let a = TBox::new(0.0, 10.0, 0.0, 5.0);
        let inside = TBox::new(2.0, 3.0, 1.0, 2.0);
        let outside = TBox::new(20.0, 30.0, 0.0, 5.0);
        assert_eq!(a.penalty(&inside), 0.0);
        assert_eq!(a.penalty(&outside), 100.0);
    }

    #[test]
    fn test_penalty_never_nan() {
        let a = TBox::new(0.0, f64::NAN, 0.0, 5.0);
        let b = TBox::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(a.penalty(&b), 0.0);
        assert_eq!(b.penalty(&a), f64::INFINITY);
    }

    #[test]
    fn test_contains_box() {
        let outer = TBox::new(0.0, 10.0, 0.0, 10.0);
        let inner = TBox::new(2.0, 8.0, 2.0, 8.0);
        let partial = TBox::new(5.0, 15.0, 5.0, 15.0);
        assert!(outer.contains_box(&inner));
        assert!(outer.contains_box(&outer));
        assert!(!outer.contains_box(&partial));
        assert!(!inner.contains_box(&outer));
    }

    #[test]
    fn test_union_all() {
        let boxes = [
            TBox::new(0.0, 10.0, 0.0, 5.0),
            TBox::new(20.0, 30.0, 0.0, 5.0),
            TBox::new(5.0, 15.0, 10.0, 20.0),
        ];
        assert_eq!(union_all(&boxes).unwrap(), TBox::new(0.0, 30.0, 0.0, 20.0));
        assert_eq!(union_all(&[]), Err(GistError::EmptyInput));
    }

    #[test]
    fn test_same_box_is_exact() {
        let a = TBox::new(0.0, 1.0, 0.0, 1.0);
        let b = TBox::new(0.0, 1.0 + f64::EPSILON, 0.0, 1.0);
        assert!(!same_box(&a, &b));
        assert!(same_box(&a, &a));
        let n = TBox::new(0.0, f64::NAN, 0.0, 1.0);
        assert!(same_box(&n, &n));
        assert!(same_box(&TBox::new(-0.0, 1.0, 0.0, 1.0), &TBox::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(TBox::new(-0.0, f64::NAN, 0.0, 1.0));
        assert!(set.contains(&TBox::new(0.0, f64::NAN, 0.0, 1.0)));
        assert!(!set.contains(&TBox::new(0.0, 2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_display() {
        let b = TBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(format!("{}", b), "TBox(value: [1, 2], time: [3, 4])");
    }

    #[test]
    fn test_bytes_layout() {
        let b = TBox::new(1.0, 2.0, 3.0, 4.0);
        let bytes = b.to_bytes().unwrap();
        assert_eq!(bytes.len(), TBOX_SIZE);
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &2.0f64.to_le_bytes());
        assert_eq!(&bytes[16..24], &3.0f64.to_le_bytes());
        assert_eq!(&bytes[24..32], &4.0f64.to_le_bytes());
    }

    #[test]
    fn test_bytes_round_trip_keeps_nan_bits() {
        let payload_nan = f64::from_bits(0x7ff8_0000_dead_beef);
        let b = TBox::new(-1.5, payload_nan, f64::NEG_INFINITY, f64::NAN);
        let decoded = TBox::from_bytes(&b.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.value_min.to_bits(), b.value_min.to_bits());
        assert_eq!(decoded.value_max.to_bits(), b.value_max.to_bits());
        assert_eq!(decoded.time_min.to_bits(), b.time_min.to_bits());
        assert_eq!(decoded.time_max.to_bits(), b.time_max.to_bits());
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        let err = TBox::from_bytes(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, GistError::Serialization(_)));
    }

    #[test]
    fn test_serde_json() {
        let b = TBox::new(1.5, 2.5, 3.5, 4.5);
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("\"value_min\":1.5"));
        let back: TBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    fn valid_box() -> impl Strategy<Value = TBox> {
        (-1e4f64..1e4, 0f64..1e3, -1e4f64..1e4, 0f64..1e3)
            .prop_map(|(v, w, t, d)| TBox::new(v, v + w, t, t + d))
    }

    proptest! {
        #[test]
        fn union_contains_both(a in valid_box(), b in valid_box()) {
            let u = a.union(&b);
            prop_assert!(u.contains_box(&a));
            prop_assert!(u.contains_box(&b));
        }

        #[test]
        fn union_is_commutative(a in valid_box(), b in valid_box()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn union_is_associative(a in valid_box(), b in valid_box(), c in valid_box()) {
            prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        }

        #[test]
        fn union_is_idempotent(a in valid_box()) {
            prop_assert_eq!(a.union(&a), a);
        }

        #[test]
        fn penalty_is_non_negative(a in valid_box(), b in valid_box()) {
            prop_assert!(a.penalty(&b) >= 0.0);
        }

        #[test]
        fn penalty_zero_for_contained(a in valid_box(), b in valid_box()) {
            let u = a.union(&b);
            prop_assert_eq!(u.penalty(&a), 0.0);
            prop_assert_eq!(u.penalty(&b), 0.0);
        }

        #[test]
        fn penalty_positive_when_not_contained(
            a in valid_box(),
            dv in 1f64..100.0,
        ) {
            // Non-degenerate original and a candidate poking out on the value axis.
            let a = TBox::new(a.value_min, a.value_min + 1.0, a.time_min, a.time_min + 1.0);
            let b = TBox::new(a.value_max, a.value_max + dv, a.time_min, a.time_max);
            prop_assert!(!a.contains_box(&b));
            prop_assert!(a.penalty(&b) > 0.0);
        }
    }
}
