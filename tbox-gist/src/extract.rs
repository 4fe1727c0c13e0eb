use std::ops::RangeInclusive;

use crate::bounding_box::TBox;

/// Anything that can be summarized by a value x time bounding box.
///
/// Indexed values implement this so the engine can compress them into keys,
/// and query arguments implement it so they can be compared against keys.
pub trait BoxExtractor {
    fn extract_box(&self) -> TBox;
}

impl BoxExtractor for TBox {
    #[inline]
    fn extract_box(&self) -> TBox {
        *self
    }
}

impl<T: BoxExtractor + ?Sized> BoxExtractor for &T {
    #[inline]
    fn extract_box(&self) -> TBox {
        (**self).extract_box()
    }
}

/// A closed value range used as a query. Its time extent is the whole
/// timeline, so value operators compare the range and time operators only
/// see an unbounded axis.
impl BoxExtractor for RangeInclusive<f64> {
    fn extract_box(&self) -> TBox {
        TBox::new(*self.start(), *self.end(), f64::NEG_INFINITY, f64::INFINITY)
    }
}

impl BoxExtractor for RangeInclusive<i64> {
    fn extract_box(&self) -> TBox {
        TBox::new(
            *self.start() as f64,
            *self.end() as f64,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }
}

/// Turns an indexed value into the key stored in the tree.
pub fn compress<V: BoxExtractor + ?Sized>(value: &V) -> TBox {
    value.extract_box()
}
