use std::marker::PhantomData;

use crate::bounding_box::{same_box, union_all, TBox};
use crate::config::SplitConfig;
use crate::consistent::{consistent, Consistency, NodeKind};
use crate::errors::GistResult;
use crate::extract::{compress, BoxExtractor};
use crate::split::{pick_split, SplitVec};
use crate::strategy::Strategy;

/// The support functions a GiST host calls on an operator class.
///
/// A host tree stores `Key`s in every node and indexes `Value`s at the
/// leaves; it never looks inside a key itself.
pub trait GistOpClass: Send + Sync {
    type Key;
    type Value: ?Sized;

    /// Smallest key covering all `keys`.
    fn union(&self, keys: &[Self::Key]) -> GistResult<Self::Key>;

    /// Cost of inserting `new` under `original`.
    fn penalty(&self, original: &Self::Key, new: &Self::Key) -> f64;

    /// Splits the keys of an overflowing node into two groups.
    fn pick_split(&self, keys: &[Self::Key]) -> GistResult<SplitVec>;

    /// Checks `key` against any query that reduces to a box, such as a key,
    /// an indexed value or a value range.
    fn consistent<Q: BoxExtractor + ?Sized>(
        &self,
        key: Option<&Self::Key>,
        query: Option<&Q>,
        strategy: Strategy,
        node: NodeKind,
    ) -> Consistency;

    fn same(&self, a: Option<&Self::Key>, b: Option<&Self::Key>) -> bool;

    /// Builds the leaf key for an indexed value.
    fn compress(&self, value: &Self::Value) -> Self::Key;
}

/// Operator class for any value type with a value x time bounding box.
#[derive(Debug, Clone, Copy)]
pub struct TBoxOpClass<V: ?Sized> {
    config: SplitConfig,
    _value: PhantomData<fn(&V)>,
}

impl<V: ?Sized> TBoxOpClass<V> {
    pub fn new(config: SplitConfig) -> Self {
        TBoxOpClass {
            config,
            _value: PhantomData,
        }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }
}

impl<V: ?Sized> Default for TBoxOpClass<V> {
    fn default() -> Self {
        TBoxOpClass::new(SplitConfig::default())
    }
}

impl<V: BoxExtractor + ?Sized> GistOpClass for TBoxOpClass<V> {
    type Key = TBox;
    type Value = V;

    fn union(&self, keys: &[TBox]) -> GistResult<TBox> {
        union_all(keys)
    }

    fn penalty(&self, original: &TBox, new: &TBox) -> f64 {
        original.penalty(new)
    }

    fn pick_split(&self, keys: &[TBox]) -> GistResult<SplitVec> {
        pick_split(keys, &self.config)
    }

    fn consistent<Q: BoxExtractor + ?Sized>(
        &self,
        key: Option<&TBox>,
        query: Option<&Q>,
        strategy: Strategy,
        node: NodeKind,
    ) -> Consistency {
        consistent(key, query, strategy, node)
    }

    fn same(&self, a: Option<&TBox>, b: Option<&TBox>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => same_box(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn compress(&self, value: &V) -> TBox {
        compress(value)
    }
}
