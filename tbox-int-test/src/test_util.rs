use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use tbox_gist::float8::{float8_cmp, float8_max, float8_min};
use tbox_gist::{
    BoxExtractor, GistError, GistOpClass, GistResult, NodeKind, Strategy, TBox, TBoxOpClass,
};

/// A temporal float sequence: float values observed at increasing instants.
#[derive(Debug, Clone, PartialEq)]
pub struct TFloatSeq {
    instants: Vec<(DateTime<Utc>, f64)>,
}

impl TFloatSeq {
    /// Builds a sequence, or `None` when there are no instants.
    pub fn new(mut instants: Vec<(DateTime<Utc>, f64)>) -> Option<Self> {
        if instants.is_empty() {
            return None;
        }
        instants.sort_by_key(|(t, _)| *t);
        Some(TFloatSeq { instants })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.instants[0].0
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.instants[self.instants.len() - 1].0
    }
}

impl BoxExtractor for TFloatSeq {
    fn extract_box(&self) -> TBox {
        let first = self.instants[0].1;
        let (min, max) = self
            .instants
            .iter()
            .fold((first, first), |(lo, hi), (_, v)| {
                (float8_min(lo, *v), float8_max(hi, *v))
            });
        TBox::new(
            min,
            max,
            micros(self.start()),
            micros(self.end()),
        )
    }
}

/// Time axis encoding used by the sample values: microseconds since the epoch.
pub fn micros(t: DateTime<Utc>) -> f64 {
    t.timestamp_micros() as f64
}

pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Random sequences spread over one day with values in `[-1000, 1000)`.
pub fn random_sequences(seed: u64, count: usize) -> Vec<TFloatSeq> {
    let mut rng = StdRng::seed_from_u64(seed);
    let day_start = epoch() + Duration::days(20_000);
    (0..count)
        .map(|_| {
            let start = day_start + Duration::seconds(rng.random_range(0..86_400));
            let base: f64 = rng.random_range(-1000.0..1000.0);
            let points = rng.random_range(1..8);
            let instants = (0..points)
                .map(|i| {
                    let at = start + Duration::minutes(i * rng.random_range(1..30));
                    (at, base + rng.random_range(-25.0..25.0))
                })
                .collect();
            TFloatSeq::new(instants).expect("at least one instant")
        })
        .collect()
}

/// Random boxes on a small integer grid, which produces plenty of shared
/// bounds and identical boxes.
pub fn random_grid_boxes(seed: u64, count: usize) -> Vec<TBox> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let v = rng.random_range(0..20) as f64;
            let t = rng.random_range(0..20) as f64;
            TBox::new(
                v,
                v + rng.random_range(0..4) as f64,
                t,
                t + rng.random_range(0..4) as f64,
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: TBox,
    /// Value id in a leaf, node index in an internal node
    pointer: usize,
}

#[derive(Debug)]
struct Node {
    leaf: bool,
    entries: Vec<Entry>,
}

/// Ids found by a search plus how much of the tree it had to read.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub ids: Vec<usize>,
    pub nodes_visited: usize,
    pub rechecks: usize,
}

/// A minimal in-memory GiST driven entirely by an operator class.
///
/// Insertion descends by least penalty, overflowing nodes are split with the
/// operator class' picksplit, and searches prune with the internal
/// consistency check.
pub struct MemoryGist<O> {
    opclass: O,
    nodes: Vec<Node>,
    root: usize,
    max_entries: usize,
    len: usize,
}

impl<V: BoxExtractor + ?Sized> MemoryGist<TBoxOpClass<V>> {
    pub fn with_default_opclass(max_entries: usize) -> Self {
        MemoryGist::new(TBoxOpClass::default(), max_entries)
    }
}

impl<O: GistOpClass<Key = TBox>> MemoryGist<O> {
    pub fn new(opclass: O, max_entries: usize) -> Self {
        MemoryGist {
            opclass,
            nodes: vec![Node {
                leaf: true,
                entries: Vec::new(),
            }],
            root: 0,
            max_entries: max_entries.max(2),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self.root;
        while !self.nodes[node].leaf {
            node = self.nodes[node].entries[0].pointer;
            depth += 1;
        }
        depth
    }

    /// Compresses `value` and inserts it under `id`.
    pub fn insert(&mut self, value: &O::Value, id: usize) -> GistResult<()> {
        let key = self.opclass.compress(value);
        self.insert_key(key, id)
    }

    pub fn insert_key(&mut self, key: TBox, id: usize) -> GistResult<()> {
        if let Some(sibling) = self.insert_into(self.root, key, id)? {
            let old_root = self.root;
            let old_key = self.node_key(old_root)?;
            self.nodes.push(Node {
                leaf: false,
                entries: vec![
                    Entry {
                        key: old_key,
                        pointer: old_root,
                    },
                    sibling,
                ],
            });
            self.root = self.nodes.len() - 1;
            log::debug!("root split, tree depth is now {}", self.depth());
        }
        self.len += 1;
        Ok(())
    }

    fn insert_into(&mut self, node: usize, key: TBox, id: usize) -> GistResult<Option<Entry>> {
        if self.nodes[node].leaf {
            self.nodes[node].entries.push(Entry { key, pointer: id });
        } else {
            let slot = self.choose_subtree(node, &key);
            let child = self.nodes[node].entries[slot].pointer;
            let sibling = self.insert_into(child, key, id)?;
            self.nodes[node].entries[slot].key = self.node_key(child)?;
            if let Some(sibling) = sibling {
                self.nodes[node].entries.push(sibling);
            }
        }

        if self.nodes[node].entries.len() > self.max_entries {
            return self.split_node(node).map(Some);
        }
        Ok(None)
    }

    fn choose_subtree(&self, node: usize, key: &TBox) -> usize {
        let entries = &self.nodes[node].entries;
        let mut best = 0;
        let mut best_penalty = f64::INFINITY;
        let mut best_size = f64::INFINITY;
        for (slot, entry) in entries.iter().enumerate() {
            let penalty = self.opclass.penalty(&entry.key, key);
            let size = entry.key.size();
            let better = match float8_cmp(penalty, best_penalty) {
                Ordering::Less => true,
                Ordering::Equal => float8_cmp(size, best_size) == Ordering::Less,
                Ordering::Greater => false,
            };
            if slot == 0 || better {
                best = slot;
                best_penalty = penalty;
                best_size = size;
            }
        }
        best
    }

    fn split_node(&mut self, node: usize) -> GistResult<Entry> {
        let entries = std::mem::take(&mut self.nodes[node].entries);
        let keys: Vec<TBox> = entries.iter().map(|e| e.key).collect();
        let split = self.opclass.pick_split(&keys)?;
        let pick = |indices: &[usize]| indices.iter().map(|&i| entries[i]).collect::<Vec<_>>();

        let leaf = self.nodes[node].leaf;
        self.nodes[node].entries = pick(&split.left);
        self.nodes.push(Node {
            leaf,
            entries: pick(&split.right),
        });
        log::debug!(
            "split node {} into {} + {} entries (fallback: {})",
            node,
            split.left.len(),
            split.right.len(),
            split.is_fallback()
        );
        Ok(Entry {
            key: split.right_box,
            pointer: self.nodes.len() - 1,
        })
    }

    fn node_key(&self, node: usize) -> GistResult<TBox> {
        let keys: Vec<TBox> = self.nodes[node].entries.iter().map(|e| e.key).collect();
        self.opclass.union(&keys)
    }

    /// Finds every id whose key is consistent with `query` under `strategy`.
    pub fn search<Q: BoxExtractor + ?Sized>(
        &self,
        query: Option<&Q>,
        strategy: Strategy,
    ) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        if self.is_empty() {
            return outcome;
        }
        let query = query.map(|q| q.extract_box());
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            outcome.nodes_visited += 1;
            let node = &self.nodes[node];
            let kind = if node.leaf {
                NodeKind::Leaf
            } else {
                NodeKind::Internal
            };
            for entry in &node.entries {
                let check =
                    self.opclass
                        .consistent(Some(&entry.key), query.as_ref(), strategy, kind);
                if !check.matches {
                    continue;
                }
                if node.leaf {
                    if check.recheck {
                        outcome.rechecks += 1;
                    }
                    outcome.ids.push(entry.pointer);
                } else {
                    stack.push(entry.pointer);
                }
            }
        }
        outcome.ids.sort_unstable();
        outcome
    }

    /// Verifies that every internal key is exactly the union of its child
    /// and that all leaves sit at the same depth.
    pub fn check_invariants(&self) -> GistResult<()> {
        let mut leaf_depth = None;
        let mut stack = vec![(self.root, 1usize)];
        let mut values = 0;
        while let Some((node, depth)) = stack.pop() {
            let n = &self.nodes[node];
            if node != self.root && n.entries.is_empty() {
                return Err(GistError::Internal(format!("node {} is empty", node)));
            }
            if n.entries.len() > self.max_entries {
                return Err(GistError::Internal(format!("node {} overflows", node)));
            }
            if n.leaf {
                values += n.entries.len();
                match leaf_depth {
                    None => leaf_depth = Some(depth),
                    Some(d) if d != depth => {
                        return Err(GistError::Internal(format!(
                            "leaf {} at depth {}, expected {}",
                            node, depth, d
                        )))
                    }
                    Some(_) => {}
                }
                continue;
            }
            for entry in &n.entries {
                let actual = self.node_key(entry.pointer)?;
                if !self.opclass.same(Some(&entry.key), Some(&actual)) {
                    return Err(GistError::Internal(format!(
                        "key {} of node {} does not match child union {}",
                        entry.key, entry.pointer, actual
                    )));
                }
                stack.push((entry.pointer, depth + 1));
            }
        }
        if values != self.len {
            return Err(GistError::Internal(format!(
                "found {} values, expected {}",
                values, self.len
            )));
        }
        Ok(())
    }
}

/// Ids of `keys` that pass the leaf check, found without the tree.
pub fn brute_force(keys: &[TBox], query: &TBox, strategy: Strategy) -> Vec<usize> {
    keys.iter()
        .enumerate()
        .filter(|(_, key)| tbox_gist::leaf_consistent(key, Some(query), strategy).matches)
        .map(|(id, _)| id)
        .collect()
}
