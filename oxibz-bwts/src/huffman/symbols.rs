//! Symbol table shared by the encoder and decoder.

use super::{NodeKind, Node, Options, Value, EOF_SYMBOL, EXTRA_VALUES, MAX_VALUES, NEW_SYMBOL, NONE};

/// A leaf of the (conceptual) Huffman tree: a symbol and its frequency.
#[derive(Debug, Clone, Copy)]
struct Leaf {
    value: Value,
    count: u32,
}

/// Sliding window of recently coded symbols.
///
/// Once filled, storing a symbol evicts the oldest one.
#[derive(Debug)]
struct Window {
    buf: Vec<Value>,
    pos: usize,
    filled: bool,
}

impl Window {
    fn new(size: usize) -> Self {
        Self {
            buf: vec![0; size],
            pos: 0,
            filled: false,
        }
    }

    /// Store `value`, returning the symbol it evicted if the window was
    /// already full.
    fn store(&mut self, value: Value) -> Option<Value> {
        let evicted = if self.filled {
            Some(self.buf[self.pos])
        } else {
            None
        };
        self.buf[self.pos] = value;
        self.pos += 1;
        if self.pos == self.buf.len() {
            self.pos = 0;
            self.filled = true;
        }
        evicted
    }
}

/// Leaf table, value index, and the rebuilt tree.
///
/// `leaves` is sorted by count descending with the two sentinel leaves
/// pinned at the tail (their counts stay at 1); ties keep insertion
/// order. The first `leaves.len()` arena slots mirror `leaves`, so a
/// position in the table is also the arena index of that leaf.
#[derive(Debug)]
pub(crate) struct Symbols {
    leaves: Vec<Leaf>,
    /// Value slot -> position in `leaves`, or `NONE`.
    slots: [usize; MAX_VALUES],
    /// Tree arena, rebuilt after every mutation.
    nodes: Vec<Node>,
    /// Scratch for tree construction: node indices, ascending by count.
    work: Vec<usize>,
    root: usize,
    window: Option<Window>,
}

fn value_slot(value: Value) -> usize {
    match value {
        NEW_SYMBOL => 256,
        EOF_SYMBOL => 257,
        b => b as usize,
    }
}

impl Symbols {
    pub(crate) fn new(options: Options) -> Self {
        let mut leaves = Vec::with_capacity(MAX_VALUES);
        leaves.push(Leaf {
            value: NEW_SYMBOL,
            count: 1,
        });
        leaves.push(Leaf {
            value: EOF_SYMBOL,
            count: 1,
        });
        let mut slots = [NONE; MAX_VALUES];
        slots[value_slot(NEW_SYMBOL)] = 0;
        slots[value_slot(EOF_SYMBOL)] = 1;

        let mut symbols = Self {
            leaves,
            slots,
            nodes: Vec::with_capacity(2 * MAX_VALUES),
            work: Vec::with_capacity(MAX_VALUES),
            root: NONE,
            window: (options.window_size > 0).then(|| Window::new(options.window_size)),
        };
        // The decoder walks the tree before the first update, so build it
        // up front.
        symbols.rebuild_tree();
        symbols
    }

    /// Position (= arena index) of the leaf for `value`, if present.
    pub(crate) fn leaf_index(&self, value: Value) -> Option<usize> {
        match self.slots[value_slot(value)] {
            NONE => None,
            idx => Some(idx),
        }
    }

    pub(crate) fn root(&self) -> usize {
        self.root
    }

    pub(crate) fn kind(&self, idx: usize) -> NodeKind {
        self.nodes[idx].kind
    }

    /// True once any non-sentinel leaf exists.
    pub(crate) fn has_data(&self) -> bool {
        self.leaves.len() > EXTRA_VALUES
    }

    /// Huffman code of the leaf at arena index `idx`, emitted bottom-up:
    /// bit 0 of the result is the edge above the leaf, the highest bit is
    /// the edge below the root. Writing the low `bits` bits MSB-first
    /// therefore spells the path from the root down.
    pub(crate) fn code_of(&self, idx: usize) -> (u64, u8) {
        let mut code = 0u64;
        let mut bits = 0u8;
        let mut node = idx;
        let mut parent = self.nodes[node].parent;
        while parent != NONE {
            if let NodeKind::Internal { right, .. } = self.nodes[parent].kind {
                if right == node {
                    code |= 1 << bits;
                }
            }
            bits += 1;
            node = parent;
            parent = self.nodes[node].parent;
        }
        (code, bits)
    }

    /// Bump the count of the leaf for `value`, keeping the table sorted,
    /// then rebuild the tree.
    pub(crate) fn update(&mut self, value: Value) {
        let pos = self.slots[value_slot(value)];
        let count = self.leaves[pos].count;
        let data_len = self.leaves.len() - EXTRA_VALUES;
        // First position in the descending prefix with this count; the
        // run [idx, pos] all carry equal counts, so swapping with its
        // head keeps the order after the increment.
        let idx = self.leaves[..data_len].partition_point(|l| l.count > count);
        if idx != pos {
            self.swap_leaves(idx, pos);
        }
        self.leaves[idx].count += 1;
        self.update_window(value);
        self.rebuild_tree();
    }

    /// Record a freshly seen value: a new leaf with count 1, placed
    /// immediately before the sentinels.
    pub(crate) fn insert(&mut self, value: Value) {
        let at = self.leaves.len() - EXTRA_VALUES;
        self.leaves.insert(at, Leaf { value, count: 1 });
        self.reindex_from(at);
        self.update_window(value);
        self.rebuild_tree();
    }

    /// Store `value` in the window; when the window is full, the evicted
    /// symbol loses one count and disappears at zero.
    fn update_window(&mut self, value: Value) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        if let Some(evicted) = window.store(value) {
            self.decrement(evicted);
        }
    }

    /// Decrement the count of the leaf for `value`, swapping it with the
    /// tail of its equal-count run so the table stays sorted; a count of
    /// zero removes the leaf entirely.
    fn decrement(&mut self, value: Value) {
        let pos = self.slots[value_slot(value)];
        let count = self.leaves[pos].count;
        if count > 1 {
            let data_len = self.leaves.len() - EXTRA_VALUES;
            let mut last = pos;
            while last + 1 < data_len && self.leaves[last + 1].count == count {
                last += 1;
            }
            if last != pos {
                self.swap_leaves(pos, last);
            }
            self.leaves[last].count -= 1;
        } else {
            let removed = self.leaves.remove(pos);
            self.slots[value_slot(removed.value)] = NONE;
            self.reindex_from(pos);
        }
    }

    fn swap_leaves(&mut self, a: usize, b: usize) {
        self.leaves.swap(a, b);
        self.slots[value_slot(self.leaves[a].value)] = a;
        self.slots[value_slot(self.leaves[b].value)] = b;
    }

    fn reindex_from(&mut self, start: usize) {
        for i in start..self.leaves.len() {
            self.slots[value_slot(self.leaves[i].value)] = i;
        }
    }

    /// Rebuild the tree arena from the leaf table.
    ///
    /// The work list starts as the leaves in ascending count order (the
    /// reverse of the table). Each step merges the two smallest nodes and
    /// re-inserts the parent at the first position whose count is not
    /// smaller, a stable rule that makes the tree a pure function of the
    /// table ordering.
    fn rebuild_tree(&mut self) {
        let leaf_count = self.leaves.len();
        self.nodes.clear();
        for leaf in &self.leaves {
            self.nodes.push(Node {
                count: leaf.count,
                parent: NONE,
                kind: NodeKind::Leaf(leaf.value),
            });
        }

        self.work.clear();
        self.work.extend((0..leaf_count).rev());

        let mut head = 0;
        while self.work.len() - head > 1 {
            let left = self.work[head];
            let right = self.work[head + 1];
            let count = self.nodes[left].count + self.nodes[right].count;
            let parent = self.nodes.len();
            self.nodes.push(Node {
                count,
                parent: NONE,
                kind: NodeKind::Internal { left, right },
            });
            self.nodes[left].parent = parent;
            self.nodes[right].parent = parent;

            let nodes = &self.nodes;
            let idx = self.work[head + 2..].partition_point(|&i| nodes[i].count < count);
            for k in 0..idx {
                self.work[head + 1 + k] = self.work[head + 2 + k];
            }
            self.work[head + 1 + idx] = parent;
            head += 1;
        }
        self.root = self.work[head];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_for(symbols: &Symbols, value: Value) -> (u64, u8) {
        symbols.code_of(symbols.leaf_index(value).unwrap())
    }

    #[test]
    fn test_initial_tree() {
        let symbols = Symbols::new(Options::default());
        assert!(!symbols.has_data());
        // Two sentinel leaves under one root: eof on the left, the
        // escape on the right.
        assert_eq!(code_for(&symbols, EOF_SYMBOL), (0, 1));
        assert_eq!(code_for(&symbols, NEW_SYMBOL), (1, 1));
    }

    #[test]
    fn test_insert_and_update_keep_order() {
        let mut symbols = Symbols::new(Options::default());
        symbols.insert(b'a' as Value);
        symbols.update(b'a' as Value);
        symbols.update(b'a' as Value);
        symbols.insert(b'b' as Value);
        assert!(symbols.has_data());

        // 'a' (count 3) dominates; its code is a single bit.
        let (_, bits_a) = code_for(&symbols, b'a' as Value);
        let (_, bits_b) = code_for(&symbols, b'b' as Value);
        assert_eq!(bits_a, 1);
        assert!(bits_b > bits_a);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let build = || {
            let mut s = Symbols::new(Options::default());
            for &b in b"deterministic deterministic" {
                match s.leaf_index(b as Value) {
                    Some(_) => s.update(b as Value),
                    None => s.insert(b as Value),
                }
            }
            s
        };
        let a = build();
        let b = build();
        for value in [b'd' as Value, b'e' as Value, b' ' as Value, NEW_SYMBOL, EOF_SYMBOL] {
            assert_eq!(code_for(&a, value), code_for(&b, value));
        }
    }

    #[test]
    fn test_window_eviction_drops_leaf() {
        let mut symbols = Symbols::new(Options {
            window_size: 2,
        });
        symbols.insert(b'a' as Value); // window: a
        symbols.insert(b'b' as Value); // window: a b
        symbols.insert(b'c' as Value); // window: b c, evicts the only 'a'
        assert!(symbols.leaf_index(b'a' as Value).is_none());
        assert!(symbols.leaf_index(b'b' as Value).is_some());
        assert!(symbols.leaf_index(b'c' as Value).is_some());
    }

    #[test]
    fn test_window_eviction_decrements() {
        let mut symbols = Symbols::new(Options {
            window_size: 2,
        });
        symbols.insert(b'a' as Value); // a: 1, window: a
        symbols.update(b'a' as Value); // a: 2, window: a a
        symbols.update(b'a' as Value); // a: 3 then evict -> 2, window: a a
        let idx = symbols.leaf_index(b'a' as Value).unwrap();
        assert_eq!(symbols.nodes[idx].count, 2);
    }
}
