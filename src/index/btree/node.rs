//! B-tree node and its structural primitives.
//!
//! A [`Node`] owns its keys and (for internal nodes) its children outright.
//! The primitives here (split, borrow, merge) assume the occupancy
//! invariants hold on entry; they check them only in debug builds.

use std::mem;

use crate::common::{Key, MinDegree};

use super::observer::{TreeEvent, TreeObserver};

/// A single node of the tree.
///
/// # Layout
/// ```text
///            keys:  [ k0 | k1 | k2 ]
///        children: [c0 | c1 | c2 | c3]
///
///   every key in c_i  <  k_i  <  every key in c_{i+1}
/// ```
///
/// `keys` is strictly increasing. An internal node always has exactly
/// `keys.len() + 1` children; a leaf has none.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) keys: Vec<Key>,
    pub(crate) children: Vec<Box<Node>>,
    pub(crate) leaf: bool,
}

impl Node {
    /// Create an empty node. Storage grows with what the node holds, so a
    /// large `t` costs nothing up front.
    pub(crate) fn new(leaf: bool) -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            leaf,
        }
    }

    /// Create a leaf holding a single key (the first root of a tree).
    pub(crate) fn with_key(key: Key) -> Self {
        let mut node = Self::new(true);
        node.keys.push(key);
        node
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn is_full(&self, degree: MinDegree) -> bool {
        self.keys.len() == degree.max_keys()
    }

    /// Index of the first key `>= key`, or `len()` if every key is smaller.
    ///
    /// This is both the key's position if present and the child to descend
    /// into if not.
    #[inline]
    pub(crate) fn find_key(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    #[inline]
    fn holds(&self, idx: usize, key: Key) -> bool {
        idx < self.keys.len() && self.keys[idx] == key
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find the node holding `key` in this subtree, with its depth below
    /// `self`.
    pub(crate) fn search(&self, key: Key) -> Option<(usize, &Node)> {
        let mut node = self;
        let mut depth = 0;

        loop {
            let idx = node.find_key(key);
            if node.holds(idx, key) {
                return Some((depth, node));
            }
            if node.leaf {
                return None;
            }
            node = &node.children[idx];
            depth += 1;
        }
    }

    /// Total number of keys in this subtree.
    pub(crate) fn count_keys(&self) -> usize {
        self.keys.len()
            + self
                .children
                .iter()
                .map(|child| child.count_keys())
                .sum::<usize>()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert `key` into this subtree.
    ///
    /// Precondition: `self` is not full and `key` is not already present.
    /// Any full child on the way down is split before we enter it, so the
    /// leaf we finally reach always has room.
    pub(crate) fn insert_non_full<O: TreeObserver>(
        &mut self,
        key: Key,
        degree: MinDegree,
        observer: &O,
    ) {
        debug_assert!(!self.is_full(degree), "insert_non_full on a full node");

        let mut idx = self.find_key(key);
        debug_assert!(!self.holds(idx, key), "duplicate key {key} reached insert");

        if self.leaf {
            self.keys.insert(idx, key);
            return;
        }

        if self.children[idx].is_full(degree) {
            self.split_child(idx, degree, observer);

            // The promoted median now sits at `idx`; pick a side.
            if self.keys[idx] < key {
                idx += 1;
            }
        }

        self.children[idx].insert_non_full(key, degree, observer);
    }

    /// Split the full child at `index` in two.
    ///
    /// ```text
    ///   before:   parent [ .. a | b .. ]
    ///                           |
    ///                  y [ l0 .. l(t-2) | m | u0 .. u(t-2) ]
    ///
    ///   after:    parent [ .. a | m | b .. ]
    ///                           |   |
    ///              y [ l0 .. ]      z [ u0 .. ]
    /// ```
    ///
    /// `y` keeps its lower `t - 1` keys (and lower `t` children), the new
    /// sibling `z` takes the upper `t - 1` keys (and upper `t` children), and
    /// the median `m` moves into this node at `index`.
    pub(crate) fn split_child<O: TreeObserver>(
        &mut self,
        index: usize,
        degree: MinDegree,
        observer: &O,
    ) {
        let t = degree.get();
        let child = &mut self.children[index];
        debug_assert!(child.is_full(degree), "split_child on a non-full child");

        let mut sibling = Node::new(child.leaf);
        sibling.keys.extend(child.keys.drain(t..));
        if !child.leaf {
            sibling.children.extend(child.children.drain(t..));
        }
        let median = child.keys.remove(t - 1);

        self.keys.insert(index, median);
        self.children.insert(index + 1, Box::new(sibling));

        observer.on_event(TreeEvent::Split { median });
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Remove `key` from this subtree. Returns whether it was found.
    ///
    /// Never descends into a child holding fewer than `t` keys: such a child
    /// is topped up first with [`fill`](Self::fill), so removal from the
    /// child can't underflow it and nothing has to be repaired on the way
    /// back up.
    pub(crate) fn remove<O: TreeObserver>(
        &mut self,
        key: Key,
        degree: MinDegree,
        observer: &O,
    ) -> bool {
        let idx = self.find_key(key);

        if self.holds(idx, key) {
            if self.leaf {
                self.remove_from_leaf(idx);
                return true;
            }
            return self.remove_from_internal(idx, degree, observer);
        }

        if self.leaf {
            return false;
        }

        let idx = if self.children[idx].len() < degree.get() {
            self.fill(idx, degree, observer)
        } else {
            idx
        };

        self.children[idx].remove(key, degree, observer)
    }

    fn remove_from_leaf(&mut self, idx: usize) -> Key {
        self.keys.remove(idx)
    }

    /// Remove the key at `idx` of an internal node.
    ///
    /// Tried in order:
    /// 1. left child has `>= t` keys: replace with the predecessor
    /// 2. right child has `>= t` keys: replace with the successor
    /// 3. both children minimal: merge them around the key, then recurse
    fn remove_from_internal<O: TreeObserver>(
        &mut self,
        idx: usize,
        degree: MinDegree,
        observer: &O,
    ) -> bool {
        let key = self.keys[idx];
        let t = degree.get();

        if self.children[idx].len() >= t {
            let predecessor = self.predecessor(idx);
            self.keys[idx] = predecessor;
            observer.on_event(TreeEvent::ReplacedWithPredecessor { key, predecessor });
            self.children[idx].remove(predecessor, degree, observer)
        } else if self.children[idx + 1].len() >= t {
            let successor = self.successor(idx);
            self.keys[idx] = successor;
            observer.on_event(TreeEvent::ReplacedWithSuccessor { key, successor });
            self.children[idx + 1].remove(successor, degree, observer)
        } else {
            self.merge(idx, degree, observer);
            self.children[idx].remove(key, degree, observer)
        }
    }

    /// Largest key in the subtree left of `keys[idx]`.
    fn predecessor(&self, idx: usize) -> Key {
        let mut node = &self.children[idx];
        while !node.leaf {
            node = &node.children[node.len()];
        }
        node.keys[node.len() - 1]
    }

    /// Smallest key in the subtree right of `keys[idx]`.
    fn successor(&self, idx: usize) -> Key {
        let mut node = &self.children[idx + 1];
        while !node.leaf {
            node = &node.children[0];
        }
        node.keys[0]
    }

    /// Raise `children[idx]` to at least `t` keys.
    ///
    /// Returns the index of the child that now covers the original child's
    /// key range: `idx - 1` if it was the last child and got merged into its
    /// left sibling, `idx` otherwise.
    fn fill<O: TreeObserver>(&mut self, idx: usize, degree: MinDegree, observer: &O) -> usize {
        let t = degree.get();

        if idx > 0 && self.children[idx - 1].len() >= t {
            self.borrow_from_prev(idx, observer);
            idx
        } else if idx < self.len() && self.children[idx + 1].len() >= t {
            self.borrow_from_next(idx, observer);
            idx
        } else if idx < self.len() {
            self.merge(idx, degree, observer);
            idx
        } else {
            self.merge(idx - 1, degree, observer);
            idx - 1
        }
    }

    /// Rotate one key from `children[idx - 1]` through the parent into
    /// `children[idx]`.
    ///
    /// The separator `keys[idx - 1]` becomes the child's first key, the left
    /// sibling's last key takes the separator's place, and for internal
    /// nodes the sibling's last child becomes the child's first child.
    fn borrow_from_prev<O: TreeObserver>(&mut self, idx: usize, observer: &O) {
        let (left, right) = self.children.split_at_mut(idx);
        let sibling = &mut left[idx - 1];
        let child = &mut right[0];
        debug_assert!(sibling.len() > 1, "borrow from a sibling with no spare key");

        let replacement = sibling.keys.remove(sibling.keys.len() - 1);
        let separator = mem::replace(&mut self.keys[idx - 1], replacement);
        child.keys.insert(0, separator);

        if !child.leaf {
            let moved = sibling.children.remove(sibling.children.len() - 1);
            child.children.insert(0, moved);
        }

        observer.on_event(TreeEvent::BorrowedFromLeft {
            separator,
            replacement,
        });
    }

    /// Mirror of [`borrow_from_prev`](Self::borrow_from_prev) through
    /// `children[idx + 1]`.
    fn borrow_from_next<O: TreeObserver>(&mut self, idx: usize, observer: &O) {
        let (left, right) = self.children.split_at_mut(idx + 1);
        let child = &mut left[idx];
        let sibling = &mut right[0];
        debug_assert!(sibling.len() > 1, "borrow from a sibling with no spare key");

        let replacement = sibling.keys.remove(0);
        let separator = mem::replace(&mut self.keys[idx], replacement);
        child.keys.push(separator);

        if !child.leaf {
            child.children.push(sibling.children.remove(0));
        }

        observer.on_event(TreeEvent::BorrowedFromRight {
            separator,
            replacement,
        });
    }

    /// Fuse `children[idx]`, `keys[idx]` and `children[idx + 1]` into
    /// `children[idx]`.
    ///
    /// The right child is dropped once its keys and children are moved over.
    /// This node loses one key and one child.
    fn merge<O: TreeObserver>(&mut self, idx: usize, degree: MinDegree, observer: &O) {
        let separator = self.keys.remove(idx);
        let sibling = self.children.remove(idx + 1);
        let child = &mut self.children[idx];
        debug_assert!(
            child.len() + sibling.len() < degree.max_keys(),
            "merge would overflow a node"
        );

        let Node { keys, children, .. } = *sibling;
        child.keys.push(separator);
        child.keys.extend(keys);
        child.children.extend(children);

        observer.on_event(TreeEvent::Merged {
            separator,
            len: child.len(),
        });
    }
}
