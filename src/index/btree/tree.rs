//! The B-tree and its public contract.

use crate::common::{Key, MinDegree, Result};

use super::node::Node;
use super::observer::{NoopObserver, TreeEvent, TreeObserver};
use super::traverse::{Iter, NodeView, Traverse};

/// An in-memory B-tree of distinct keys.
///
/// # Structure
/// ```text
///                    root [ 20 | 40 ]
///                   /       |       \
///         [ 5 | 10 ]   [ 25 | 30 ]   [ 45 | 50 | 60 ]
/// ```
/// - Every non-root node holds `t - 1` to `2t - 1` keys
/// - The root holds 1 to `2t - 1` keys; an empty tree has no root at all
/// - All leaves sit at the same depth
///
/// Height only changes at the root: it grows when a full root is split
/// during insert, and shrinks when a remove empties the root.
///
/// # Observers
/// Structural changes are reported to `O` (see [`TreeObserver`]). The
/// default [`NoopObserver`] compiles down to nothing.
///
/// # Thread Safety
/// `BTree` is a plain single-owner structure: `search` takes `&self`,
/// mutation takes `&mut self`. Wrap it in [`SharedBTree`](super::SharedBTree)
/// (or any lock) to share it across threads.
///
/// # Example
/// ```
/// use interchange_btree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for k in [50, 10, 40, 20, 30] {
///     tree.insert(k);
/// }
///
/// assert!(tree.search(40));
/// assert!(!tree.insert(40)); // duplicates are ignored
///
/// tree.remove(40);
/// assert!(!tree.search(40));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![10, 20, 30, 50]);
/// ```
#[derive(Debug)]
pub struct BTree<O = NoopObserver> {
    /// `None` when the tree is empty.
    root: Option<Box<Node>>,

    degree: MinDegree,

    /// Number of keys, kept in step with every insert/remove.
    len: usize,

    observer: O,
}

impl BTree {
    /// Create an empty tree with minimum degree `t`.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Self::with_observer(t, NoopObserver)
    }
}

impl Default for BTree {
    fn default() -> Self {
        Self::with_degree(MinDegree::DEFAULT, NoopObserver)
    }
}

impl<O: TreeObserver> BTree<O> {
    /// Create an empty tree that reports structural changes to `observer`.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn with_observer(t: usize, observer: O) -> Result<Self> {
        Ok(Self::with_degree(MinDegree::new(t)?, observer))
    }

    /// Create an empty tree from an already validated degree.
    pub fn with_degree(degree: MinDegree, observer: O) -> Self {
        Self {
            root: None,
            degree,
            len: 0,
            observer,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The minimum degree `t`.
    #[inline]
    pub fn min_degree(&self) -> MinDegree {
        self.degree
    }

    /// The observer receiving structural events.
    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 for an empty tree, 1 for a lone root leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            height += 1;
            node = n.children.first().map(|child| &**child);
        }
        height
    }

    /// Count keys by walking every node.
    ///
    /// Always equal to [`len`](Self::len) on a healthy tree; kept as an
    /// independent check for reporting and validation.
    pub fn count_keys(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count_keys())
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Check whether `key` is in the tree.
    pub fn search(&self, key: Key) -> bool {
        self.find_node(key).is_some()
    }

    /// Find the node holding `key`.
    pub fn find_node(&self, key: Key) -> Option<NodeView<'_>> {
        let (depth, node) = self.root.as_ref()?.search(key)?;
        Some(NodeView::new(depth, node))
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Every node in pre-order (parent first, children left to right).
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse::new(self.root.as_deref())
    }

    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert `key`. Returns `false` (and changes nothing) if it was already
    /// present.
    ///
    /// A full root is split before descending, which is the only way the
    /// tree gains height.
    pub fn insert(&mut self, key: Key) -> bool {
        if self.search(key) {
            return false;
        }

        let degree = self.degree;
        let root = match self.root.take() {
            None => Box::new(Node::with_key(key)),
            Some(old_root) if old_root.is_full(degree) => {
                let mut new_root = Node::new(false);
                new_root.children.push(old_root);
                new_root.split_child(0, degree, &self.observer);
                self.observer.on_event(TreeEvent::RootGrown);

                new_root.insert_non_full(key, degree, &self.observer);
                Box::new(new_root)
            }
            Some(mut root) => {
                root.insert_non_full(key, degree, &self.observer);
                root
            }
        };

        self.root = Some(root);
        self.len += 1;
        true
    }

    /// Remove `key`. Returns `false` (and changes nothing) if it was absent.
    ///
    /// If the root ends up without keys, its only child becomes the new
    /// root, or the tree becomes empty if the root was a leaf.
    pub fn remove(&mut self, key: Key) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        if root.search(key).is_none() {
            return false;
        }

        let removed = root.remove(key, self.degree, &self.observer);
        debug_assert!(removed, "key {key} was found but not removed");

        if root.len() == 0 {
            if root.leaf {
                self.root = None;
                self.observer.on_event(TreeEvent::Emptied);
            } else {
                let child = root.children.remove(0);
                self.root = Some(child);
                self.observer.on_event(TreeEvent::RootCollapsed);
            }
        }

        self.len -= 1;
        true
    }

    /// Verify every structural invariant.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` describing the first defect found.
    pub fn validate(&self) -> Result<()> {
        super::validate::validate(self.root.as_deref(), self.degree, self.len)
    }
}

impl FromIterator<Key> for BTree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = BTree::default();
        tree.extend(iter);
        tree
    }
}

impl<O: TreeObserver> Extend<Key> for BTree<O> {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, O: TreeObserver> IntoIterator for &'a BTree<O> {
    type Item = Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn tree_with(t: usize, keys: impl IntoIterator<Item = Key>) -> BTree {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys);
        tree.validate().unwrap();
        tree
    }

    fn shape(tree: &BTree) -> Vec<(usize, Vec<Key>, bool)> {
        tree.traverse()
            .map(|view| (view.depth(), view.keys().to_vec(), view.is_leaf()))
            .collect()
    }

    #[test]
    fn test_new_rejects_small_degree() {
        assert_eq!(BTree::new(1).unwrap_err(), Error::InvalidMinDegree(1));
        assert!(BTree::new(2).is_ok());
    }

    #[test]
    fn test_huge_degree_works() {
        for t in [1 << 40, usize::MAX / 2 + 1, usize::MAX] {
            let mut tree = BTree::new(t).unwrap();

            tree.extend((1..=100).rev());
            assert!(tree.search(1));
            assert!(!tree.search(101));
            assert_eq!(tree.height(), 1);
            tree.validate().unwrap();

            for k in 1..=100 {
                assert!(tree.remove(k));
            }
            assert!(tree.is_empty());
        }
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = BTree::new(2).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.count_keys(), 0);
        assert!(!tree.search(1));
        assert!(!tree.remove(1));
        assert_eq!(tree.traverse().count(), 0);
        tree.validate().unwrap();
    }

    #[test]
    fn test_first_insert_creates_leaf_root() {
        let tree = tree_with(3, [7]);
        assert_eq!(shape(&tree), vec![(0, vec![7], true)]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_root_split_grows_height() {
        let tree = tree_with(2, [10, 20, 30, 40]);

        assert_eq!(tree.height(), 2);
        assert_eq!(
            shape(&tree),
            vec![
                (0, vec![20], false),
                (1, vec![10], true),
                (1, vec![30, 40], true),
            ]
        );
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut tree = tree_with(2, 1..=20);
        let before = shape(&tree);

        assert!(!tree.insert(7));

        assert_eq!(shape(&tree), before);
        assert_eq!(tree.len(), 20);
    }

    #[test]
    fn test_remove_missing_leaves_shape_untouched() {
        let mut tree = tree_with(2, 1..=20);
        let before = shape(&tree);

        assert!(!tree.remove(99));

        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn test_remove_last_key_empties_tree() {
        let mut tree = tree_with(3, [5]);

        assert!(tree.remove(5));

        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        tree.validate().unwrap();
    }

    #[test]
    fn test_root_collapse_shrinks_height() {
        // [20] / [10] [30]: removing 20 merges both leaves into the root's slot
        let mut tree = tree_with(2, [10, 20, 30, 40]);
        tree.remove(40);
        assert_eq!(tree.height(), 2);

        tree.remove(20);

        assert_eq!(tree.height(), 1);
        assert_eq!(shape(&tree), vec![(0, vec![10, 30], true)]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_find_node() {
        let tree = tree_with(2, [10, 20, 30, 40]);

        let view = tree.find_node(40).unwrap();
        assert_eq!(view.depth(), 1);
        assert_eq!(view.keys(), &[30, 40]);
        assert!(view.is_leaf());

        assert!(tree.find_node(25).is_none());
    }

    #[test]
    fn test_from_iterator_uses_default_degree() {
        let tree: BTree = (1..=10).rev().collect();

        assert_eq!(tree.min_degree(), MinDegree::DEFAULT);
        assert_eq!(tree.iter().collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
        tree.validate().unwrap();
    }

    #[test]
    fn test_len_tracks_count_keys() {
        let mut tree = tree_with(3, (0..200).map(|k| k * 7 % 200));
        assert_eq!(tree.len(), 200);

        for k in (0..200).step_by(3) {
            tree.remove(k);
        }

        assert_eq!(tree.len(), tree.count_keys());
        tree.validate().unwrap();
    }
}
