//! Read-only views and iterators over a tree.
//!
//! - [`Traverse`] walks nodes in pre-order, yielding a [`NodeView`] each;
//!   this is everything a dump or report needs to know about the shape.
//! - [`Iter`] walks keys in ascending order.

use std::iter::FusedIterator;

use crate::common::Key;

use super::node::Node;

/// A borrowed, read-only look at one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a> {
    depth: usize,
    keys: &'a [Key],
    is_leaf: bool,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(depth: usize, node: &'a Node) -> Self {
        Self {
            depth,
            keys: &node.keys,
            is_leaf: node.leaf,
        }
    }

    /// Distance from the root (the root is at depth 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The node's keys, strictly increasing.
    #[inline]
    pub fn keys(&self) -> &'a [Key] {
        self.keys
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }
}

/// Pre-order node iterator returned by `BTree::traverse`.
pub struct Traverse<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Traverse<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        Self {
            stack: root.map(|node| (0, node)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Reversed so the leftmost child is popped next.
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, &**child)));
        Some(NodeView::new(depth, node))
    }
}

impl FusedIterator for Traverse<'_> {}

/// In-order key iterator returned by `BTree::iter`.
///
/// Keeps one `(node, next key index)` frame per level on the current
/// root-to-leaf path.
pub struct Iter<'a> {
    stack: Vec<(&'a Node, usize)>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(root: Option<&'a Node>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend_leftmost(root);
        }
        iter
    }

    fn descend_leftmost(&mut self, mut node: &'a Node) {
        loop {
            self.stack.push((node, 0));
            if node.leaf {
                break;
            }
            node = &node.children[0];
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        while let Some(top) = self.stack.last_mut() {
            let (node, idx) = *top;
            if idx < node.keys.len() {
                top.1 += 1;
                if !node.leaf {
                    self.descend_leftmost(&node.children[idx + 1]);
                }
                self.remaining -= 1;
                return Some(node.keys[idx]);
            }
            self.stack.pop();
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use crate::index::btree::BTree;

    #[test]
    fn test_traverse_is_preorder() {
        let mut tree = BTree::new(2).unwrap();
        tree.extend(1..=10);

        let views: Vec<_> = tree.traverse().collect();

        assert_eq!(views[0].depth(), 0);
        assert!(!views[0].is_leaf());
        // a child always follows its parent and depths never jump by more than one
        for pair in views.windows(2) {
            assert!(pair[1].depth() <= pair[0].depth() + 1);
        }
        let leaf_keys: Vec<_> = views
            .iter()
            .filter(|view| view.is_leaf())
            .flat_map(|view| view.keys().iter().copied())
            .collect();
        let mut sorted = leaf_keys.clone();
        sorted.sort_unstable();
        assert_eq!(leaf_keys, sorted);
    }

    #[test]
    fn test_iter_in_order() {
        let mut tree = BTree::new(2).unwrap();
        tree.extend([40, 10, 30, 20, 50, 60, 5, 15, 25, 35, 45, 55]);

        let keys: Vec<_> = tree.iter().collect();

        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn test_iter_exact_size() {
        let mut tree = BTree::new(3).unwrap();
        tree.extend(0..50);

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 50);
        iter.next();
        assert_eq!(iter.len(), 49);
        assert_eq!(iter.count(), 49);
    }

    #[test]
    fn test_iter_empty() {
        let tree = BTree::new(3).unwrap();
        assert_eq!(tree.iter().next(), None);
        assert_eq!((&tree).into_iter().len(), 0);
    }
}
