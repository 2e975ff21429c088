//! Structural event hooks.
//!
//! The tree never logs or prints on its own. Every rebalancing step is
//! reported as a [`TreeEvent`] to the tree's [`TreeObserver`], which decides
//! what to do with it:
//! - [`NoopObserver`] - discards everything (the default)
//! - [`TracingObserver`] - emits `tracing` debug events
//! - [`TreeStats`](super::TreeStats) - counts events with atomic counters

use std::sync::Arc;

use crate::common::Key;

/// A structural change made while inserting or removing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent {
    /// A full child was split; `median` moved up into the parent.
    Split { median: Key },

    /// The root was split and the tree grew one level.
    RootGrown,

    /// A child was topped up by rotating through its left sibling.
    ///
    /// `separator` descended into the child, `replacement` (the sibling's
    /// last key) ascended into the parent.
    BorrowedFromLeft { separator: Key, replacement: Key },

    /// A child was topped up by rotating through its right sibling.
    BorrowedFromRight { separator: Key, replacement: Key },

    /// Two minimal siblings and their `separator` were fused into one node
    /// holding `len` keys.
    Merged { separator: Key, len: usize },

    /// An internal `key` was overwritten by its in-order predecessor.
    ReplacedWithPredecessor { key: Key, predecessor: Key },

    /// An internal `key` was overwritten by its in-order successor.
    ReplacedWithSuccessor { key: Key, successor: Key },

    /// The root lost its last key and its only child became the root.
    RootCollapsed,

    /// The last key was removed and the tree is now empty.
    Emptied,
}

/// Receives structural events from a tree.
///
/// Observers take `&self` so the tree can hand out shared references during
/// recursion. Implementations that keep state use interior mutability.
pub trait TreeObserver {
    /// Called once per structural change, after the change is applied.
    fn on_event(&self, event: TreeEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TreeObserver for NoopObserver {
    #[inline]
    fn on_event(&self, _event: TreeEvent) {}
}

/// Observer that forwards events to `tracing` at debug level.
///
/// # Example
/// ```
/// use interchange_btree::{BTree, TracingObserver};
///
/// let mut tree = BTree::with_observer(2, TracingObserver).unwrap();
/// for k in 0..10 {
///     tree.insert(k);
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TreeObserver for TracingObserver {
    fn on_event(&self, event: TreeEvent) {
        match event {
            TreeEvent::Split { median } => {
                tracing::debug!(median, "split full child");
            }
            TreeEvent::RootGrown => tracing::debug!("root split, height grew"),
            TreeEvent::BorrowedFromLeft {
                separator,
                replacement,
            } => {
                tracing::debug!(separator, replacement, "borrowed from left sibling");
            }
            TreeEvent::BorrowedFromRight {
                separator,
                replacement,
            } => {
                tracing::debug!(separator, replacement, "borrowed from right sibling");
            }
            TreeEvent::Merged { separator, len } => {
                tracing::debug!(separator, len, "merged siblings");
            }
            TreeEvent::ReplacedWithPredecessor { key, predecessor } => {
                tracing::debug!(key, predecessor, "replaced internal key with predecessor");
            }
            TreeEvent::ReplacedWithSuccessor { key, successor } => {
                tracing::debug!(key, successor, "replaced internal key with successor");
            }
            TreeEvent::RootCollapsed => tracing::debug!("root collapsed, height shrank"),
            TreeEvent::Emptied => tracing::debug!("tree emptied"),
        }
    }
}

impl<O: TreeObserver + ?Sized> TreeObserver for &O {
    #[inline]
    fn on_event(&self, event: TreeEvent) {
        (**self).on_event(event);
    }
}

impl<O: TreeObserver + ?Sized> TreeObserver for Arc<O> {
    #[inline]
    fn on_event(&self, event: TreeEvent) {
        (**self).on_event(event);
    }
}

/// Fan out to two observers, first `A` then `B`.
impl<A: TreeObserver, B: TreeObserver> TreeObserver for (A, B) {
    #[inline]
    fn on_event(&self, event: TreeEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}
