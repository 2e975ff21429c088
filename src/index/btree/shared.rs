//! A B-tree behind one reader-writer lock.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{Key, Result};

use super::observer::{NoopObserver, TreeObserver};
use super::tree::BTree;

/// A [`BTree`] that can be shared across threads.
///
/// The tree itself is not concurrent; this wrapper serializes access with a
/// single `RwLock` around the whole structure:
/// - `search`, `len`, `count_keys`: shared (many readers)
/// - `insert`, `remove`: exclusive
///
/// Multi-step operations that must be atomic should hold a guard from
/// [`read`](Self::read) or [`write`](Self::write) for their duration.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use interchange_btree::SharedBTree;
///
/// let tree = Arc::new(SharedBTree::new(3).unwrap());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || {
///             for k in 0..100 {
///                 tree.insert(i * 100 + k);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
#[derive(Debug)]
pub struct SharedBTree<O = NoopObserver> {
    inner: RwLock<BTree<O>>,
}

impl SharedBTree {
    /// Create an empty shared tree with minimum degree `t`.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(t)?))
    }
}

impl<O: TreeObserver> SharedBTree<O> {
    /// Wrap an existing tree.
    pub fn from_tree(tree: BTree<O>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }

    pub fn search(&self, key: Key) -> bool {
        self.inner.read().search(key)
    }

    pub fn insert(&self, key: Key) -> bool {
        self.inner.write().insert(key)
    }

    pub fn remove(&self, key: Key) -> bool {
        self.inner.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn count_keys(&self) -> usize {
        self.inner.read().count_keys()
    }

    /// Acquire shared access to the whole tree.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<O>> {
        self.inner.read()
    }

    /// Acquire exclusive access to the whole tree.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, BTree<O>> {
        self.inner.write()
    }

    /// Unwrap the tree.
    pub fn into_inner(self) -> BTree<O> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use crate::index::btree::TreeStats;

    #[test]
    fn test_shared_basic() {
        let tree = SharedBTree::new(2).unwrap();

        assert!(tree.is_empty());
        assert!(tree.insert(5));
        assert!(!tree.insert(5));
        assert!(tree.search(5));
        assert!(tree.remove(5));
        assert!(!tree.search(5));
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let stats = Arc::new(TreeStats::new());
        let tree = BTree::with_observer(2, Arc::clone(&stats)).unwrap();
        let tree = Arc::new(SharedBTree::from_tree(tree));

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || {
                    for k in 0..250 {
                        tree.insert(k * 4 + i);
                    }
                })
            })
            .collect();

        let reader = {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for _ in 0..100 {
                    let guard = tree.read();
                    assert_eq!(guard.len(), guard.count_keys());
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        let tree = Arc::try_unwrap(tree).unwrap().into_inner();
        assert_eq!(tree.len(), 1000);
        tree.validate().unwrap();
        assert!(stats.snapshot().splits > 0);
    }

    #[test]
    fn test_write_guard_batches_operations() {
        let tree = SharedBTree::new(3).unwrap();
        {
            let mut guard = tree.write();
            guard.extend(0..10);
            guard.remove(3);
        }
        assert_eq!(tree.len(), 9);
        assert!(!tree.search(3));
    }
}
