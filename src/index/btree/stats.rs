//! B-tree rebalancing statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::observer::{TreeEvent, TreeObserver};

/// Counts of structural changes made by a tree.
///
/// All fields are atomic so the stats can be shared (for example behind an
/// `Arc`) and updated through `&self` from inside the tree's recursion.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Statistics are "eventually consistent" - exact ordering doesn't matter
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use interchange_btree::{BTree, TreeStats};
///
/// let stats = Arc::new(TreeStats::new());
/// let mut tree = BTree::with_observer(2, Arc::clone(&stats)).unwrap();
/// for k in 0..4 {
///     tree.insert(k);
/// }
/// assert_eq!(stats.snapshot().root_grows, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Number of full children split (root splits included).
    pub splits: AtomicU64,

    /// Number of times the tree grew a level.
    pub root_grows: AtomicU64,

    /// Number of rotations through a left sibling.
    pub borrows_left: AtomicU64,

    /// Number of rotations through a right sibling.
    pub borrows_right: AtomicU64,

    /// Number of sibling merges.
    pub merges: AtomicU64,

    /// Number of internal keys replaced by their predecessor.
    pub predecessor_swaps: AtomicU64,

    /// Number of internal keys replaced by their successor.
    pub successor_swaps: AtomicU64,

    /// Number of times an internal root gave way to its only child.
    pub root_collapses: AtomicU64,

    /// Number of times the last key left the tree.
    pub emptied: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            splits: AtomicU64::new(0),
            root_grows: AtomicU64::new(0),
            borrows_left: AtomicU64::new(0),
            borrows_right: AtomicU64::new(0),
            merges: AtomicU64::new(0),
            predecessor_swaps: AtomicU64::new(0),
            successor_swaps: AtomicU64::new(0),
            root_collapses: AtomicU64::new(0),
            emptied: AtomicU64::new(0),
        }
    }

    /// Get a snapshot of current statistics.
    ///
    /// This returns a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> TreeStatsSnapshot {
        TreeStatsSnapshot {
            splits: self.splits.load(Ordering::Relaxed),
            root_grows: self.root_grows.load(Ordering::Relaxed),
            borrows_left: self.borrows_left.load(Ordering::Relaxed),
            borrows_right: self.borrows_right.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            predecessor_swaps: self.predecessor_swaps.load(Ordering::Relaxed),
            successor_swaps: self.successor_swaps.load(Ordering::Relaxed),
            root_collapses: self.root_collapses.load(Ordering::Relaxed),
            emptied: self.emptied.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.splits.store(0, Ordering::Relaxed);
        self.root_grows.store(0, Ordering::Relaxed);
        self.borrows_left.store(0, Ordering::Relaxed);
        self.borrows_right.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.predecessor_swaps.store(0, Ordering::Relaxed);
        self.successor_swaps.store(0, Ordering::Relaxed);
        self.root_collapses.store(0, Ordering::Relaxed);
        self.emptied.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeObserver for TreeStats {
    fn on_event(&self, event: TreeEvent) {
        let counter = match event {
            TreeEvent::Split { .. } => &self.splits,
            TreeEvent::RootGrown => &self.root_grows,
            TreeEvent::BorrowedFromLeft { .. } => &self.borrows_left,
            TreeEvent::BorrowedFromRight { .. } => &self.borrows_right,
            TreeEvent::Merged { .. } => &self.merges,
            TreeEvent::ReplacedWithPredecessor { .. } => &self.predecessor_swaps,
            TreeEvent::ReplacedWithSuccessor { .. } => &self.successor_swaps,
            TreeEvent::RootCollapsed => &self.root_collapses,
            TreeEvent::Emptied => &self.emptied,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of tree statistics.
///
/// Unlike `TreeStats`, this is not atomic and can be safely
/// printed, compared, etc.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStatsSnapshot {
    pub splits: u64,
    pub root_grows: u64,
    pub borrows_left: u64,
    pub borrows_right: u64,
    pub merges: u64,
    pub predecessor_swaps: u64,
    pub successor_swaps: u64,
    pub root_collapses: u64,
    pub emptied: u64,
}

impl TreeStatsSnapshot {
    /// Total number of borrow rotations in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }
}

impl fmt::Display for TreeStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, borrows: {}, pred/succ: {}/{}, height +{}/-{}, emptied: {} }}",
            self.splits,
            self.merges,
            self.borrows(),
            self.predecessor_swaps,
            self.successor_swaps,
            self.root_grows,
            self.root_collapses,
            self.emptied
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), TreeStatsSnapshot::default());
    }

    #[test]
    fn test_stats_count_events() {
        let stats = TreeStats::new();

        stats.on_event(TreeEvent::Split { median: 3 });
        stats.on_event(TreeEvent::Split { median: 9 });
        stats.on_event(TreeEvent::BorrowedFromLeft {
            separator: 5,
            replacement: 4,
        });
        stats.on_event(TreeEvent::BorrowedFromRight {
            separator: 5,
            replacement: 6,
        });
        stats.on_event(TreeEvent::RootCollapsed);
        stats.on_event(TreeEvent::Emptied);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.splits, 2);
        assert_eq!(snapshot.borrows(), 2);
        assert_eq!(snapshot.root_collapses, 1);
        assert_eq!(snapshot.emptied, 1);
        assert_eq!(snapshot.merges, 0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = TreeStats::new();
        stats.merges.fetch_add(100, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.merges.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.splits.fetch_add(12, Ordering::Relaxed);
        stats.merges.fetch_add(3, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("splits: 12"));
        assert!(display.contains("merges: 3"));
    }
}
