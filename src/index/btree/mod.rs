//! B-tree index implementation.
//!
//! An in-memory B-tree of minimum degree `t` over [`Key`](crate::Key)s,
//! rebalanced top-down: inserts split full nodes on the way down, removes
//! top up minimal nodes on the way down, so neither ever walks back up.
//!
//! # Components
//! - [`BTree`] - The tree and its public contract
//! - [`SharedBTree`] - A `BTree` behind a single `RwLock`
//! - [`NodeView`] / [`Traverse`] / [`Iter`] - Read-only traversal
//! - [`TreeObserver`] / [`TreeEvent`] - Hooks for structural changes
//! - [`TreeStats`] - Counters for splits, borrows and merges

mod node;
mod observer;
mod shared;
mod stats;
mod traverse;
mod tree;
mod validate;

pub use observer::{NoopObserver, TracingObserver, TreeEvent, TreeObserver};
pub use shared::SharedBTree;
pub use stats::{TreeStats, TreeStatsSnapshot};
pub use traverse::{Iter, NodeView, Traverse};
pub use tree::BTree;
