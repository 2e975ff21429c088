//! interchange-btree - An in-memory B-tree index with top-down rebalancing.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       interchange-btree                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Shared Access (SharedBTree)                  │   │
//! │  │          one RwLock around the whole tree               │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                BTree (index/btree/)                      │   │
//! │  │   search · insert (split) · remove (borrow / merge)      │   │
//! │  │   traverse · iter · validate                             │   │
//! │  │        ─── TreeEvent ──▶ TreeObserver                    │   │
//! │  │             (Noop | Tracing | TreeStats)                 │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                  Node (owned children)                   │   │
//! │  │    split_child · borrow_from_prev/next · merge · fill    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Key, MinDegree, Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use interchange_btree::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for k in 1..=63 {
//!     tree.insert(k);
//! }
//!
//! tree.remove(32);
//! assert!(!tree.search(32));
//! assert_eq!(tree.count_keys(), 62);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_MIN_DEGREE;
pub use common::{Error, Key, MinDegree, Result};

pub use index::btree::{
    BTree, Iter, NodeView, NoopObserver, SharedBTree, TracingObserver, Traverse, TreeEvent,
    TreeObserver, TreeStats, TreeStatsSnapshot,
};
