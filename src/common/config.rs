//! Configuration constants for the B-tree index.

/// Smallest legal minimum degree.
///
/// With `t = 2` every non-root node holds 1 to 3 keys (a 2-3-4 tree).
/// Anything lower would allow empty non-root nodes.
pub const MIN_DEGREE_FLOOR: usize = 2;

/// Minimum degree used by `BTree::default()` and `FromIterator`.
///
/// # Node Layout
/// With `t = 3`:
/// - Non-root nodes hold 2..=5 keys
/// - Internal nodes have 3..=6 children
pub const DEFAULT_MIN_DEGREE: usize = 3;
