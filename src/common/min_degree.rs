//! Minimum degree type.

use std::fmt;

use crate::common::config::{DEFAULT_MIN_DEGREE, MIN_DEGREE_FLOOR};
use crate::common::{Error, Result};

/// The minimum degree `t` of a B-tree.
///
/// Bounds node occupancy for every node except the root:
/// - `t - 1` to `2t - 1` keys
/// - `t` to `2t` children for internal nodes
///
/// A `MinDegree` can only be built through [`MinDegree::new`], so holding one
/// means `t >= 2` has already been checked.
///
/// # Example
/// ```
/// use interchange_btree::MinDegree;
///
/// let t = MinDegree::new(3).unwrap();
/// assert_eq!(t.min_keys(), 2);
/// assert_eq!(t.max_keys(), 5);
/// assert!(MinDegree::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinDegree(usize);

impl MinDegree {
    /// Degree used when none is given.
    pub const DEFAULT: MinDegree = MinDegree(DEFAULT_MIN_DEGREE);

    /// Create a new MinDegree.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        if t < MIN_DEGREE_FLOOR {
            return Err(Error::InvalidMinDegree(t));
        }
        Ok(MinDegree(t))
    }

    /// The raw value of `t`.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Fewest keys a non-root node may hold (`t - 1`).
    #[inline]
    pub fn min_keys(self) -> usize {
        self.0 - 1
    }

    /// Most keys any node may hold (`2t - 1`).
    ///
    /// Saturates at `usize::MAX` for degrees too large to double; no node
    /// can reach that bound in memory.
    #[inline]
    pub fn max_keys(self) -> usize {
        self.0.saturating_add(self.0 - 1)
    }

    /// Most children an internal node may have (`2t`, saturating).
    #[inline]
    pub fn max_children(self) -> usize {
        self.0.saturating_mul(2)
    }
}

impl Default for MinDegree {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MinDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_degree_new() {
        let t = MinDegree::new(2).unwrap();
        assert_eq!(t.get(), 2);
        assert_eq!(t.min_keys(), 1);
        assert_eq!(t.max_keys(), 3);
        assert_eq!(t.max_children(), 4);
    }

    #[test]
    fn test_min_degree_rejects_small() {
        assert_eq!(MinDegree::new(0), Err(Error::InvalidMinDegree(0)));
        assert_eq!(MinDegree::new(1), Err(Error::InvalidMinDegree(1)));
    }

    #[test]
    fn test_min_degree_huge_bounds_saturate() {
        let t = MinDegree::new(usize::MAX / 2 + 1).unwrap();
        assert_eq!(t.max_keys(), usize::MAX);
        assert_eq!(t.max_children(), usize::MAX);

        let t = MinDegree::new(usize::MAX).unwrap();
        assert_eq!(t.min_keys(), usize::MAX - 1);
        assert_eq!(t.max_keys(), usize::MAX);
    }

    #[test]
    fn test_min_degree_default() {
        assert_eq!(MinDegree::default().get(), DEFAULT_MIN_DEGREE);
    }

    #[test]
    fn test_min_degree_display() {
        assert_eq!(format!("{}", MinDegree::new(3).unwrap()), "t=3");
    }
}
