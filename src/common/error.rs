//! Error types for the B-tree index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the index.
///
/// A missing key or a duplicate insert is *not* an error: those are normal
/// outcomes reported through `bool` return values. The only fallible steps
/// are constructing a tree and explicitly validating one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested minimum degree is below 2.
    ///
    /// With `t < 2` a non-root node could hold zero keys, which makes the
    /// occupancy bounds meaningless.
    #[error("Invalid minimum degree {0}: must be at least 2")]
    InvalidMinDegree(usize),

    /// `BTree::validate` found a structural defect.
    ///
    /// This indicates a bug in the tree, never a caller mistake.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidMinDegree(1);
        assert_eq!(format!("{}", err), "Invalid minimum degree 1: must be at least 2");

        let err = Error::InvariantViolation("root has no keys".into());
        assert_eq!(format!("{}", err), "B-tree invariant violated: root has no keys");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }

    #[test]
    fn test_error_is_std_error() {
        let err = Error::InvalidMinDegree(0);
        assert!(std::error::Error::source(&err).is_none());
    }
}
