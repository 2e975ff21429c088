//! Common types and utilities shared across the index.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Key and minimum degree types

pub mod config;
pub mod error;
mod min_degree;

pub use error::{Error, Result};
pub use min_degree::MinDegree;

/// A key stored in the tree.
///
/// Keys are fixed-width ordinal values; the tree stores each at most once.
pub type Key = i64;
