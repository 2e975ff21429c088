//! Structural invariant checks.
//!
//! Checked for every node:
//! - keys strictly increasing
//! - keys strictly between the bounds set by the ancestors' separators
//! - `t - 1 <= keys <= 2t - 1` (root: at least 1)
//! - internal: exactly `keys + 1` children; leaf: none
//! - every leaf at the same depth
//!
//! And for the tree: the tracked length matches the number of keys found.

use crate::common::{Error, Key, MinDegree, Result};

use super::node::Node;

pub(crate) fn validate(root: Option<&Node>, degree: MinDegree, len: usize) -> Result<()> {
    let Some(root) = root else {
        if len != 0 {
            return Err(violation(format!("empty tree reports len {len}")));
        }
        return Ok(());
    };

    let mut checker = Checker {
        degree,
        leaf_depth: None,
    };
    let counted = checker.check(root, 0, None, None)?;

    if counted != len {
        return Err(violation(format!("len is {len} but {counted} keys are stored")));
    }
    Ok(())
}

fn violation(msg: String) -> Error {
    Error::InvariantViolation(msg)
}

struct Checker {
    degree: MinDegree,
    leaf_depth: Option<usize>,
}

impl Checker {
    /// Returns the number of keys in the subtree.
    fn check(
        &mut self,
        node: &Node,
        depth: usize,
        lower: Option<Key>,
        upper: Option<Key>,
    ) -> Result<usize> {
        let n = node.len();
        let min = if depth == 0 { 1 } else { self.degree.min_keys() };

        if n < min || n > self.degree.max_keys() {
            return Err(violation(format!(
                "node {:?} at depth {depth} holds {n} keys, allowed {min}..={} ({})",
                node.keys,
                self.degree.max_keys(),
                self.degree
            )));
        }

        if let Some(pair) = node.keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(violation(format!(
                "keys {} and {} out of order in {:?}",
                pair[0], pair[1], node.keys
            )));
        }

        let first = node.keys[0];
        let last = node.keys[n - 1];
        if lower.is_some_and(|bound| first <= bound) || upper.is_some_and(|bound| last >= bound) {
            return Err(violation(format!(
                "node {:?} escapes separator bounds ({lower:?}, {upper:?})",
                node.keys
            )));
        }

        if node.leaf {
            if !node.children.is_empty() {
                return Err(violation(format!("leaf {:?} has children", node.keys)));
            }
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(violation(format!(
                        "leaf {:?} at depth {depth}, expected {expected}",
                        node.keys
                    )));
                }
                Some(_) => {}
            }
            return Ok(n);
        }

        if node.children.len() != n + 1 {
            return Err(violation(format!(
                "internal node {:?} has {} children, expected {}",
                node.keys,
                node.children.len(),
                n + 1
            )));
        }

        let mut total = n;
        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(node.keys[i - 1]) };
            let hi = if i == n { upper } else { Some(node.keys[i]) };
            total += self.check(child, depth + 1, lo, hi)?;
        }
        Ok(total)
    }
}
