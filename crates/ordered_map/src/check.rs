use thiserror::Error;

use crate::map::OrderedMap;
use crate::node::{Id, LEFT, RIGHT};

/// A structural invariant of the tree that does not hold.
///
/// Normal operations never produce these; seeing one means a bug.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("keys are not in strictly ascending in-order sequence")]
    Unordered,

    #[error("node has balance factor {balance}")]
    Unbalanced { balance: i16 },

    #[error("node caches height {cached} but its subtree has height {actual}")]
    StaleHeight { cached: i16, actual: i16 },

    #[error("child does not point back at its parent")]
    BrokenParentLink,

    #[error("root has a parent")]
    RootHasParent,

    #[error("map reports {len} entries but {reachable} are reachable from the root")]
    SizeMismatch { len: usize, reachable: usize },
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Verifies the search order, balance, cached heights, parent links and
    /// entry count of the whole tree. `O(n)`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if !self.root.is_nil() && !self.node(self.root).parent.is_nil() {
            return Err(InvariantError::RootHasParent);
        }
        let mut reachable = 0;
        let mut prev: Option<&K> = None;
        self.check_subtree(self.root, &mut prev, &mut reachable)?;
        if reachable != self.len() {
            return Err(InvariantError::SizeMismatch {
                len: self.len(),
                reachable,
            });
        }
        Ok(())
    }

    /// Returns the true height of the subtree at `x`, visiting it in order.
    fn check_subtree<'a>(
        &'a self,
        x: Id,
        prev: &mut Option<&'a K>,
        reachable: &mut usize,
    ) -> Result<i16, InvariantError> {
        if x.is_nil() {
            return Ok(-1);
        }
        let node = self.node(x);
        for c in node.ch {
            if !c.is_nil() && self.node(c).parent != x {
                return Err(InvariantError::BrokenParentLink);
            }
        }

        let hl = self.check_subtree(node.ch[LEFT], prev, reachable)?;
        if prev.is_some_and(|p| *p >= node.key) {
            return Err(InvariantError::Unordered);
        }
        *prev = Some(&node.key);
        *reachable += 1;
        let hr = self.check_subtree(node.ch[RIGHT], prev, reachable)?;

        let actual = 1 + hl.max(hr);
        if node.height != actual {
            return Err(InvariantError::StaleHeight {
                cached: node.height,
                actual,
            });
        }
        let balance = hl - hr;
        if !(-1..=1).contains(&balance) {
            return Err(InvariantError::Unbalanced { balance });
        }
        Ok(actual)
    }
}
