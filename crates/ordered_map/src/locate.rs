use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::map::OrderedMap;
use crate::node::{Id, LEFT, RIGHT};

impl<K: Ord, V> OrderedMap<K, V> {
    /// Node holding `key`, or `NIL`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Id
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root;
        while !cur.is_nil() {
            let node = self.node(cur);
            cur = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.ch[LEFT],
                Ordering::Greater => node.ch[RIGHT],
                Ordering::Equal => return cur,
            };
        }
        Id::NIL
    }

    /// `Ok(node)` when `key` is present, otherwise `Err((parent, dir))`: the
    /// empty child slot a new leaf for `key` belongs in. `parent` is `NIL`
    /// for an empty map.
    pub(crate) fn find_slot(&self, key: &K) -> Result<Id, (Id, usize)> {
        let mut parent = Id::NIL;
        let mut dir = LEFT;
        let mut cur = self.root;
        while !cur.is_nil() {
            let node = self.node(cur);
            dir = match key.cmp(&node.key) {
                Ordering::Less => LEFT,
                Ordering::Greater => RIGHT,
                Ordering::Equal => return Ok(cur),
            };
            parent = cur;
            cur = node.ch[dir];
        }
        Err((parent, dir))
    }

    /// Smallest node with key `>= key`, or `NIL`.
    pub(crate) fn ceil<Q>(&self, key: &Q) -> Id
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root;
        let mut candidate = Id::NIL;
        while !cur.is_nil() {
            let node = self.node(cur);
            if key <= node.key.borrow() {
                candidate = cur;
                cur = node.ch[LEFT];
            } else {
                cur = node.ch[RIGHT];
            }
        }
        candidate
    }

    /// Largest node with key `<= key`, or `NIL`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Id
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root;
        let mut candidate = Id::NIL;
        while !cur.is_nil() {
            let node = self.node(cur);
            if key >= node.key.borrow() {
                candidate = cur;
                cur = node.ch[RIGHT];
            } else {
                cur = node.ch[LEFT];
            }
        }
        candidate
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Last node reached from `x` by following `dir` links.
    pub(crate) fn extreme(&self, mut x: Id, dir: usize) -> Id {
        debug_assert!(!x.is_nil());
        loop {
            let next = self.node(x).ch[dir];
            if next.is_nil() {
                return x;
            }
            x = next;
        }
    }

    /// In-order neighbour of `x`: the successor for `RIGHT`, the predecessor
    /// for `LEFT`. Climbs parent links when `x` has no child on that side.
    pub(crate) fn neighbor(&self, x: Id, dir: usize) -> Id {
        let child = self.node(x).ch[dir];
        if !child.is_nil() {
            return self.extreme(child, dir ^ 1);
        }
        let mut x = x;
        let mut parent = self.node(x).parent;
        while !parent.is_nil() && self.node(parent).ch[dir] == x {
            x = parent;
            parent = self.node(x).parent;
        }
        parent
    }
}
