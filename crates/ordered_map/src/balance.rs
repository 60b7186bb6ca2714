use tracing::trace;

use crate::map::OrderedMap;
use crate::node::{Id, LEFT, RIGHT};

impl<K, V> OrderedMap<K, V> {
    /// Rotates the subtree at `x` so that `x` moves down towards `dir`.
    /// `rotate(x, LEFT)` is a left rotation: the right child takes `x`'s
    /// place and `x` becomes its left child. Returns the new subtree root.
    pub(crate) fn rotate(&mut self, x: Id, dir: usize) -> Id {
        let opp = dir ^ 1;
        let c = self.node(x).ch[opp];
        debug_assert!(!c.is_nil(), "rotation needs a child on the heavy side");
        let inner = self.node(c).ch[dir];
        let parent = self.node(x).parent;

        self.node_mut(x).ch[opp] = inner;
        self.set_parent(inner, x);
        self.node_mut(c).ch[dir] = x;
        self.node_mut(x).parent = c;
        self.replace_child(parent, x, c);

        self.recalc(x);
        self.recalc(c);
        c
    }

    /// Restores the balance condition at `x`, assuming both subtrees are
    /// balanced and their heights differ by at most 2. Returns the root of
    /// the subtree that now stands where `x` stood.
    pub(crate) fn rebalance(&mut self, x: Id) -> Id {
        self.recalc(x);
        let bf = self.balance_factor(x);
        if bf > 1 {
            let l = self.node(x).ch[LEFT];
            if self.balance_factor(l) < 0 {
                trace!(balance = bf, "left-right rotation");
                self.rotate(l, LEFT);
            } else {
                trace!(balance = bf, "right rotation");
            }
            return self.rotate(x, RIGHT);
        }
        if bf < -1 {
            let r = self.node(x).ch[RIGHT];
            if self.balance_factor(r) > 0 {
                trace!(balance = bf, "right-left rotation");
                self.rotate(r, RIGHT);
            } else {
                trace!(balance = bf, "left rotation");
            }
            return self.rotate(x, LEFT);
        }
        x
    }

    /// Walks from `x` to the root, fixing heights and rotating where needed.
    /// Stops early once a subtree comes out with its old height and no
    /// rotation, since nothing above it can have changed.
    pub(crate) fn retrace(&mut self, mut x: Id) {
        while !x.is_nil() {
            let before = self.node(x).height;
            let top = self.rebalance(x);
            if top == x && self.node(x).height == before {
                return;
            }
            x = self.node(top).parent;
        }
    }
}
