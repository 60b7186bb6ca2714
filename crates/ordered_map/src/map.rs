use std::borrow::Borrow;
use std::mem;

use tracing::{debug, trace};

use crate::node::{Id, LEFT, NIL_HEIGHT, Node, RIGHT, id};

/// Ordered map backed by an AVL tree.
///
/// - Keys are unique. `insert` rejects a key that is already present.
/// - `insert`, `remove` and lookups are `O(log n)`.
/// - Nodes live in an arena and refer to each other by index, including the
///   non-owning `parent` link used to re-link subtrees after a rotation.
#[derive(Clone)]
pub struct OrderedMap<K = String, V = u64> {
    pub(crate) nodes: Vec<Node<K, V>>,
    pub(crate) root: Id,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: Id::NIL,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the root, counting edges. An empty map and a single entry
    /// both report 0.
    pub fn height(&self) -> usize {
        if self.root.is_nil() {
            0
        } else {
            self.node(self.root).height as usize
        }
    }

    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            debug!(len = self.nodes.len(), "clearing map");
        }
        self.nodes.clear();
        self.root = Id::NIL;
    }

    #[inline(always)]
    pub(crate) fn node(&self, x: Id) -> &Node<K, V> {
        debug_assert!(!x.is_nil());
        debug_assert!(x.idx() < self.nodes.len());
        &self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, x: Id) -> &mut Node<K, V> {
        debug_assert!(!x.is_nil());
        debug_assert!(x.idx() < self.nodes.len());
        &mut self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(crate) fn height_of(&self, x: Id) -> i16 {
        if x.is_nil() {
            NIL_HEIGHT
        } else {
            self.node(x).height
        }
    }

    pub(crate) fn recalc(&mut self, x: Id) {
        let [l, r] = self.node(x).ch;
        let height = 1 + self.height_of(l).max(self.height_of(r));
        self.node_mut(x).height = height;
    }

    pub(crate) fn balance_factor(&self, x: Id) -> i16 {
        let [l, r] = self.node(x).ch;
        self.height_of(l) - self.height_of(r)
    }

    pub(crate) fn set_parent(&mut self, x: Id, parent: Id) {
        if !x.is_nil() {
            self.node_mut(x).parent = parent;
        }
    }

    /// Which child slot of `parent` holds `child`.
    pub(crate) fn child_dir(&self, parent: Id, child: Id) -> usize {
        let ch = self.node(parent).ch;
        debug_assert!(ch[LEFT] == child || ch[RIGHT] == child);
        if ch[LEFT] == child { LEFT } else { RIGHT }
    }

    /// Puts `new` where `old` hung under `parent` (or at the root when
    /// `parent` is `NIL`) and points `new` back at `parent`.
    pub(crate) fn replace_child(&mut self, parent: Id, old: Id, new: Id) {
        if parent.is_nil() {
            self.root = new;
        } else {
            let dir = self.child_dir(parent, old);
            self.node_mut(parent).ch[dir] = new;
        }
        self.set_parent(new, parent);
    }

    fn alloc(&mut self, node: Node<K, V>) -> Id {
        let x = id(self.nodes.len());
        self.nodes.push(node);
        x
    }

    /// Takes a detached node out of the arena. The last node moves into the
    /// vacated slot, so every link to it is rewritten first.
    fn release(&mut self, x: Id) -> Node<K, V> {
        let last = id(self.nodes.len() - 1);
        if x != last {
            let (parent, ch) = (self.node(last).parent, self.node(last).ch);
            self.replace_child(parent, last, x);
            for c in ch {
                self.set_parent(c, x);
            }
        }
        self.nodes.swap_remove(x.idx())
    }

    fn swap_payload(&mut self, a: Id, b: Id) {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a.idx() < b.idx() { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi.idx());
        let (x, y) = (&mut head[lo.idx()], &mut tail[0]);
        mem::swap(&mut x.key, &mut y.key);
        mem::swap(&mut x.value, &mut y.value);
    }

    /// Removes a node with at most one child, splicing that child into its
    /// place, then rebalances from the former parent up.
    fn unlink(&mut self, x: Id) -> (K, V) {
        let node = self.node(x);
        let (parent, child) = (node.parent, node.sole_child());
        self.replace_child(parent, x, child);

        let moved_from = id(self.nodes.len() - 1);
        let Node { key, value, .. } = self.release(x);
        let parent = if parent == moved_from { x } else { parent };
        self.retrace(parent);
        (key, value)
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts `key` with `value`. Returns `false` and leaves the map untouched
    /// when `key` is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (parent, dir) = match self.find_slot(&key) {
            Ok(_) => return false,
            Err(slot) => slot,
        };
        let x = self.alloc(Node::new(key, value, parent));
        if parent.is_nil() {
            self.root = x;
        } else {
            self.node_mut(parent).ch[dir] = x;
            self.retrace(parent);
        }
        true
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.find(key);
        (!x.is_nil()).then(|| &self.node(x).value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.find(key);
        if x.is_nil() {
            return None;
        }
        Some(&mut self.node_mut(x).value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.find(key);
        (!x.is_nil()).then(|| self.entry_at(x))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(key).is_nil()
    }

    /// Removes `key`. Returns `false` when it was not present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` and returns the entry that held it.
    ///
    /// A node with two children keeps its position: it takes over the
    /// in-order successor's entry, and the successor's node (which has no
    /// left child) is the one physically removed.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.find(key);
        if x.is_nil() {
            return None;
        }
        let [l, r] = self.node(x).ch;
        let victim = if l.is_nil() || r.is_nil() {
            x
        } else {
            let successor = self.extreme(r, LEFT);
            trace!("two-child removal, splicing in-order successor");
            self.swap_payload(x, successor);
            successor
        };
        Some(self.unlink(victim))
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        (!self.root.is_nil()).then(|| self.entry_at(self.extreme(self.root, LEFT)))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        (!self.root.is_nil()).then(|| self.entry_at(self.extreme(self.root, RIGHT)))
    }

    /// Smallest entry whose key is `>= key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.ceil(key);
        (!x.is_nil()).then(|| self.entry_at(x))
    }
}

impl<K, V> OrderedMap<K, V> {
    pub(crate) fn entry_at(&self, x: Id) -> (&K, &V) {
        let node = self.node(x);
        (&node.key, &node.value)
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    /// Later duplicates of a key are ignored.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}
