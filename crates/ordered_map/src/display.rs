use std::fmt;

use crate::map::OrderedMap;
use crate::node::{Id, LEFT, RIGHT};

const INDENT: usize = 4;

impl<K: fmt::Display, V: fmt::Display> OrderedMap<K, V> {
    fn render(&self, f: &mut fmt::Formatter<'_>, x: Id, top: i16) -> fmt::Result {
        if x.is_nil() {
            return Ok(());
        }
        let node = self.node(x);
        self.render(f, node.ch[RIGHT], top)?;
        let indent = (top - node.height) as usize * INDENT;
        writeln!(f, "{:indent$}{}: {}", "", node.key, node.value)?;
        self.render(f, node.ch[LEFT], top)
    }
}

/// Sideways tree: one `key: value` line per entry, right subtree first, so
/// the output reads top to bottom in descending key order. Entries are
/// indented by how far their height is below the root's.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_nil() {
            return Ok(());
        }
        self.render(f, self.root, self.node(self.root).height)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
