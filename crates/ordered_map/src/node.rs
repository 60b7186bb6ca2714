pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

/// Height of an absent subtree.
pub(crate) const NIL_HEIGHT: i16 = -1;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Id(u32);

impl Id {
    pub(crate) const NIL: Self = Self(u32::MAX);

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline(always)]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

#[inline(always)]
pub(crate) fn id(v: usize) -> Id {
    debug_assert!(v < u32::MAX as usize);
    Id(v as u32)
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Edges on the longest downward path; a leaf is 0.
    pub(crate) height: i16,
    pub(crate) ch: [Id; 2],
    pub(crate) parent: Id,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Id) -> Self {
        Self {
            key,
            value,
            height: 0,
            ch: [Id::NIL, Id::NIL],
            parent,
        }
    }

    pub(crate) fn num_children(&self) -> usize {
        self.ch.iter().filter(|c| !c.is_nil()).count()
    }

    /// The only child of a node with at most one child, or `NIL` for a leaf.
    pub(crate) fn sole_child(&self) -> Id {
        debug_assert!(self.num_children() <= 1);
        if self.ch[LEFT].is_nil() {
            self.ch[RIGHT]
        } else {
            self.ch[LEFT]
        }
    }
}
