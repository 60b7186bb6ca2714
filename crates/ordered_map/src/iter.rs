use std::borrow::Borrow;
use std::iter::FusedIterator;

use crate::map::OrderedMap;
use crate::node::{Id, LEFT, RIGHT};

/// In-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    front: Id,
    back: Id,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let map = self.map;
        let x = self.front;
        self.front = map.neighbor(x, RIGHT);
        self.remaining -= 1;
        Some(map.entry_at(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let map = self.map;
        let x = self.back;
        self.back = map.neighbor(x, LEFT);
        self.remaining -= 1;
        Some(map.entry_at(x))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Entries with keys in a closed interval, ascending.
///
/// `front` and `back` are the first and last nodes still to be yielded;
/// both become `NIL` once they cross.
pub struct Range<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    front: Id,
    back: Id,
}

impl<K, V> Range<'_, K, V> {
    fn pop(&mut self, dir: usize) -> Option<Id> {
        let x = if dir == RIGHT { self.front } else { self.back };
        if x.is_nil() {
            return None;
        }
        if self.front == self.back {
            self.front = Id::NIL;
            self.back = Id::NIL;
        } else if dir == RIGHT {
            self.front = self.map.neighbor(x, RIGHT);
        } else {
            self.back = self.map.neighbor(x, LEFT);
        }
        Some(x)
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.pop(RIGHT).map(|x| map.entry_at(x))
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.pop(LEFT).map(|x| map.entry_at(x))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

/// Values of a [`Range`].
pub struct RangeValues<'a, K, V>(Range<'a, K, V>);

impl<'a, K, V> Iterator for RangeValues<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }
}

impl<K, V> DoubleEndedIterator for RangeValues<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, v)| v)
    }
}

impl<K, V> OrderedMap<K, V> {
    pub fn iter(&self) -> Iter<'_, K, V> {
        let (front, back) = if self.root.is_nil() {
            (Id::NIL, Id::NIL)
        } else {
            (self.extreme(self.root, LEFT), self.extreme(self.root, RIGHT))
        };
        Iter {
            map: self,
            front,
            back,
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Entries with `low <= key <= high`. Empty when `low > high`.
    pub fn range_entries<Q>(&self, low: &Q, high: &Q) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let front = self.ceil(low);
        let back = self.floor(high);
        let empty = front.is_nil()
            || back.is_nil()
            || self.node(front).key > self.node(back).key;
        let (front, back) = if empty {
            (Id::NIL, Id::NIL)
        } else {
            (front, back)
        };
        Range {
            map: self,
            front,
            back,
        }
    }

    /// Values whose key lies in `[low, high]`, ascending by key.
    pub fn range<Q>(&self, low: &Q, high: &Q) -> RangeValues<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        RangeValues(self.range_entries(low, high))
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
