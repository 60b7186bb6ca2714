//! Ordered map backed by an AVL tree.
//!
//! [`OrderedMap`] keeps its keys unique and sorted. Every insert and remove
//! rebalances on the way back up to the root, so lookups, inserts and removes
//! are `O(log n)` and the tree height stays below `1.44 * log2(n + 2)`.
//!
//! The key and value types default to `String` and `u64`.
//!
//! ```
//! use ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! for (i, key) in ["c", "a", "d", "b"].into_iter().enumerate() {
//!     assert!(map.insert(key.to_string(), i as u64));
//! }
//! assert!(!map.insert("a".to_string(), 99));
//! assert_eq!(map.get("a"), Some(&1));
//!
//! let values: Vec<u64> = map.range("b", "c").copied().collect();
//! assert_eq!(values, [3, 0]);
//!
//! assert!(map.remove("c"));
//! assert_eq!(map.len(), 3);
//! ```

mod balance;
mod check;
mod display;
mod iter;
mod locate;
mod map;
mod node;

pub use check::InvariantError;
pub use iter::{Iter, Keys, Range, RangeValues, Values};
pub use map::OrderedMap;
