//! Persistent HAMT map whose versions can be shared over threads.
//!
//! Hash-Array Mapped Trie (HAMT) is a data structure popular as a map (a.k.a.
//! associative array or dictionary). Its immutable variant shares unchanged
//! sub-trees between versions, so every update returns a new map in time
//! proportional to the depth of the trie while the old map stays valid.
//!
//! Branch nodes store only their occupied children, indexed through a
//! 32-bit bitmap. Keys whose hashes collide on every trie level are kept in
//! a chain of leaves at the bottom of the trie.
//!
//! ```
//! use hamt_map::Map;
//!
//! let map = Map::new().put("foo", 1)?;
//! let other = map.put("foo", 2)?;
//!
//! assert_eq!(map.get("foo"), Some(&1));
//! assert_eq!(other.get("foo"), Some(&2));
//! assert!(other.remove("foo")?.is_empty());
//! # Ok::<(), hamt_map::Error>(())
//! ```

mod bitmap;
mod error;
mod hamt;
mod indirection;
mod leaf;
mod map;
mod node;
mod utilities;

#[cfg(test)]
mod proptests;

pub use error::{Error, Result};
pub use map::{DefaultHashBuilder, Map};
