use crate::{
    error::Result,
    hamt::{find, insert_root, remove_root},
    node::Node,
    utilities::hash_key,
};
use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
};

#[cfg(test)]
use crate::indirection::Indirection;

/// Hasher builder used by maps unless another one is given.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// Map data structure of HAMT.
///
/// Note that every method does not modify the original map but creates a new
/// one if necessary. Maps share unchanged sub-trees with each other, so
/// cloning one is cheap and older versions stay valid after updates.
pub struct Map<K, V, S = DefaultHashBuilder> {
    size: usize,
    root: Node<K, V>,
    build_hasher: S,
}

impl<K, V> Map<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V, S> Map<K, V, S> {
    /// Creates an empty map hashing keys with `build_hasher`.
    pub fn with_hasher(build_hasher: S) -> Self {
        Self {
            size: 0,
            root: Node::Empty,
            build_hasher,
        }
    }

    /// Wraps an existing trie.
    #[cfg(test)]
    pub(crate) fn from_root(root: Indirection<K, V>, build_hasher: S) -> Self {
        let root = Node::from(root);

        Self {
            size: root.entry_count(),
            root,
            build_hasher,
        }
    }

    /// Returns a number of entries in a map.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if a map has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the hasher builder of a map.
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Map<K, V, S> {
    #[cfg(test)]
    pub(crate) fn is_normal(&self) -> bool {
        self.root.is_normal(0, 0)
            && self
                .root
                .has_hashes(&|key| hash_key(&self.build_hasher, key))
    }

    /// Finds a value corresponding to a key.
    pub fn get<Q: Hash + Eq + ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
    {
        find(&self.root, key, hash_key(&self.build_hasher, key), 0)
    }

    /// Checks if a key is contained in a map.
    pub fn contains_key<Q: Hash + Eq + ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        self.get(key).is_some()
    }
}

impl<K: Clone + Hash + Eq, V: Clone, S: BuildHasher + Clone> Map<K, V, S> {
    /// Inserts a key-value pair into a map, replacing the value of an
    /// existing key.
    ///
    /// # Errors
    ///
    /// Fails if the trie of a map is found to be corrupted. The original map
    /// is unaffected either way.
    #[must_use = "updates return a new map"]
    pub fn put(&self, key: K, value: V) -> Result<Self> {
        let hash = hash_key(&self.build_hasher, &key);
        let (root, added) = insert_root(&self.root, key, value, hash)?;

        Ok(Self {
            size: self.size + added as usize,
            root,
            build_hasher: self.build_hasher.clone(),
        })
    }

    /// Removes a key from a map if any.
    ///
    /// # Errors
    ///
    /// Fails if the trie of a map is found to be corrupted.
    #[must_use = "updates return a new map"]
    pub fn remove<Q: Hash + Eq + ?Sized>(&self, key: &Q) -> Result<Self>
    where
        K: Borrow<Q>,
    {
        let hash = hash_key(&self.build_hasher, key);

        Ok(match remove_root(&self.root, key, hash)? {
            Some(root) => Self {
                size: self.size - 1,
                root,
                build_hasher: self.build_hasher.clone(),
            },
            None => self.clone(),
        })
    }

    /// Extends a map with an iterator of key-value pairs.
    ///
    /// # Errors
    ///
    /// Stops at the first failed insertion.
    #[must_use = "updates return a new map"]
    pub fn extend(&self, iterator: impl IntoIterator<Item = (K, V)>) -> Result<Self> {
        let mut map = self.clone();

        for (key, value) in iterator {
            map = map.put(key, value)?;
        }

        Ok(map)
    }
}

impl<K, V, S: Clone> Clone for Map<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            root: self.root.clone(),
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<K, V, S: Default> Default for Map<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for Map<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("len", &self.size)
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for Map<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .root
                .all(&mut |key, value| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for Map<K, V, S> {}
