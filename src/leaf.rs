use crate::node::Node;
use std::{borrow::Borrow, iter, sync::Arc};

/// Key-value entry, possibly heading a chain of entries whose hashes
/// collide on every trie level.
///
/// Chains are persistent: rebuilding one copies the links in front of the
/// touched entry and shares the rest.
#[derive(Debug)]
pub struct Leaf<K, V> {
    hash: u32,
    key: K,
    value: V,
    next: Option<Arc<Leaf<K, V>>>,
}

impl<K, V> Leaf<K, V> {
    pub fn new(hash: u32, key: K, value: V) -> Self {
        Self {
            hash,
            key,
            value,
            next: None,
        }
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |leaf| leaf.next.as_deref())
    }

    pub fn find<Q: Eq + ?Sized>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
    {
        self.iter().find(|leaf| leaf.key.borrow() == key)
    }
}

impl<K: Clone, V: Clone> Leaf<K, V> {
    /// Inserts or replaces an entry of a mixed hash `hash`, returning the new
    /// chain head and whether the key was new.
    pub fn with_upserted(self: &Arc<Self>, hash: u32, key: K, value: V) -> (Arc<Self>, bool)
    where
        K: Eq,
    {
        let mut prefix = Vec::new();

        for leaf in self.iter() {
            if leaf.key == key {
                let replaced = Self {
                    hash,
                    key,
                    value,
                    next: leaf.next.clone(),
                };

                return (Self::relink(prefix, replaced.into()), false);
            }

            prefix.push(leaf);
        }

        (
            Self {
                hash,
                key,
                value,
                next: Some(self.clone()),
            }
            .into(),
            true,
        )
    }

    /// Splices an entry out of a chain. Returns `None` if the key is absent.
    pub fn with_removed<Q: Eq + ?Sized>(self: &Arc<Self>, key: &Q) -> Option<Node<K, V>>
    where
        K: Borrow<Q>,
    {
        let mut prefix = Vec::new();

        for leaf in self.iter() {
            if leaf.key.borrow() == key {
                return Some(match &leaf.next {
                    Some(next) => Node::Leaf(Self::relink(prefix, next.clone())),
                    None => match prefix.pop() {
                        Some(last) => Node::Leaf(Self::relink(prefix, last.unlinked().into())),
                        None => Node::Empty,
                    },
                });
            }

            prefix.push(leaf);
        }

        None
    }

    fn relink(prefix: Vec<&Self>, tail: Arc<Self>) -> Arc<Self> {
        prefix.into_iter().rev().fold(tail, |next, leaf| {
            Self {
                hash: leaf.hash,
                key: leaf.key.clone(),
                value: leaf.value.clone(),
                next: Some(next),
            }
            .into()
        })
    }

    fn unlinked(&self) -> Self {
        Self::new(self.hash, self.key.clone(), self.value.clone())
    }
}

// Chains can grow long under colliding hashes, so links are released in a
// loop instead of through nested drop glue.
impl<K, V> Drop for Leaf<K, V> {
    fn drop(&mut self) {
        let mut next = self.next.take();

        while let Some(leaf) = next {
            next = match Arc::try_unwrap(leaf) {
                Ok(mut leaf) => leaf.next.take(),
                Err(_) => None,
            };
        }
    }
}
