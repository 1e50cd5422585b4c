use crate::{indirection::Indirection, leaf::Leaf};
use std::sync::Arc;

#[cfg(test)]
use crate::utilities::{BITS_PER_LEVEL, MAX_DEPTH};

/// Trie node.
///
/// Children of an indirection are never `Empty`. `Empty` only stands for a
/// whole trie without entries or for the result of removing the last entry
/// of a subtree.
#[derive(Debug)]
pub enum Node<K, V> {
    Empty,
    Leaf(Arc<Leaf<K, V>>),
    Indirection(Arc<Indirection<K, V>>),
}

impl<K, V> Node<K, V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Empty => "empty",
            Node::Leaf(_) => "leaf",
            Node::Indirection(_) => "indirection",
        }
    }

    /// Tests a predicate against every entry of a subtree until it fails.
    pub fn all<P: FnMut(&K, &V) -> bool>(&self, predicate: &mut P) -> bool {
        match self {
            Node::Empty => true,
            Node::Leaf(leaf) => leaf
                .iter()
                .all(|leaf| predicate(leaf.key(), leaf.value())),
            Node::Indirection(indirection) => {
                for child in indirection.children() {
                    if !child.all(predicate) {
                        return false;
                    }
                }

                true
            }
        }
    }

    #[cfg(test)]
    pub fn entry_count(&self) -> usize {
        let mut count = 0;

        self.all(&mut |_, _| {
            count += 1;
            true
        });

        count
    }
}

// Nodes hold only reference-counted pointers, so cloning needs no bounds on
// keys or values.
impl<K, V> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        match self {
            Node::Empty => Node::Empty,
            Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
            Node::Indirection(indirection) => Node::Indirection(indirection.clone()),
        }
    }
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Node::Empty
    }
}

impl<K, V> From<Leaf<K, V>> for Node<K, V> {
    fn from(leaf: Leaf<K, V>) -> Self {
        Node::Leaf(leaf.into())
    }
}

impl<K, V> From<Indirection<K, V>> for Node<K, V> {
    fn from(indirection: Indirection<K, V>) -> Self {
        if indirection.is_empty() {
            Node::Empty
        } else {
            Node::Indirection(indirection.into())
        }
    }
}

#[cfg(test)]
impl<K: Eq, V> Node<K, V> {
    /// Checks the structural invariants of a subtree found at `level` below
    /// the branch chunks packed into `path`.
    pub fn is_normal(&self, path: u32, level: usize) -> bool {
        match self {
            Node::Empty => level == 0,
            Node::Leaf(leaf) => {
                let mask = (1 << (level * BITS_PER_LEVEL)) - 1;
                let chain = leaf.iter().collect::<Vec<_>>();

                (chain.len() == 1 || level == MAX_DEPTH)
                    && chain.iter().all(|leaf| leaf.hash() & mask == path)
                    && chain.iter().enumerate().all(|(index, leaf)| {
                        chain[index + 1..]
                            .iter()
                            .all(|other| leaf.key() != other.key())
                    })
            }
            Node::Indirection(indirection) => {
                let bitmap = indirection.bitmap();

                level < MAX_DEPTH
                    && !bitmap.is_empty()
                    && bitmap.size() == indirection.children().len()
                    && (0..32).filter(|&chunk| bitmap.get(chunk)).all(|chunk| {
                        indirection.child_at(chunk).is_some_and(|child| {
                            !child.is_empty()
                                && child.is_normal(
                                    path | (u32::from(chunk) << (level * BITS_PER_LEVEL)),
                                    level + 1,
                                )
                        })
                    })
            }
        }
    }

    /// Checks that every leaf caches the hash `hash` gives for its key.
    pub fn has_hashes<F: Fn(&K) -> u32>(&self, hash: &F) -> bool {
        match self {
            Node::Empty => true,
            Node::Leaf(leaf) => leaf.iter().all(|leaf| leaf.hash() == hash(leaf.key())),
            Node::Indirection(indirection) => indirection
                .children()
                .iter()
                .all(|child| child.has_hashes(hash)),
        }
    }
}
