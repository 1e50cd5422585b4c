use crate::{bitmap::Bitmap, error::Error, node::Node};

/// Branching node storing one child per set bit of its bitmap.
///
/// Children are packed in ascending chunk order, so the child of chunk `i`
/// lives at the number of bits set below `i`. Every `with_*` method builds
/// a new node and leaves the receiver as it was, which lets older maps keep
/// sharing it.
#[derive(Debug)]
pub struct Indirection<K, V> {
    bitmap: Bitmap,
    children: Vec<Node<K, V>>,
}

impl<K, V> Default for Indirection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Indirection<K, V> {
    pub const fn new() -> Self {
        Self {
            bitmap: Bitmap::new(),
            children: Vec::new(),
        }
    }

    /// Builds a node from raw parts without checking their consistency.
    #[cfg(test)]
    pub fn from_parts(bitmap: Bitmap, children: Vec<Node<K, V>>) -> Self {
        Self { bitmap, children }
    }

    #[cfg(test)]
    pub fn bitmap(&self) -> Bitmap {
        self.bitmap
    }

    pub fn children(&self) -> &[Node<K, V>] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    pub fn contains_chunk(&self, chunk: u8) -> bool {
        self.bitmap.get(chunk)
    }

    /// Returns the position of a chunk in the child sequence.
    ///
    /// With `must_exist`, an unset chunk yields `None`. Otherwise the
    /// position a new child for the chunk would take is returned.
    pub fn index_for(&self, chunk: u8, must_exist: bool) -> Option<usize> {
        if must_exist && !self.contains_chunk(chunk) {
            None
        } else {
            Some(self.bitmap.index(chunk))
        }
    }

    pub fn child_at(&self, chunk: u8) -> Option<&Node<K, V>> {
        self.children.get(self.index_for(chunk, true)?)
    }

    /// Looks up the child of a chunk, failing if the bitmap claims a child the
    /// sequence does not hold.
    pub fn checked_child_at(&self, chunk: u8) -> Result<Option<&Node<K, V>>, Error> {
        if self.contains_chunk(chunk) {
            Ok(Some(&self.children[self.existing_index(chunk)?]))
        } else {
            Ok(None)
        }
    }

    pub fn with_inserted(&self, chunk: u8, child: Node<K, V>) -> Result<Self, Error> {
        let index = self.bitmap.index(chunk);

        if self.contains_chunk(chunk) || index > self.children.len() {
            return Err(self.invalid_index(chunk, index));
        }

        let mut children = Vec::with_capacity(self.bitmap.size() + 1);
        children.extend_from_slice(&self.children[..index]);
        children.push(child);
        children.extend_from_slice(&self.children[index..]);

        Ok(Self {
            bitmap: self.bitmap.set(chunk),
            children,
        })
    }

    pub fn with_replaced(&self, chunk: u8, child: Node<K, V>) -> Result<Self, Error> {
        let index = self.existing_index(chunk)?;
        let mut children = self.children.clone();

        children[index] = child;

        Ok(Self {
            bitmap: self.bitmap,
            children,
        })
    }

    /// Drops the child of a chunk. A node left without children collapses
    /// into `Node::Empty`.
    pub fn with_removed(&self, chunk: u8) -> Result<Node<K, V>, Error> {
        let index = self.existing_index(chunk)?;
        let bitmap = self.bitmap.unset(chunk);

        if bitmap.is_empty() {
            return Ok(Node::Empty);
        }

        let mut children = Vec::with_capacity(self.children.len() - 1);
        children.extend_from_slice(&self.children[..index]);
        children.extend_from_slice(&self.children[index + 1..]);

        Ok(Self { bitmap, children }.into())
    }

    fn existing_index(&self, chunk: u8) -> Result<usize, Error> {
        let index = self.bitmap.index(chunk);

        if self.contains_chunk(chunk) && index < self.children.len() {
            Ok(index)
        } else {
            Err(self.invalid_index(chunk, index))
        }
    }

    fn invalid_index(&self, chunk: u8, index: usize) -> Error {
        Error::InvalidIndex {
            chunk,
            index,
            len: self.children.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::Leaf;

    fn leaf(key: u8) -> Node<u8, u8> {
        Leaf::new(key.into(), key, key).into()
    }

    fn key_at(indirection: &Indirection<u8, u8>, chunk: u8) -> Option<u8> {
        match indirection.child_at(chunk)? {
            Node::Leaf(leaf) => Some(*leaf.key()),
            _ => None,
        }
    }

    #[test]
    fn new() {
        let indirection = Indirection::<u8, u8>::new();

        assert!(indirection.is_empty());
        assert!(indirection.children().is_empty());
    }

    #[test]
    fn index_for() {
        let indirection = Indirection::new()
            .with_inserted(3, leaf(3))
            .unwrap()
            .with_inserted(10, leaf(10))
            .unwrap();

        assert_eq!(indirection.index_for(3, true), Some(0));
        assert_eq!(indirection.index_for(10, true), Some(1));
        assert_eq!(indirection.index_for(5, true), None);
        assert_eq!(indirection.index_for(0, false), Some(0));
        assert_eq!(indirection.index_for(5, false), Some(1));
        assert_eq!(indirection.index_for(31, false), Some(2));
    }

    #[test]
    fn insert_keeps_chunk_order() {
        let indirection = Indirection::new()
            .with_inserted(20, leaf(20))
            .unwrap()
            .with_inserted(2, leaf(2))
            .unwrap()
            .with_inserted(31, leaf(31))
            .unwrap()
            .with_inserted(7, leaf(7))
            .unwrap();

        assert_eq!(indirection.bitmap().size(), 4);

        let keys = indirection
            .children()
            .iter()
            .map(|child| match child {
                Node::Leaf(leaf) => *leaf.key(),
                _ => unreachable!(),
            })
            .collect::<Vec<_>>();

        assert_eq!(keys, vec![2, 7, 20, 31]);

        for chunk in [2, 7, 20, 31] {
            assert!(indirection.contains_chunk(chunk));
            assert_eq!(key_at(&indirection, chunk), Some(chunk));
        }

        assert_eq!(key_at(&indirection, 0), None);
    }

    #[test]
    fn insert_occupied_chunk() {
        let indirection = Indirection::new().with_inserted(4, leaf(4)).unwrap();

        assert_eq!(
            indirection.with_inserted(4, leaf(5)).unwrap_err(),
            Error::InvalidIndex {
                chunk: 4,
                index: 0,
                len: 1
            }
        );
    }

    #[test]
    fn insert_does_not_modify_receiver() {
        let indirection = Indirection::new().with_inserted(4, leaf(4)).unwrap();
        let other = indirection.with_inserted(1, leaf(1)).unwrap();

        assert_eq!(indirection.children().len(), 1);
        assert!(!indirection.contains_chunk(1));
        assert_eq!(other.children().len(), 2);
    }

    #[test]
    fn replace() {
        let indirection = Indirection::new()
            .with_inserted(1, leaf(1))
            .unwrap()
            .with_inserted(2, leaf(2))
            .unwrap();
        let other = indirection.with_replaced(2, leaf(42)).unwrap();

        assert_eq!(key_at(&indirection, 2), Some(2));
        assert_eq!(key_at(&other, 2), Some(42));
        assert_eq!(key_at(&other, 1), Some(1));
        assert_eq!(other.bitmap(), indirection.bitmap());
    }

    #[test]
    fn replace_missing_chunk() {
        let indirection = Indirection::new().with_inserted(1, leaf(1)).unwrap();

        assert_eq!(
            indirection.with_replaced(2, leaf(2)).unwrap_err(),
            Error::InvalidIndex {
                chunk: 2,
                index: 1,
                len: 1
            }
        );
    }

    #[test]
    fn remove() {
        let indirection = Indirection::new()
            .with_inserted(1, leaf(1))
            .unwrap()
            .with_inserted(2, leaf(2))
            .unwrap();

        match indirection.with_removed(1).unwrap() {
            Node::Indirection(other) => {
                assert!(!other.contains_chunk(1));
                assert_eq!(key_at(&other, 2), Some(2));
                assert_eq!(other.children().len(), 1);
            }
            node => panic!("unexpected node: {:?}", node),
        }

        assert_eq!(indirection.children().len(), 2);
    }

    #[test]
    fn remove_last_child() {
        let indirection = Indirection::new().with_inserted(1, leaf(1)).unwrap();

        assert!(indirection.with_removed(1).unwrap().is_empty());
    }

    #[test]
    fn remove_missing_chunk() {
        let indirection = Indirection::new().with_inserted(1, leaf(1)).unwrap();

        assert!(indirection.with_removed(0).is_err());
    }

    #[test]
    fn detect_short_child_sequence() {
        let indirection =
            Indirection::from_parts(Bitmap::new().set(0).set(1), vec![leaf(0)]);

        assert_eq!(indirection.child_at(1).map(Node::kind), None);
        assert!(indirection.checked_child_at(1).is_err());
        assert_eq!(
            indirection
                .checked_child_at(0)
                .unwrap()
                .map(Node::kind),
            Some("leaf")
        );
        assert!(indirection.checked_child_at(2).unwrap().is_none());
        assert_eq!(
            indirection.with_replaced(1, leaf(1)).unwrap_err(),
            Error::InvalidIndex {
                chunk: 1,
                index: 1,
                len: 1
            }
        );
        assert!(indirection.with_removed(1).is_err());
        assert!(indirection.with_inserted(2, leaf(2)).is_err());
    }
}
