//! Recursive trie algorithms.
//!
//! Every mutation rebuilds the indirections on the path from the root to the
//! touched leaf and shares all other subtrees with the previous trie.

use crate::{
    error::Error,
    indirection::Indirection,
    leaf::Leaf,
    node::Node,
    utilities::{chunk, MAX_DEPTH},
};
use std::{borrow::Borrow, sync::Arc};

pub fn find<'a, K, V, Q>(node: &'a Node<K, V>, key: &Q, hash: u32, level: usize) -> Option<&'a V>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match node {
        Node::Empty => None,
        Node::Leaf(leaf) => leaf.find(key).map(Leaf::value),
        Node::Indirection(indirection) => {
            if level >= MAX_DEPTH {
                return None;
            }

            find(
                indirection.child_at(chunk(hash, level))?,
                key,
                hash,
                level + 1,
            )
        }
    }
}

/// Inserts an entry into a root node, returning the new root and whether the
/// key was new.
pub fn insert_root<K: Clone + Eq, V: Clone>(
    root: &Node<K, V>,
    key: K,
    value: V,
    hash: u32,
) -> Result<(Node<K, V>, bool), Error> {
    match root {
        Node::Empty => insert(&Indirection::new(), key, value, hash, 0),
        Node::Indirection(root) => insert(root, key, value, hash, 0),
        Node::Leaf(_) => Err(unexpected(root, 0)),
    }
}

/// Removes an entry from a root node. `Ok(None)` means the key is absent.
pub fn remove_root<K: Clone, V: Clone, Q: Eq + ?Sized>(
    root: &Node<K, V>,
    key: &Q,
    hash: u32,
) -> Result<Option<Node<K, V>>, Error>
where
    K: Borrow<Q>,
{
    match root {
        Node::Empty => Ok(None),
        Node::Indirection(root) => remove(root, key, hash, 0),
        Node::Leaf(_) => Err(unexpected(root, 0)),
    }
}

fn insert<K: Clone + Eq, V: Clone>(
    parent: &Indirection<K, V>,
    key: K,
    value: V,
    hash: u32,
    level: usize,
) -> Result<(Node<K, V>, bool), Error> {
    let chunk = chunk(hash, level);

    let (child, added) = match parent.checked_child_at(chunk)? {
        None => {
            let leaf = Leaf::new(hash, key, value);

            return Ok((parent.with_inserted(chunk, leaf.into())?.into(), true));
        }
        Some(Node::Indirection(child)) if level + 1 < MAX_DEPTH => {
            insert(child, key, value, hash, level + 1)?
        }
        Some(Node::Leaf(leaf)) => {
            if level == MAX_DEPTH - 1 || leaf.key() == &key {
                let (leaf, added) = leaf.with_upserted(hash, key, value);

                (Node::Leaf(leaf), added)
            } else {
                (fork(leaf, key, value, hash, level + 1)?, true)
            }
        }
        Some(node) => return Err(unexpected(node, level + 1)),
    };

    Ok((splice(parent, chunk, child)?, added))
}

/// Pushes an existing leaf one level down into a fresh indirection and
/// inserts the new entry next to it.
fn fork<K: Clone + Eq, V: Clone>(
    leaf: &Arc<Leaf<K, V>>,
    key: K,
    value: V,
    hash: u32,
    level: usize,
) -> Result<Node<K, V>, Error> {
    let branch =
        Indirection::new().with_inserted(chunk(leaf.hash(), level), Node::Leaf(leaf.clone()))?;

    Ok(insert(&branch, key, value, hash, level)?.0)
}

fn remove<K: Clone, V: Clone, Q: Eq + ?Sized>(
    parent: &Indirection<K, V>,
    key: &Q,
    hash: u32,
    level: usize,
) -> Result<Option<Node<K, V>>, Error>
where
    K: Borrow<Q>,
{
    let chunk = chunk(hash, level);

    let child = match parent.checked_child_at(chunk)? {
        None => return Ok(None),
        Some(Node::Indirection(child)) if level + 1 < MAX_DEPTH => {
            remove(child, key, hash, level + 1)?
        }
        Some(Node::Leaf(leaf)) => leaf.with_removed(key),
        Some(node) => return Err(unexpected(node, level + 1)),
    };

    child.map(|child| splice(parent, chunk, child)).transpose()
}

/// Installs a new child for a chunk, or drops the chunk if the child became
/// empty.
fn splice<K, V>(
    parent: &Indirection<K, V>,
    chunk: u8,
    child: Node<K, V>,
) -> Result<Node<K, V>, Error> {
    if child.is_empty() {
        parent.with_removed(chunk)
    } else {
        Ok(parent.with_replaced(chunk, child)?.into())
    }
}

fn unexpected<K, V>(node: &Node<K, V>, level: usize) -> Error {
    Error::UnexpectedNode {
        level,
        kind: node.kind(),
    }
}
