//! the ordered view: an unbalanced binary search tree of keys

use crate::iter::InOrder;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{RangeBounds, RangeFull};

pub(crate) type Link<K> = Option<Box<Node<K>>>;

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }
}

// Only the key. Printing the children would walk the whole subtree.
impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// A binary search tree with no rebalancing.
///
/// Inserting a key that's already present does nothing. Removal uses the textbook three cases: a
/// node with at most one child is replaced by that child, and a node with two children takes its
/// in-order successor's key before the successor's own node is unlinked from the right subtree.
///
/// Sorted input degenerates the tree into a list as tall as its length. Every operation here,
/// including `Clone` and `Drop`, walks the tree with a loop or an explicit stack, so that shape
/// costs time but never call-stack depth.
pub struct SearchTree<K> {
    root: Link<K>,
    len: usize,
}

impl<K: Ord> SearchTree<K> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of nodes on the longest root-to-leaf path. An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(&Node<K>, usize)> = Vec::new();
        pending.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            pending.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            pending.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        tallest
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// Returns `true` if the key was added, `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let link = find_link(&mut self.root, &key);
        if link.is_some() {
            return false;
        }
        *link = Some(Node::leaf(key));
        self.len += 1;
        true
    }

    /// Returns `true` if the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let link = find_link(&mut self.root, key);
        let Some(mut node) = link.take() else {
            return false;
        };
        *link = match (node.left.take(), node.right.take()) {
            (None, right) => right,
            (left, None) => left,
            (Some(left), right) => {
                // Overwrite this node's payload with the successor's, then unlink the successor's
                // original node. It has no left child, so its right child takes its place.
                node.left = Some(left);
                node.right = right;
                let slot = leftmost_link(&mut node.right);
                if let Some(mut successor) = slot.take() {
                    *slot = successor.right.take();
                    node.key = successor.key;
                }
                Some(node)
            }
        };
        self.len -= 1;
        true
    }

    /// All keys in ascending order.
    pub fn iter(&self) -> InOrder<'_, K, RangeFull> {
        InOrder::new(self.root.as_deref(), ..)
    }

    /// Keys within `range`, in ascending order. Subtrees entirely outside the range aren't
    /// visited.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> InOrder<'_, K, R> {
        InOrder::new(self.root.as_deref(), range)
    }
}

impl<K: Ord> Default for SearchTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for SearchTree<K> {
    fn clone(&self) -> Self {
        // Collect nodes root-right-left, so reversed they come out in post-order. Each copy then
        // finds its finished children on top of `built`: right subtree first, left beneath it.
        let mut pending: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        let mut order = Vec::with_capacity(self.len);
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }
        let mut built: Vec<Box<Node<K>>> = Vec::new();
        for node in order.into_iter().rev() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(Node {
                key: node.key.clone(),
                left,
                right,
            }));
        }
        debug_assert!(built.len() <= 1, "clone left {} detached subtrees", built.len());
        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for SearchTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Drop for SearchTree<K> {
    fn drop(&mut self) {
        // The default drop of a `Box` chain recurses once per level.
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

// The link where `key` lives, or the empty link where it would be inserted.
fn find_link<'a, K: Ord>(mut link: &'a mut Link<K>, key: &K) -> &'a mut Link<K> {
    loop {
        let dir = match link.as_deref() {
            Some(node) if *key < node.key => Ordering::Less,
            Some(node) if *key > node.key => Ordering::Greater,
            _ => return link,
        };
        let node = link.as_mut().unwrap();
        link = if dir == Ordering::Less { &mut node.left } else { &mut node.right };
    }
}

// The link holding the smallest node of a non-empty subtree.
fn leftmost_link<K>(mut link: &mut Link<K>) -> &mut Link<K> {
    loop {
        match link.as_deref() {
            Some(node) if node.left.is_some() => {}
            _ => return link,
        }
        link = &mut link.as_mut().unwrap().left;
    }
}
#[cfg(test)]
mod test {
    use super::*;

    fn tree_of(keys: &[u64]) -> SearchTree<u64> {
        let mut tree = SearchTree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    fn keys(tree: &SearchTree<u64>) -> Vec<u64> {
        tree.iter().copied().collect()
    }

    #[test]
    fn test_insert_and_traverse() {
        let tree = tree_of(&[5, 3, 8, 1, 4]);
        assert_eq!(keys(&tree), [1, 3, 4, 5, 8]);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.min(), Some(&1));
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert!(!tree.insert(2));
        assert_eq!(tree.len(), 3);
        assert_eq!(keys(&tree), [1, 2, 3]);
    }

    #[test]
    fn test_remove_two_children() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4]);
        assert!(tree.remove(&3));
        assert_eq!(keys(&tree), [1, 4, 5, 8]);
        assert!(!tree.contains(&3));
        // 4 was promoted into 3's node.
        let root = tree.root.as_deref().unwrap();
        assert_eq!(root.left.as_deref().unwrap().key, 4);
    }

    #[test]
    fn test_remove_root_with_deep_successor() {
        let mut tree = tree_of(&[50, 30, 70, 60, 80, 65, 62]);
        assert!(tree.remove(&50));
        assert_eq!(tree.root.as_deref().unwrap().key, 60);
        assert_eq!(keys(&tree), [30, 60, 62, 65, 70, 80]);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_remove_leaf_and_one_child() {
        let mut tree = tree_of(&[5, 3, 8, 9]);
        assert!(tree.remove(&3));
        assert_eq!(keys(&tree), [5, 8, 9]);
        assert!(tree.remove(&8));
        assert_eq!(keys(&tree), [5, 9]);
        assert!(!tree.remove(&8));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_everything() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        for key in [5, 1, 9, 3, 8, 4, 7] {
            assert!(tree.remove(&key));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.min(), None);
        assert_eq!(keys(&tree), Vec::<u64>::new());
    }

    #[test]
    fn test_sorted_inserts_degenerate() {
        let tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(tree.height(), 6);
        assert_eq!(keys(&tree), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_range() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 35, 45]);
        fn range<R: RangeBounds<u64>>(tree: &SearchTree<u64>, r: R) -> Vec<u64> {
            tree.range(r).copied().collect()
        }
        assert_eq!(range(&tree, 35..=60), [35, 40, 45, 50, 60]);
        assert_eq!(range(&tree, 36..60), [40, 45, 50]);
        assert_eq!(range(&tree, ..30), [20]);
        assert_eq!(range(&tree, 75..), [80]);
        assert!(range(&tree, 81..).is_empty());
    }

    #[test]
    fn test_clone_keeps_shape() {
        let tree = tree_of(&[50, 30, 70, 60, 80, 65, 62]);
        let mut copy = tree.clone();
        assert_eq!(copy.height(), tree.height());
        assert_eq!(copy.root.as_deref().unwrap().key, 50);
        assert_eq!(keys(&copy), keys(&tree));
        // The copy owns its own nodes.
        assert!(copy.remove(&50));
        assert_eq!(keys(&tree), [30, 50, 60, 62, 65, 70, 80]);
        assert_eq!(format!("{tree:?}"), "{30, 50, 60, 62, 65, 70, 80}");
    }

    #[test]
    fn test_long_sorted_chain() {
        const N: u64 = 30_000;
        let mut tree = SearchTree::new();
        for key in 0..N {
            assert!(tree.insert(key));
        }
        assert!(!tree.insert(N - 1));
        assert_eq!(tree.height(), N as usize);
        assert!(tree.contains(&(N - 1)));
        assert!(tree.iter().copied().eq(0..N));
        assert!(tree.range(N - 3..).copied().eq(N - 3..N));

        // One removal at the bottom of the chain, then the rest from the top.
        assert!(tree.remove(&(N - 1)));
        let copy = tree.clone();
        for key in 0..N / 2 {
            assert!(tree.remove(&key));
        }
        assert_eq!(tree.len(), (N / 2 - 1) as usize);
        assert_eq!(tree.min(), Some(&(N / 2)));
        assert_eq!(copy.len(), (N - 1) as usize);
        // Both are dropped here with half a chain and a full chain.
    }
}
