//! iterator types

use crate::tree::Node;
use crate::{User, UserId};
use std::ops::{Bound, RangeBounds};

/// An in-order walk over a [`SearchTree`](crate::tree::SearchTree), limited to a range of keys.
/// Returned by [`iter`](crate::tree::SearchTree::iter) and
/// [`range`](crate::tree::SearchTree::range).
#[derive(Clone, Debug)]
pub struct InOrder<'tree, K, R> {
    // Nodes whose left subtree has been pushed but which haven't been yielded yet. The top of the
    // stack is always the next key.
    stack: Vec<&'tree Node<K>>,
    range: R,
}

impl<'tree, K: Ord, R: RangeBounds<K>> InOrder<'tree, K, R> {
    pub(crate) fn new(root: Option<&'tree Node<K>>, range: R) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            range,
        };
        iter.push_left_spine(root);
        iter
    }

    fn below_start(&self, key: &K) -> bool {
        match self.range.start_bound() {
            Bound::Included(start) => key < start,
            Bound::Excluded(start) => key <= start,
            Bound::Unbounded => false,
        }
    }

    fn past_end(&self, key: &K) -> bool {
        match self.range.end_bound() {
            Bound::Included(end) => key > end,
            Bound::Excluded(end) => key >= end,
            Bound::Unbounded => false,
        }
    }

    fn push_left_spine(&mut self, mut link: Option<&'tree Node<K>>) {
        while let Some(node) = link {
            if self.below_start(&node.key) {
                // Everything to the left is smaller still.
                link = node.right.as_deref();
            } else {
                self.stack.push(node);
                link = node.left.as_deref();
            }
        }
    }
}

impl<'tree, K: Ord, R: RangeBounds<K>> Iterator for InOrder<'tree, K, R> {
    type Item = &'tree K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if self.past_end(&node.key) {
            self.stack.clear();
            return None;
        }
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

// The views only ever hold registered IDs. A miss means they've drifted from the map; release
// builds skip the ID.
fn lookup<'registry>(
    users: &'registry hashbrown::HashMap<UserId, User>,
    id: &UserId,
) -> Option<&'registry User> {
    let user = users.get(id);
    debug_assert!(user.is_some(), "view holds unregistered {id}");
    user
}

/// An iterator over `&User` in ascending ID order. Returned by
/// [`ordered`](crate::IndexedRegistry::ordered) and
/// [`ordered_range`](crate::IndexedRegistry::ordered_range).
#[derive(Clone, Debug)]
pub struct Ordered<'registry, R> {
    pub(crate) ids: InOrder<'registry, UserId, R>,
    pub(crate) users: &'registry hashbrown::HashMap<UserId, User>,
}

impl<'registry, R: RangeBounds<UserId>> Iterator for Ordered<'registry, R> {
    type Item = &'registry User;

    fn next(&mut self) -> Option<Self::Item> {
        let users = self.users;
        self.ids.find_map(|id| lookup(users, id))
    }
}

/// An iterator over the `&User`s sharing one bucket. Returned by
/// [`bucket_lookup`](crate::IndexedRegistry::bucket_lookup).
#[derive(Clone, Debug)]
pub struct Bucket<'registry> {
    pub(crate) ids: std::slice::Iter<'registry, UserId>,
    pub(crate) users: &'registry hashbrown::HashMap<UserId, User>,
}

impl<'registry> Iterator for Bucket<'registry> {
    type Item = &'registry User;

    fn next(&mut self) -> Option<Self::Item> {
        let users = self.users;
        self.ids.find_map(|id| lookup(users, id))
    }
}
