//! the user registry and its derived views

use crate::buckets::BucketIndex;
use crate::config::NetworkConfig;
use crate::iter::{Bucket, Ordered};
use crate::tree::SearchTree;
use crate::{User, UserId};
use hashbrown::HashMap;
use std::num::NonZeroUsize;
use std::ops::{RangeBounds, RangeFull};

/// Users keyed by ID, reachable three ways.
///
/// The hash map owns every `User`. The [`SearchTree`] and [`BucketIndex`] hold IDs only and are
/// updated in the same call as the map, so an ID is present in all three or in none.
///
/// # Example
///
/// ```
/// use socialgraph::{IndexedRegistry, User, UserId};
///
/// let mut registry = IndexedRegistry::new();
/// registry.insert(User::new(5, "Eve", "Oslo"));
/// registry.insert(User::new(2, "Bob", "LA"));
/// assert!(!registry.insert(User::new(2, "Impostor", "??")));
///
/// let names: Vec<&str> = registry.ordered().map(|u| u.name()).collect();
/// assert_eq!(names, ["Bob", "Eve"]);
/// assert_eq!(registry.get(UserId(2)).unwrap().name(), "Bob");
/// ```
#[derive(Clone, Debug)]
pub struct IndexedRegistry {
    users: HashMap<UserId, User>,
    ordered: SearchTree<UserId>,
    buckets: BucketIndex<UserId>,
}

impl IndexedRegistry {
    pub fn new() -> Self {
        Self::with_config(&NetworkConfig::default())
    }

    pub fn with_config(config: &NetworkConfig) -> Self {
        Self::with_buckets(config.bucket_count)
    }

    pub fn with_buckets(bucket_count: NonZeroUsize) -> Self {
        Self {
            users: HashMap::new(),
            ordered: SearchTree::new(),
            buckets: BucketIndex::with_buckets(bucket_count),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.bucket_count()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Mutable access to two different users at once. Returns `None` if either is missing or if
    /// `a == b`.
    pub fn get_pair_mut(&mut self, a: UserId, b: UserId) -> Option<[&mut User; 2]> {
        if a == b {
            return None;
        }
        self.users.get_many_mut([&a, &b])
    }

    /// Register `user`. The first user registered under an ID wins: if the ID is taken, `user` is
    /// dropped and this returns `false`.
    pub fn insert(&mut self, user: User) -> bool {
        let id = user.id();
        if self.users.contains_key(&id) {
            return false;
        }
        self.users.insert(id, user);
        let added = self.ordered.insert(id);
        debug_assert!(added, "ordered view out of sync for {id}");
        self.buckets.insert(id);
        true
    }

    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let user = self.users.remove(&id)?;
        let removed_ordered = self.ordered.remove(&id);
        let removed_bucket = self.buckets.remove(&id);
        debug_assert!(removed_ordered && removed_bucket, "views out of sync for {id}");
        Some(user)
    }

    /// Users in ascending ID order.
    pub fn ordered(&self) -> Ordered<'_, RangeFull> {
        self.ordered_range(..)
    }

    /// Users whose IDs fall in `range`, in ascending ID order.
    pub fn ordered_range<R: RangeBounds<UserId>>(&self, range: R) -> Ordered<'_, R> {
        Ordered {
            ids: self.ordered.range(range),
            users: &self.users,
        }
    }

    /// Users stored in the same bucket as `id`, in registration order. `id` doesn't have to be
    /// registered.
    pub fn bucket_lookup(&self, id: UserId) -> Bucket<'_> {
        Bucket {
            ids: self.buckets.bucket(&id).iter(),
            users: &self.users,
        }
    }

    pub fn bucket_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.sizes()
    }

    /// Depth of the ordered view. Sequential IDs make this equal to `len()`.
    pub fn tree_height(&self) -> usize {
        self.ordered.height()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.users.len(), self.ordered.len());
        assert_eq!(self.users.len(), self.buckets.len());
        for &id in self.users.keys() {
            assert!(self.ordered.contains(&id), "{id} missing from ordered view");
            assert!(self.buckets.contains(&id), "{id} missing from bucket view");
        }
        let ids: Vec<UserId> = self.ordered.iter().copied().collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ordered view not ascending");
    }
}

impl Default for IndexedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ids<'a>(users: impl Iterator<Item = &'a User>) -> Vec<u64> {
        users.map(|u| u.id().get()).collect()
    }

    fn registry_of(raw_ids: &[u64]) -> IndexedRegistry {
        let mut registry = IndexedRegistry::new();
        for &id in raw_ids {
            registry.insert(User::new(id, format!("user{id}"), "somewhere"));
        }
        registry
    }

    #[test]
    fn test_insert_and_lookup() {
        let registry = registry_of(&[5, 3, 8, 1, 4]);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get(UserId(4)).unwrap().name(), "user4");
        assert!(registry.get(UserId(6)).is_none());
        assert_eq!(ids(registry.ordered()), [1, 3, 4, 5, 8]);
        registry.assert_consistent();
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = registry_of(&[1]);
        assert!(!registry.insert(User::new(1, "second", "elsewhere")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(UserId(1)).unwrap().name(), "user1");
        assert_eq!(registry.bucket_lookup(UserId(1)).count(), 1);
        registry.assert_consistent();
    }

    #[test]
    fn test_remove_two_children() {
        let mut registry = registry_of(&[5, 3, 8, 1, 4]);
        let removed = registry.remove(UserId(3)).unwrap();
        assert_eq!(removed.name(), "user3");
        assert_eq!(ids(registry.ordered()), [1, 4, 5, 8]);
        assert!(registry.get(UserId(3)).is_none());
        assert!(registry.remove(UserId(3)).is_none());
        registry.assert_consistent();
    }

    #[test]
    fn test_bucket_lookup() {
        let mut registry = registry_of(&[1, 11, 2, 21]);
        assert_eq!(ids(registry.bucket_lookup(UserId(1))), [1, 11, 21]);
        assert_eq!(ids(registry.bucket_lookup(UserId(31))), [1, 11, 21]);
        assert_eq!(ids(registry.bucket_lookup(UserId(2))), [2]);

        registry.remove(UserId(11));
        assert_eq!(ids(registry.bucket_lookup(UserId(1))), [1, 21]);
        assert_eq!(registry.bucket_sizes().sum::<usize>(), 3);
    }

    #[test]
    fn test_custom_bucket_count() {
        let mut registry = IndexedRegistry::with_buckets(NonZeroUsize::new(3).unwrap());
        for id in [0, 3, 4, 7] {
            registry.insert(User::new(id, "", ""));
        }
        assert_eq!(registry.bucket_count(), 3);
        assert_eq!(ids(registry.bucket_lookup(UserId(6))), [0, 3]);
        assert_eq!(ids(registry.bucket_lookup(UserId(1))), [4, 7]);
        assert_eq!(registry.bucket_sizes().collect::<Vec<_>>(), [2, 2, 0]);
    }

    #[test]
    fn test_ordered_range() {
        let registry = registry_of(&[10, 5, 20, 15, 25, 1]);
        assert_eq!(ids(registry.ordered_range(UserId(5)..UserId(20))), [5, 10, 15]);
        assert_eq!(ids(registry.ordered_range(UserId(16)..)), [20, 25]);
        assert_eq!(ids(registry.ordered_range(..=UserId(1))), [1]);
    }

    #[test]
    fn test_pair_mut() {
        let mut registry = registry_of(&[1, 2]);
        let [a, b] = registry.get_pair_mut(UserId(1), UserId(2)).unwrap();
        a.add_like();
        b.add_friend(UserId(1));
        assert!(registry.get_pair_mut(UserId(1), UserId(1)).is_none());
        assert!(registry.get_pair_mut(UserId(1), UserId(3)).is_none());
        assert_eq!(registry.get(UserId(1)).unwrap().like_count(), 1);
    }

    #[test]
    fn test_random_insert_remove() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut registry = IndexedRegistry::new();
        let mut expected = std::collections::BTreeSet::new();
        for _ in 0..2000 {
            let id = rng.random_range(0..200u64);
            if rng.random_bool(0.6) {
                assert_eq!(registry.insert(User::new(id, "", "")), expected.insert(id));
            } else {
                assert_eq!(registry.remove(UserId(id)).is_some(), expected.remove(&id));
            }
            // Lookups always reflect the last operation on that ID.
            assert_eq!(registry.contains(UserId(id)), expected.contains(&id));
        }
        assert_eq!(ids(registry.ordered()), expected.into_iter().collect::<Vec<_>>());
        registry.assert_consistent();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "view holds unregistered 3")]
    fn test_drifted_ordered_view_panics() {
        let mut registry = registry_of(&[1, 3, 5]);
        registry.users.remove(&UserId(3));
        let _ = ids(registry.ordered());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "view holds unregistered 11")]
    fn test_drifted_bucket_panics() {
        let mut registry = registry_of(&[1, 11]);
        registry.users.remove(&UserId(11));
        let _ = ids(registry.bucket_lookup(UserId(1)));
    }
}
