//! the bucketed view: a fixed-size chained hash table of keys

use crate::id::BuildIdHasher;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

/// A hash table with a fixed number of buckets and no rehashing.
///
/// A key goes in bucket `hash(key) % bucket_count`. Colliding keys are appended to the bucket's
/// list, so lookups within a bucket are linear. This type doesn't check for duplicates; callers
/// that need set semantics check before inserting.
#[derive(Clone, Debug)]
pub struct BucketIndex<K, S = BuildIdHasher> {
    buckets: Vec<Vec<K>>,
    hasher: S,
}

impl<K: Hash + Eq, S: BuildHasher + Default> BucketIndex<K, S> {
    pub fn with_buckets(bucket_count: NonZeroUsize) -> Self {
        Self::with_buckets_and_hasher(bucket_count, S::default())
    }
}

impl<K: Hash + Eq, S: BuildHasher> BucketIndex<K, S> {
    pub fn with_buckets_and_hasher(bucket_count: NonZeroUsize, hasher: S) -> Self {
        Self {
            buckets: (0..bucket_count.get()).map(|_| Vec::new()).collect(),
            hasher,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn bucket_of(&self, key: &K) -> usize {
        // The bucket count is never zero, so the modulus is in range.
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    pub fn insert(&mut self, key: K) {
        let bucket = self.bucket_of(&key);
        self.buckets[bucket].push(key);
    }

    /// Remove one occurrence of `key`. Returns `false` if it wasn't there.
    pub fn remove(&mut self, key: &K) -> bool {
        let index = self.bucket_of(key);
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|k| k == key) {
            Some(position) => {
                bucket.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.bucket(key).contains(key)
    }

    /// Every key that hashes to the same bucket as `key`, in insertion order. `key` itself doesn't
    /// need to be present.
    pub fn bucket(&self, key: &K) -> &[K] {
        &self.buckets[self.bucket_of(key)]
    }

    /// The number of keys in each bucket, by bucket index.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }
}
