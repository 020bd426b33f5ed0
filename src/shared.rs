//! a thread-safe handle to a network

use crate::{NetworkConfig, SocialNetwork};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A cloneable, lockable handle to one [`SocialNetwork`].
///
/// Each closure passed to [`with`](SharedNetwork::with) runs under the lock, so a multi-step
/// read-modify-write is atomic with respect to other handles.
///
/// # Example
///
/// ```
/// use socialgraph::{SharedNetwork, User, UserId};
///
/// let shared = SharedNetwork::new();
/// let handle = shared.clone();
/// std::thread::spawn(move || {
///     handle.with(|net| net.add_user(User::new(1, "Alice", "NYC")));
/// })
/// .join()
/// .unwrap();
/// assert!(shared.with(|net| net.contains_user(UserId(1))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedNetwork {
    inner: Arc<Mutex<SocialNetwork>>,
}

impl SharedNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        Self::from(SocialNetwork::with_config(config))
    }

    /// Lock the network. Every façade method leaves the network consistent before it can panic,
    /// so a poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, SocialNetwork> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut SocialNetwork) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<SocialNetwork> for SharedNetwork {
    fn from(network: SocialNetwork) -> Self {
        Self {
            inner: Arc::new(Mutex::new(network)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{User, UserId};
    use std::thread;

    #[test]
    fn test_concurrent_friendships() {
        let shared = SharedNetwork::new();
        shared.with(|net| {
            for id in 0..20 {
                net.add_user(User::new(id, format!("user{id}"), "here"));
            }
        });

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for a in 0..20u64 {
                        let b = (a + t + 1) % 20;
                        shared.with(|net| net.add_friendship(UserId(a), UserId(b)));
                        if t % 2 == 1 {
                            shared.with(|net| net.add_like_from(UserId(a), UserId(b)).unwrap());
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let net = shared.lock();
        net.assert_consistent();
        // Offsets 1..=4 give 80 distinct unordered pairs.
        assert_eq!(net.graph().edge_count(), 80);
        let total_likes: u64 = net.users().map(User::like_count).sum();
        assert_eq!(total_likes, 40);
    }

    #[test]
    fn test_poisoned_lock_recovers() {
        let shared = SharedNetwork::new();
        let handle = shared.clone();
        let result = thread::spawn(move || {
            let _guard = handle.lock();
            panic!("boom");
        })
        .join();
        assert!(result.is_err());
        assert!(shared.with(|net| net.add_user(User::new(1, "Alice", "NYC"))));
    }
}
