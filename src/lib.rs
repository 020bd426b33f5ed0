//! An in-memory social network: users, posts, friendships and likes.
//!
//! [`SocialNetwork`] is the entry point. It owns an [`IndexedRegistry`] of users and a
//! [`FriendshipGraph`], and every method updates both (plus the affected users' friend lists)
//! before returning. Callers never see one replica ahead of another.
//!
//! # Example
//!
//! ```
//! use socialgraph::{SocialNetwork, User, UserId};
//!
//! let mut network = SocialNetwork::new();
//! network.add_user(User::new(1, "Alice", "NYC"));
//! network.add_user(User::new(2, "Bob", "LA"));
//!
//! assert!(network.add_friendship(UserId(1), UserId(2)));
//! assert_eq!(network.friend_ids_of(UserId(1)), [UserId(2)]);
//! assert_eq!(network.friend_ids_of(UserId(2)), [UserId(1)]);
//!
//! network.add_like_from(UserId(1), UserId(2)).unwrap();
//! assert_eq!(network.likes_of(UserId(2)), Ok(1));
//!
//! // Friendships with unregistered users are refused.
//! assert!(!network.add_friendship(UserId(1), UserId(99)));
//! ```

use std::ops::{RangeBounds, RangeFull};
use tracing::{debug, info, warn};

pub mod buckets;
pub mod config;
pub mod error;
pub mod graph;
pub mod id;
pub mod iter;
pub mod registry;
pub mod shared;
pub mod tree;
pub mod user;

pub use config::NetworkConfig;
pub use error::{ConfigError, NetworkError};
pub use graph::FriendshipGraph;
pub use id::UserId;
pub use registry::IndexedRegistry;
pub use shared::SharedNetwork;
pub use user::{Post, User, UserSummary};

use iter::{Bucket, Ordered};


fn unknown_user(id: UserId) -> NetworkError {
    warn!(user = %id, "no such user");
    NetworkError::UnknownUser(id)
}

/// The façade over the user registry and the friendship graph.
///
/// This is the only thing that mutates either of them. Friendship is a single relation stored in
/// the graph; each user's friend list mirrors it exactly, so edge `(a, b)` exists iff `b` is in
/// `a`'s friend list and `a` is in `b`'s.
#[derive(Clone, Debug, Default)]
pub struct SocialNetwork {
    config: NetworkConfig,
    registry: IndexedRegistry,
    graph: FriendshipGraph,
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            registry: IndexedRegistry::with_config(&config),
            graph: FriendshipGraph::new(),
            config,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn registry(&self) -> &IndexedRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &FriendshipGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.registry.contains(id)
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.registry.get(id)
    }

    /// Register `user`. Returns `false` and leaves the existing user in place if the ID is taken.
    ///
    /// Friendships only exist through [`add_friendship`](Self::add_friendship), so any friend IDs
    /// the caller put on `user` beforehand are discarded.
    pub fn add_user(&mut self, mut user: User) -> bool {
        let id = user.id();
        let stale = user.clear_friends();
        if !stale.is_empty() {
            debug!(user = %id, dropped = stale.len(), "discarding unregistered friend ids");
        }
        let added = self.registry.insert(user);
        if added {
            debug!(user = %id, "user added");
        } else {
            debug!(user = %id, "user already registered");
        }
        added
    }

    /// Unregister a user and delete every friendship that references it.
    ///
    /// The returned `User` still carries the friend list it had at removal time.
    pub fn remove_user(&mut self, id: UserId) -> Option<User> {
        let user = self.registry.remove(id)?;
        let former_friends = self.graph.remove_node(id);
        for &friend_id in &former_friends {
            if let Some(friend) = self.registry.get_mut(friend_id) {
                friend.remove_friend(id);
            }
        }
        debug!(user = %id, friendships = former_friends.len(), "user removed");
        Some(user)
    }

    /// Make `a` and `b` friends.
    ///
    /// A user can't befriend themselves: `add_friendship(a, a)` is refused even when `a` is
    /// registered. Returns `false` without changing anything in that case or if either user is
    /// unregistered. Returns `true` if they're friends afterwards, including when they already
    /// were.
    pub fn add_friendship(&mut self, a: UserId, b: UserId) -> bool {
        if a == b {
            debug!(user = %a, "refusing self-friendship");
            return false;
        }
        let Some([user_a, user_b]) = self.registry.get_pair_mut(a, b) else {
            warn!(%a, %b, "friendship between unknown users");
            return false;
        };
        if user_a.is_friend(b) {
            return true;
        }
        user_a.add_friend(b);
        user_b.add_friend(a);
        self.graph.add_edge(a, b);
        debug!(%a, %b, "friendship added");
        true
    }

    /// End the friendship between `a` and `b`. Does nothing unless both are registered. Returns
    /// whether they were friends.
    pub fn remove_friendship(&mut self, a: UserId, b: UserId) -> bool {
        let Some([user_a, user_b]) = self.registry.get_pair_mut(a, b) else {
            return false;
        };
        let was_friend = user_a.remove_friend(b);
        user_b.remove_friend(a);
        self.graph.remove_edge(a, b);
        if was_friend {
            debug!(%a, %b, "friendship removed");
        }
        was_friend
    }

    /// IDs of `id`'s friends, in the order the friendships were made. Empty if `id` is unknown.
    pub fn friend_ids_of(&self, id: UserId) -> Vec<UserId> {
        self.graph.neighbors(id).to_vec()
    }

    pub fn add_like_from(&mut self, actor: UserId, target: UserId) -> Result<(), NetworkError> {
        if !self.registry.contains(actor) {
            return Err(unknown_user(actor));
        }
        let user = self
            .registry
            .get_mut(target)
            .ok_or_else(|| unknown_user(target))?;
        user.add_like();
        info!(%actor, %target, likes = user.like_count(), "like added");
        Ok(())
    }

    pub fn likes_of(&self, id: UserId) -> Result<u64, NetworkError> {
        let user = self.user(id)?;
        Ok(user.like_count())
    }

    /// Append a post to `id`'s post list. Returns the new post's position.
    pub fn add_post(&mut self, id: UserId, content: impl Into<String>) -> Result<usize, NetworkError> {
        let user = self.user_mut(id)?;
        user.add_post(Post::new(content));
        let index = user.post_count() - 1;
        debug!(user = %id, index, "post added");
        Ok(index)
    }

    /// Delete the post at `index`. Later posts shift down by one position.
    pub fn remove_post(&mut self, id: UserId, index: usize) -> Result<Post, NetworkError> {
        let post = self
            .user_mut(id)?
            .take_post(index)
            .ok_or(NetworkError::UnknownPost { user: id, index })?;
        debug!(user = %id, index, "post removed");
        Ok(post)
    }

    /// Like the post at `index`. Returns the post's new like count.
    pub fn like_post(&mut self, id: UserId, index: usize) -> Result<u64, NetworkError> {
        let post = self.post_mut(id, index)?;
        post.add_like();
        Ok(post.likes())
    }

    /// Take back a like from the post at `index`. A post with no likes stays at zero.
    pub fn unlike_post(&mut self, id: UserId, index: usize) -> Result<u64, NetworkError> {
        let post = self.post_mut(id, index)?;
        post.remove_like();
        Ok(post.likes())
    }

    pub fn posts_of(&self, id: UserId) -> Result<&[Post], NetworkError> {
        Ok(self.user(id)?.posts())
    }

    pub fn user_summary(&self, id: UserId) -> Result<UserSummary, NetworkError> {
        Ok(UserSummary::from(self.user(id)?))
    }

    /// One row per registered user, in ascending ID order.
    pub fn user_table(&self) -> Vec<UserSummary> {
        self.users().map(UserSummary::from).collect()
    }

    /// All users in ascending ID order.
    pub fn users(&self) -> Ordered<'_, RangeFull> {
        self.registry.ordered()
    }

    pub fn users_in_range<R: RangeBounds<UserId>>(&self, range: R) -> Ordered<'_, R> {
        self.registry.ordered_range(range)
    }

    /// Users sharing `id`'s registry bucket. Useful for inspecting hash distribution.
    pub fn bucket_neighbors(&self, id: UserId) -> Bucket<'_> {
        self.registry.bucket_lookup(id)
    }

    fn user(&self, id: UserId) -> Result<&User, NetworkError> {
        self.registry.get(id).ok_or_else(|| unknown_user(id))
    }

    fn user_mut(&mut self, id: UserId) -> Result<&mut User, NetworkError> {
        self.registry.get_mut(id).ok_or_else(|| unknown_user(id))
    }

    fn post_mut(&mut self, id: UserId, index: usize) -> Result<&mut Post, NetworkError> {
        self.user_mut(id)?
            .post_mut(index)
            .ok_or(NetworkError::UnknownPost { user: id, index })
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.registry.assert_consistent();
        for node in self.graph.nodes() {
            assert!(self.registry.contains(node), "graph mentions unregistered {node}");
        }
        for user in self.registry.ordered() {
            let mut from_user = user.friends().to_vec();
            let mut from_graph = self.graph.neighbors(user.id()).to_vec();
            from_user.sort();
            from_graph.sort();
            assert_eq!(from_user, from_graph, "friend list of {} diverged", user.id());
            for &friend in user.friends() {
                let other = self.registry.get(friend).expect("friend is registered");
                assert!(other.is_friend(user.id()), "{friend} doesn't list {}", user.id());
            }
        }
    }
}
