//! users and the posts they own

use crate::UserId;
use std::fmt;

/// A piece of content owned by exactly one [`User`].
///
/// Posts have no identity of their own. The façade addresses them by position in the owner's
/// post list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    content: String,
    likes: u64,
}

impl Post {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            likes: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn add_like(&mut self) {
        self.likes += 1;
    }

    /// Take back one like. Removing a like from a post with none is a no-op.
    pub fn remove_like(&mut self) {
        self.likes = self.likes.saturating_sub(1);
    }
}

/// A registered member of the network.
///
/// `User` holds friend IDs, not references to other users. When a `User` is owned by a
/// [`SocialNetwork`](crate::SocialNetwork), the network keeps that list in lockstep with its
/// friendship graph, so prefer [`SocialNetwork::add_friendship`](crate::SocialNetwork::add_friendship)
/// over calling [`add_friend`](User::add_friend) directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    location: String,
    posts: Vec<Post>,
    friends: Vec<UserId>,
    likes: u64,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            location: location.into(),
            posts: Vec::new(),
            friends: Vec::new(),
            likes: 0,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn post_mut(&mut self, index: usize) -> Option<&mut Post> {
        self.posts.get_mut(index)
    }

    pub fn friends(&self) -> &[UserId] {
        &self.friends
    }

    pub fn is_friend(&self, id: UserId) -> bool {
        self.friends.contains(&id)
    }

    pub fn add_post(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Remove the first post equal to `post`. Returns `false` if there isn't one.
    pub fn remove_post(&mut self, post: &Post) -> bool {
        match self.posts.iter().position(|p| p == post) {
            Some(index) => {
                self.posts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the post at `index`, shifting later posts down by one.
    pub fn take_post(&mut self, index: usize) -> Option<Post> {
        if index < self.posts.len() {
            Some(self.posts.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn clear_friends(&mut self) -> Vec<UserId> {
        std::mem::take(&mut self.friends)
    }

    pub fn add_friend(&mut self, friend: UserId) {
        self.friends.push(friend);
    }

    pub fn remove_friend(&mut self, friend: UserId) -> bool {
        match self.friends.iter().position(|&f| f == friend) {
            Some(index) => {
                self.friends.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    pub fn add_like(&mut self) {
        self.likes += 1;
    }

    pub fn like_count(&self) -> u64 {
        self.likes
    }
}

/// A flat snapshot of one user's profile, suitable for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub location: String,
    pub post_count: usize,
    pub friend_count: usize,
    pub likes: u64,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            location: user.location.clone(),
            post_count: user.post_count(),
            friend_count: user.friend_count(),
            likes: user.likes,
        }
    }
}

impl fmt::Display for UserSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "User ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Number of Posts: {}", self.post_count)?;
        writeln!(f, "Number of Friends: {}", self.friend_count)?;
        write!(f, "Likes: {}", self.likes)
    }
}
