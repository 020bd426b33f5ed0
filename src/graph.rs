//! the undirected friendship graph

use crate::UserId;
use hashbrown::HashMap;

/// Undirected adjacency lists keyed by user ID.
///
/// This layer does no deduplication: adding the same edge twice stores it twice, and each
/// [`remove_edge`](FriendshipGraph::remove_edge) takes away one copy.
/// [`SocialNetwork`](crate::SocialNetwork) only adds an edge when the users aren't already
/// friends.
#[derive(Clone, Debug, Default)]
pub struct FriendshipGraph {
    adjacency: HashMap<UserId, Vec<UserId>>,
}

impl FriendshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, a: UserId, b: UserId) {
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
    }

    /// Remove one `a`-`b` edge. Each side is handled on its own, so a half-present edge is still
    /// cleaned up. Returns `true` if anything was removed.
    pub fn remove_edge(&mut self, a: UserId, b: UserId) -> bool {
        let removed_forward = self.remove_half(a, b);
        let removed_back = self.remove_half(b, a);
        removed_forward || removed_back
    }

    fn remove_half(&mut self, from: UserId, to: UserId) -> bool {
        let Some(neighbors) = self.adjacency.get_mut(&from) else {
            return false;
        };
        let Some(index) = neighbors.iter().position(|&n| n == to) else {
            return false;
        };
        neighbors.remove(index);
        if neighbors.is_empty() {
            self.adjacency.remove(&from);
        }
        true
    }

    /// Drop every edge touching `node`. Returns the neighbours it had, one entry per removed edge.
    pub fn remove_node(&mut self, node: UserId) -> Vec<UserId> {
        let neighbors = self.adjacency.remove(&node).unwrap_or_default();
        for &neighbor in &neighbors {
            if neighbor != node {
                self.remove_half(neighbor, node);
            }
        }
        neighbors
    }

    pub fn neighbors(&self, node: UserId) -> &[UserId] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_edge(&self, a: UserId, b: UserId) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn degree(&self, node: UserId) -> usize {
        self.neighbors(node).len()
    }

    /// The number of undirected edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = UserId> + '_ {
        self.adjacency.keys().copied()
    }
}
