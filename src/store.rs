use crate::post::{Post, Reaction, ReactionCounts};

/// In-memory posts, newest-first.
///
/// Posts only ever enter at the head. Apart from reaction counters nothing
/// about a stored post changes, and nothing is ever removed.
#[derive(Debug, Default, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store that already holds `posts` in the given order.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Bumps one reaction on the stored post and returns the new tallies,
    /// or `None` when no post has that id.
    pub fn react(&mut self, id: &str, reaction: Reaction) -> Option<ReactionCounts> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.reactions.increment(reaction);
        Some(post.reactions)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
