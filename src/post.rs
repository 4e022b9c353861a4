use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Author shown for anonymous posts, whatever handle was entered.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Text,
    Meme,
    Confession,
    Mood,
}

impl PostKind {
    /// Badge text shown next to the author.
    pub fn label(self) -> &'static str {
        match self {
            PostKind::Text => "Post",
            PostKind::Meme => "Meme",
            PostKind::Confession => "Confession",
            PostKind::Mood => "Mood",
        }
    }
}

/// The fixed set of emoji a post can be reacted to with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Laugh,
    Heart,
    Fire,
    Eyes,
}

impl Reaction {
    pub const ALL: [Reaction; 4] = [
        Reaction::Laugh,
        Reaction::Heart,
        Reaction::Fire,
        Reaction::Eyes,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Reaction::Laugh => "😂",
            Reaction::Heart => "❤",
            Reaction::Fire => "🔥",
            Reaction::Eyes => "👀",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::Laugh => "laugh",
            Reaction::Heart => "heart",
            Reaction::Fire => "fire",
            Reaction::Eyes => "eyes",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReaction(pub String);

impl FromStr for Reaction {
    type Err = UnknownReaction;

    /// Accepts the name (`fire`) or the emoji itself (`🔥`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reaction::ALL
            .into_iter()
            .find(|r| r.as_str() == s || r.emoji() == s)
            .ok_or_else(|| UnknownReaction(s.to_string()))
    }
}

/// Per-emoji tallies. Always holds exactly the four reactions and only grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub laugh: u64,
    pub heart: u64,
    pub fire: u64,
    pub eyes: u64,
}

impl ReactionCounts {
    pub const fn new(laugh: u64, heart: u64, fire: u64, eyes: u64) -> Self {
        Self {
            laugh,
            heart,
            fire,
            eyes,
        }
    }

    pub fn get(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Laugh => self.laugh,
            Reaction::Heart => self.heart,
            Reaction::Fire => self.fire,
            Reaction::Eyes => self.eyes,
        }
    }

    pub fn increment(&mut self, reaction: Reaction) {
        let slot = match reaction {
            Reaction::Laugh => &mut self.laugh,
            Reaction::Heart => &mut self.heart,
            Reaction::Fire => &mut self.fire,
            Reaction::Eyes => &mut self.eyes,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        Reaction::ALL.iter().map(|r| self.get(*r)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub kind: PostKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author: String,
    pub is_anonymous: bool,
    pub campus: String,
    pub created_at: DateTime<Utc>,
    pub reactions: ReactionCounts,
    pub comment_count: u64,
}

impl Post {
    pub fn total_reactions(&self) -> u64 {
        self.reactions.total()
    }
}

/// Mock posts the feed starts with, in store order.
pub fn seed_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            kind: PostKind::Meme,
            content: "When you submit assignment 5 minutes before deadline 😂".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400&h=300&fit=crop"
                    .to_string(),
            ),
            author: "codewizard_ng".to_string(),
            is_anonymous: false,
            campus: "UNILAG".to_string(),
            created_at: now - Duration::hours(2),
            reactions: ReactionCounts::new(124, 23, 45, 12),
            comment_count: 18,
        },
        Post {
            id: "2".to_string(),
            kind: PostKind::Confession,
            content: "I haven't attended a single lecture this semester but somehow I'm still \
                      passing. Nigerian university system is something else 🤯"
                .to_string(),
            image_url: None,
            author: ANONYMOUS_AUTHOR.to_string(),
            is_anonymous: true,
            campus: "OAU".to_string(),
            created_at: now - Duration::hours(4),
            reactions: ReactionCounts::new(89, 156, 78, 234),
            comment_count: 67,
        },
        Post {
            id: "3".to_string(),
            kind: PostKind::Mood,
            content: "Currently debugging code at 3AM because this assignment is due tomorrow. \
                      Send help and energy drinks 💀"
                .to_string(),
            image_url: None,
            author: "midnight_coder".to_string(),
            is_anonymous: false,
            campus: "UI".to_string(),
            created_at: now - Duration::minutes(30),
            reactions: ReactionCounts::new(45, 67, 23, 8),
            comment_count: 12,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_touches_only_the_given_reaction() {
        let mut counts = ReactionCounts::new(1, 2, 3, 4);
        counts.increment(Reaction::Fire);
        assert_eq!(counts, ReactionCounts::new(1, 2, 4, 4));
        assert_eq!(counts.total(), 11);
    }

    #[test]
    fn reaction_parses_from_name_or_emoji() {
        assert_eq!("eyes".parse::<Reaction>(), Ok(Reaction::Eyes));
        assert_eq!("😂".parse::<Reaction>(), Ok(Reaction::Laugh));
        assert_eq!(
            "thumbs".parse::<Reaction>(),
            Err(UnknownReaction("thumbs".to_string()))
        );
    }

    #[test]
    fn reactions_serialize_with_all_four_keys() {
        let json = serde_json::to_value(ReactionCounts::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "laugh": 0, "heart": 0, "fire": 0, "eyes": 0 })
        );
    }

    #[test]
    fn seed_posts_are_anonymous_only_when_flagged() {
        for post in seed_posts(Utc::now()) {
            assert_eq!(post.is_anonymous, post.author == ANONYMOUS_AUTHOR);
            assert_eq!(post.image_url.is_some(), post.kind == PostKind::Meme);
        }
    }
}
