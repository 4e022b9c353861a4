use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    campus::Campus,
    post::{Post, PostKind, ReactionCounts},
    theme::Theme,
};

/// Campus as offered by the selectors.
#[derive(Serialize)]
pub struct CampusDto {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

impl From<&Campus> for CampusDto {
    fn from(campus: &Campus) -> Self {
        Self {
            id: campus.id.to_string(),
            name: campus.name.to_string(),
            short_name: campus.short_name.to_string(),
        }
    }
}

/// A post as rendered in the feed.
#[derive(Serialize)]
pub struct PostDto {
    pub id: String,
    pub kind: PostKind,
    pub kind_label: &'static str,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author: String,
    pub author_initial: String,
    pub is_anonymous: bool,
    pub campus: String,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
    pub reactions: ReactionCounts,
    pub total_reactions: u64,
    pub comment_count: u64,
}

impl PostDto {
    pub fn new(post: &Post, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id.clone(),
            kind: post.kind,
            kind_label: post.kind.label(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            author: post.author.clone(),
            author_initial: author_initial(post),
            is_anonymous: post.is_anonymous,
            campus: post.campus.clone(),
            created_at: post.created_at,
            time_ago: time_ago(post.created_at, now),
            reactions: post.reactions,
            total_reactions: post.total_reactions(),
            comment_count: post.comment_count,
        }
    }
}

/// Query string of `GET /posts`.
#[derive(Deserialize, Default)]
pub struct FeedQuery {
    pub campus: Option<String>,
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct ReactRequest {
    pub reaction: String,
}

#[derive(Serialize)]
pub struct ReactionsDto {
    pub id: String,
    pub reactions: ReactionCounts,
    pub total_reactions: u64,
}

#[derive(Serialize)]
pub struct LiveDto {
    pub new_posts_available: bool,
}

#[derive(Serialize)]
pub struct ThemeDto {
    pub theme: Theme,
}

#[derive(Serialize)]
pub struct ImageDto {
    pub image_url: String,
}

/// Minutes under an hour, hours under a day, days beyond.
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

fn author_initial(post: &Post) -> String {
    if post.is_anonymous {
        return "?".to_string();
    }
    post.author
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
