//! Turning a submitted form into a post.
//!
//! The loosely shaped [`DraftForm`] the page sends is checked once, in
//! [`Draft::new`], and becomes either a [`TextDraft`] or a [`MemeDraft`].
//! Everything downstream works with those and never re-checks fields.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    image::ImageRef,
    post::{Post, PostKind, ReactionCounts, ANONYMOUS_AUTHOR},
    store::PostStore,
};

pub const MAX_CONTENT_CHARS: usize = 280;

/// Which composer tab the form was filled in on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeTab {
    #[default]
    Text,
    Meme,
}

/// The "Post Type" selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Text,
    Confession,
    Mood,
}

/// Composer form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftForm {
    pub tab: ComposeTab,
    pub content: String,
    pub image_url: Option<String>,
    pub username: String,
    pub is_anonymous: bool,
    pub campus: Option<String>,
    pub post_type: PostType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("content is empty")]
    EmptyContent,

    #[error("content is {chars} characters, the limit is {}", MAX_CONTENT_CHARS)]
    ContentTooLong { chars: usize },

    #[error("a username is required unless posting anonymously")]
    MissingUsername,

    #[error("a campus must be selected")]
    MissingCampus,
}

impl Violation {
    pub fn code(self) -> &'static str {
        match self {
            Violation::EmptyContent => "empty_content",
            Violation::ContentTooLong { .. } => "content_too_long",
            Violation::MissingUsername => "missing_username",
            Violation::MissingCampus => "missing_campus",
        }
    }
}

/// Every reason a form was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("post rejected: ")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    Anonymous,
    Named(String),
}

impl Author {
    fn display_name(&self) -> &str {
        match self {
            Author::Anonymous => ANONYMOUS_AUTHOR,
            Author::Named(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDraft {
    pub content: String,
    pub author: Author,
    pub campus: String,
    pub post_type: PostType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeDraft {
    pub caption: String,
    pub image: ImageRef,
    pub author: Author,
    pub campus: String,
    pub post_type: PostType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Text(TextDraft),
    Meme(MemeDraft),
}

impl Draft {
    /// Checks a form and, when it passes, returns the typed draft with
    /// trimmed content, username and campus.
    pub fn new(form: DraftForm) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let content = form.content.trim();
        if content.is_empty() {
            violations.push(Violation::EmptyContent);
        }
        let chars = content.chars().count();
        if chars > MAX_CONTENT_CHARS {
            violations.push(Violation::ContentTooLong { chars });
        }

        let username = form.username.trim();
        if !form.is_anonymous && username.is_empty() {
            violations.push(Violation::MissingUsername);
        }

        let campus = form.campus.as_deref().map(str::trim).unwrap_or_default();
        if campus.is_empty() {
            violations.push(Violation::MissingCampus);
        }

        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        let author = if form.is_anonymous {
            Author::Anonymous
        } else {
            Author::Named(username.to_string())
        };
        let content = content.to_string();
        let campus = campus.to_string();

        // A meme tab without a picture is posted like plain text.
        let image = match form.tab {
            ComposeTab::Meme => form.image_url.as_deref().and_then(ImageRef::parse),
            ComposeTab::Text => None,
        };

        Ok(match image {
            Some(image) => Draft::Meme(MemeDraft {
                caption: content,
                image,
                author,
                campus,
                post_type: form.post_type,
            }),
            None => Draft::Text(TextDraft {
                content,
                author,
                campus,
                post_type: form.post_type,
            }),
        })
    }

    /// The stored kind always follows the "Post Type" selector, whichever
    /// tab the draft came from.
    pub fn kind(&self) -> PostKind {
        let post_type = match self {
            Draft::Text(d) => d.post_type,
            Draft::Meme(d) => d.post_type,
        };
        match post_type {
            PostType::Text => PostKind::Text,
            PostType::Confession => PostKind::Confession,
            PostType::Mood => PostKind::Mood,
        }
    }

    /// Builds the stored record. Reactions and comments start at zero.
    pub fn into_post(self, id: String, created_at: DateTime<Utc>) -> Post {
        let kind = self.kind();
        let (content, image_url, author, campus) = match self {
            Draft::Text(d) => (d.content, None, d.author, d.campus),
            Draft::Meme(d) => (d.caption, Some(d.image.into_string()), d.author, d.campus),
        };

        Post {
            id,
            kind,
            content,
            image_url,
            is_anonymous: author == Author::Anonymous,
            author: author.display_name().to_string(),
            campus,
            created_at,
            reactions: ReactionCounts::default(),
            comment_count: 0,
        }
    }
}

/// Stamps a fresh id and time on the draft and puts it at the head of the
/// store. Returns a copy of what was stored.
pub fn submit(draft: Draft, store: &mut PostStore) -> Post {
    let post = draft.into_post(Uuid::new_v4().to_string(), Utc::now());
    store.prepend(post.clone());
    post
}

/// Validates a form and submits it. A refused form leaves the store as is.
pub fn compose(form: DraftForm, store: &mut PostStore) -> Result<Post, ValidationError> {
    let draft = Draft::new(form)?;
    Ok(submit(draft, store))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DraftForm {
        DraftForm {
            tab: ComposeTab::Text,
            content: "hello".to_string(),
            image_url: None,
            username: "sam".to_string(),
            is_anonymous: false,
            campus: Some("UNILAG".to_string()),
            post_type: PostType::Text,
        }
    }

    #[test]
    fn accepted_post_lands_at_head_with_zeroed_counters() {
        let mut store = PostStore::with_posts(crate::post::seed_posts(Utc::now()));

        let post = compose(form(), &mut store).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.posts()[0], post);
        assert_eq!(post.author, "sam");
        assert_eq!(post.campus, "UNILAG");
        assert_eq!(post.kind, PostKind::Text);
        assert_eq!(post.reactions, ReactionCounts::new(0, 0, 0, 0));
        assert_eq!(post.comment_count, 0);
        assert!(post.image_url.is_none());
    }

    #[test]
    fn empty_content_never_reaches_store() {
        for content in ["", "   ", "\n\t"] {
            let mut store = PostStore::new();
            let err = compose(DraftForm { content: content.to_string(), ..form() }, &mut store)
                .unwrap_err();
            assert_eq!(err.violations, vec![Violation::EmptyContent]);
            assert!(store.is_empty());
        }
    }

    #[test]
    fn anonymous_overrides_username() {
        let mut store = PostStore::new();
        let post = compose(DraftForm { is_anonymous: true, ..form() }, &mut store).unwrap();
        assert_eq!(post.author, ANONYMOUS_AUTHOR);
        assert!(post.is_anonymous);
    }

    #[test]
    fn anonymous_needs_no_username() {
        let draft = Draft::new(DraftForm {
            is_anonymous: true,
            username: String::new(),
            ..form()
        });
        assert!(draft.is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let err = Draft::new(DraftForm {
            tab: ComposeTab::Meme,
            content: " ".to_string(),
            image_url: Some(String::new()),
            username: " ".to_string(),
            is_anonymous: false,
            campus: None,
            post_type: PostType::Text,
        })
        .unwrap_err();

        assert_eq!(
            err.violations,
            vec![
                Violation::EmptyContent,
                Violation::MissingUsername,
                Violation::MissingCampus,
            ]
        );
        assert!(err.to_string().starts_with("post rejected: content is empty; "));
    }

    #[test]
    fn content_limit_counts_characters() {
        let at_limit = "😂".repeat(MAX_CONTENT_CHARS);
        assert!(Draft::new(DraftForm { content: at_limit, ..form() }).is_ok());

        let over = "a".repeat(MAX_CONTENT_CHARS + 1);
        let err = Draft::new(DraftForm { content: over, ..form() }).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::ContentTooLong { chars: MAX_CONTENT_CHARS + 1 }]
        );
    }

    #[test]
    fn fields_are_trimmed() {
        let draft = Draft::new(DraftForm {
            content: "  hi  ".to_string(),
            username: " sam ".to_string(),
            campus: Some(" OAU ".to_string()),
            ..form()
        })
        .unwrap();
        let post = draft.into_post("x".to_string(), Utc::now());
        assert_eq!(post.content, "hi");
        assert_eq!(post.author, "sam");
        assert_eq!(post.campus, "OAU");
    }

    #[test]
    fn image_is_only_kept_for_meme_tab() {
        let text = Draft::new(DraftForm {
            image_url: Some("https://img/x.png".to_string()),
            ..form()
        })
        .unwrap();
        assert!(matches!(text, Draft::Text(_)));
        assert!(text.into_post("t".to_string(), Utc::now()).image_url.is_none());

        let meme = Draft::new(DraftForm {
            tab: ComposeTab::Meme,
            image_url: Some("https://img/x.png".to_string()),
            ..form()
        })
        .unwrap();
        let post = meme.into_post("m".to_string(), Utc::now());
        assert_eq!(post.kind, PostKind::Text);
        assert_eq!(post.image_url.as_deref(), Some("https://img/x.png"));
    }

    #[test]
    fn meme_tab_without_image_posts_as_text() {
        for image_url in [None, Some(String::new()), Some("  ".to_string())] {
            let mut store = PostStore::new();
            let post = compose(
                DraftForm {
                    tab: ComposeTab::Meme,
                    image_url,
                    ..form()
                },
                &mut store,
            )
            .unwrap();

            assert_eq!(store.len(), 1);
            assert_eq!(post.kind, PostKind::Text);
            assert!(post.image_url.is_none());
        }
    }

    #[test]
    fn post_type_selects_kind() {
        let confession = Draft::new(DraftForm { post_type: PostType::Confession, ..form() }).unwrap();
        assert_eq!(confession.kind(), PostKind::Confession);

        let meme_mood = Draft::new(DraftForm {
            tab: ComposeTab::Meme,
            image_url: Some("data:image/png;base64,AA==".to_string()),
            post_type: PostType::Mood,
            ..form()
        })
        .unwrap();
        assert_eq!(meme_mood.kind(), PostKind::Mood);
    }

    #[test]
    fn submitted_ids_are_unique() {
        let mut store = PostStore::new();
        let a = compose(form(), &mut store).unwrap();
        let b = compose(form(), &mut store).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.posts()[0].id, b.id);
    }
}
