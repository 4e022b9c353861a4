//! Which posts the feed shows, and in what order.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    campus::{self, ALL_CAMPUSES_ID},
    post::{Post, PostKind},
};

/// A post is trending once its summed reactions go past this.
pub const TRENDING_THRESHOLD: u64 = 50;

/// Feed view selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabFilter {
    #[default]
    All,
    Confessions,
    Moods,
    Trending,
}

impl TabFilter {
    pub const ALL: [TabFilter; 4] = [
        TabFilter::All,
        TabFilter::Confessions,
        TabFilter::Moods,
        TabFilter::Trending,
    ];

    /// Post kind a tab narrows to. Tab ids are plural, kinds singular.
    pub fn kind(self) -> Option<PostKind> {
        match self {
            TabFilter::Confessions => Some(PostKind::Confession),
            TabFilter::Moods => Some(PostKind::Mood),
            TabFilter::All | TabFilter::Trending => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabFilter::All => "all",
            TabFilter::Confessions => "confessions",
            TabFilter::Moods => "moods",
            TabFilter::Trending => "trending",
        }
    }

    fn admits(self, post: &Post) -> bool {
        match self {
            TabFilter::All => true,
            TabFilter::Trending => post.total_reactions() > TRENDING_THRESHOLD,
            TabFilter::Confessions | TabFilter::Moods => self.kind() == Some(post.kind),
        }
    }
}

impl fmt::Display for TabFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTab(pub String);

impl FromStr for TabFilter {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabFilter::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Campus narrowing for the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CampusFilter {
    #[default]
    Any,
    /// Exact, case-sensitive match against `Post::campus`.
    Campus(String),
}

impl CampusFilter {
    /// Interprets a selector value from the page.
    ///
    /// `all` (or nothing) is the wildcard. A registry id such as `unilag`
    /// resolves to that campus's short name, which is what posts carry.
    /// Anything else is kept verbatim.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some(ALL_CAMPUSES_ID) => CampusFilter::Any,
            Some(v) => match campus::find_by_id(v) {
                Some(c) => CampusFilter::Campus(c.short_name.to_string()),
                None => CampusFilter::Campus(v.to_string()),
            },
        }
    }

    fn admits(&self, post: &Post) -> bool {
        match self {
            CampusFilter::Any => true,
            CampusFilter::Campus(name) => post.campus == *name,
        }
    }
}

/// Visible posts for a campus and tab.
///
/// Store order is kept, except on the trending tab where posts are ranked by
/// total reactions. The sort is stable, so equal totals keep store order.
pub fn derive_feed<'a>(posts: &'a [Post], campus: &CampusFilter, tab: TabFilter) -> Vec<&'a Post> {
    let mut visible: Vec<&Post> = posts
        .iter()
        .filter(|p| campus.admits(p) && tab.admits(p))
        .collect();

    if tab == TabFilter::Trending {
        visible.sort_by(|a, b| b.total_reactions().cmp(&a.total_reactions()));
    }

    visible
}
