use campus_feed::{
    feed::{derive_feed, CampusFilter, TabFilter, TRENDING_THRESHOLD},
    post::{Post, PostKind, ReactionCounts},
};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

const CAMPUSES: [&str; 4] = ["UNILAG", "OAU", "UI", "unilag"];

fn arb_kind() -> impl Strategy<Value = PostKind> {
    prop_oneof![
        Just(PostKind::Text),
        Just(PostKind::Meme),
        Just(PostKind::Confession),
        Just(PostKind::Mood),
    ]
}

fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
    prop::collection::vec(
        (
            arb_kind(),
            0usize..CAMPUSES.len(),
            (0u64..40, 0u64..40, 0u64..40, 0u64..40),
            0u64..10,
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (kind, campus, (laugh, heart, fire, eyes), comments))| Post {
                id: format!("p{i}"),
                kind,
                content: format!("post {i}"),
                image_url: None,
                author: "sam".to_string(),
                is_anonymous: false,
                campus: CAMPUSES[campus].to_string(),
                created_at: Utc.timestamp_opt(1_700_000_000 - i as i64, 0).unwrap(),
                reactions: ReactionCounts::new(laugh, heart, fire, eyes),
                comment_count: comments,
            })
            .collect()
    })
}

fn arb_campus() -> impl Strategy<Value = CampusFilter> {
    prop_oneof![
        Just(CampusFilter::Any),
        (0usize..CAMPUSES.len()).prop_map(|i| CampusFilter::Campus(CAMPUSES[i].to_string())),
    ]
}

fn arb_tab() -> impl Strategy<Value = TabFilter> {
    prop::sample::select(TabFilter::ALL.to_vec())
}

fn matches(post: &Post, campus: &CampusFilter, tab: TabFilter) -> bool {
    let campus_ok = match campus {
        CampusFilter::Any => true,
        CampusFilter::Campus(name) => post.campus == *name,
    };
    let tab_ok = match tab {
        TabFilter::All => true,
        TabFilter::Trending => post.total_reactions() > TRENDING_THRESHOLD,
        TabFilter::Confessions => post.kind == PostKind::Confession,
        TabFilter::Moods => post.kind == PostKind::Mood,
    };
    campus_ok && tab_ok
}

proptest! {
    #[test]
    fn feed_is_sound_and_complete(posts in arb_posts(), campus in arb_campus(), tab in arb_tab()) {
        let feed = derive_feed(&posts, &campus, tab);

        for post in &feed {
            prop_assert!(matches(post, &campus, tab));
        }
        let mut seen: Vec<&str> = feed.iter().map(|p| p.id.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), feed.len());

        let expected = posts.iter().filter(|p| matches(p, &campus, tab)).count();
        prop_assert_eq!(feed.len(), expected);
    }

    #[test]
    fn feed_is_pure(posts in arb_posts(), campus in arb_campus(), tab in arb_tab()) {
        let first: Vec<&str> = derive_feed(&posts, &campus, tab).iter().map(|p| p.id.as_str()).collect();
        let second: Vec<&str> = derive_feed(&posts, &campus, tab).iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn non_trending_tabs_keep_store_order(posts in arb_posts(), campus in arb_campus(), tab in arb_tab()) {
        prop_assume!(tab != TabFilter::Trending);
        let feed = derive_feed(&posts, &campus, tab);
        let positions: Vec<usize> = feed
            .iter()
            .map(|p| posts.iter().position(|q| q.id == p.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn trending_is_ranked_with_stable_ties(posts in arb_posts(), campus in arb_campus()) {
        let feed = derive_feed(&posts, &campus, TabFilter::Trending);
        let position = |p: &Post| posts.iter().position(|q| q.id == p.id).unwrap();

        for pair in feed.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.total_reactions() >= b.total_reactions());
            if a.total_reactions() == b.total_reactions() {
                prop_assert!(position(a) < position(b));
            }
        }
    }

    #[test]
    fn wildcard_all_is_identity(posts in arb_posts()) {
        let feed = derive_feed(&posts, &CampusFilter::Any, TabFilter::All);
        let ids: Vec<&str> = feed.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }
}
