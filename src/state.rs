use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    notifier::LiveUpdateNotifier,
    post::seed_posts,
    store::PostStore,
    theme::Theme,
};

/// Shared application state: the post store, the page theme and the
/// live-update notifier. Clones share everything; the notifier stops once
/// the last clone is gone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<PostStore>>,
    pub theme: Arc<RwLock<Theme>>,
    pub notifier: Arc<LiveUpdateNotifier>,
}

impl AppState {
    pub fn new(store: PostStore, notifier: LiveUpdateNotifier) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            theme: Arc::new(RwLock::new(Theme::default())),
            notifier: Arc::new(notifier),
        }
    }

    /// State starting from the mock posts, or empty when `seed` is off, with
    /// the page opening in `theme`.
    /// Must be called from inside a tokio runtime.
    pub fn bootstrap(
        seed: bool,
        theme: Theme,
        poll_interval: Duration,
        new_posts_probability: f64,
    ) -> Self {
        let store = if seed {
            PostStore::with_posts(seed_posts(Utc::now()))
        } else {
            PostStore::new()
        };
        let notifier = LiveUpdateNotifier::spawn(poll_interval, new_posts_probability);
        Self::new(store, notifier).with_theme(theme)
    }

    fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Arc::new(RwLock::new(theme));
        self
    }
}
