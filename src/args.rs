use clap::Parser;

use crate::theme::Theme;

/// CLI arguments for campus-feed.
#[derive(Parser, Debug)]
#[command(
    name = "campus-feed",
    about = "Serve an in-memory campus social feed with confessions, moods, memes and reactions"
)]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long, env = "CAMPUS_FEED_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: String,

    /// Seconds between "new posts available" checks
    #[arg(long, env = "CAMPUS_FEED_POLL_INTERVAL_SECS", default_value_t = 15)]
    pub poll_interval_secs: u64,

    /// Chance per check that new posts get flagged (0.0 - 1.0)
    #[arg(
        long,
        env = "CAMPUS_FEED_NEW_POSTS_PROBABILITY",
        default_value_t = 0.3,
        value_parser = parse_probability
    )]
    pub new_posts_probability: f64,

    /// Theme the page opens with (light or dark)
    #[arg(long, env = "CAMPUS_FEED_THEME", default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Start with an empty feed instead of the sample posts
    #[arg(long, env = "CAMPUS_FEED_NO_SEED")]
    pub no_seed: bool,
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not between 0 and 1"))
    }
}
