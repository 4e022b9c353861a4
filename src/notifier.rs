//! Periodic "new posts available" hint.
//!
//! Nothing is fetched: each tick simply rolls against a probability and
//! raises a flag the page can show a banner for.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_PROBABILITY: f64 = 0.3;

/// Owns the ticking task. Dropping it stops the task.
pub struct LiveUpdateNotifier {
    flag: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl LiveUpdateNotifier {
    /// Starts ticking on the current tokio runtime. The first tick lands one
    /// full `period` after the call.
    pub fn spawn(period: Duration, probability: f64) -> Self {
        let probability = probability.clamp(0.0, 1.0);
        let flag = Arc::new(AtomicBool::new(false));
        let task_flag = flag.clone();

        info!(?period, probability, "Starting live-update notifier");
        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if rng.gen_bool(probability) {
                    debug!("New posts flagged");
                    task_flag.store(true, Ordering::Relaxed);
                }
            }
        });

        Self { flag, task }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clears the flag. There is no feed refresh behind it.
    pub fn acknowledge(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for LiveUpdateNotifier {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn certain_tick_raises_flag_after_one_period() {
        let notifier = LiveUpdateNotifier::spawn(DEFAULT_INTERVAL, 1.0);

        tokio::time::sleep(DEFAULT_INTERVAL - Duration::from_secs(1)).await;
        assert!(!notifier.is_flagged());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(notifier.is_flagged());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_probability_never_flags() {
        let notifier = LiveUpdateNotifier::spawn(DEFAULT_INTERVAL, 0.0);
        tokio::time::sleep(DEFAULT_INTERVAL * 10).await;
        assert!(!notifier.is_flagged());
    }

    #[tokio::test(start_paused = true)]
    async fn acknowledge_clears_flag() {
        let notifier = LiveUpdateNotifier::spawn(Duration::from_secs(1), 1.0);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(notifier.is_flagged());

        notifier.acknowledge();
        assert!(!notifier.is_flagged());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_task() {
        let notifier = LiveUpdateNotifier::spawn(Duration::from_secs(1), 1.0);
        let flag = notifier.flag.clone();
        assert!(notifier.is_running());

        drop(notifier);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(!flag.load(Ordering::Relaxed));
        assert_eq!(Arc::strong_count(&flag), 1);
    }
}
