//! Scheduled Poster - hourly canned posts
//!
//! Each tick picks a template, stamps it with the local time and publishes
//! it if it fits the platform limit. The next tick is always scheduled one
//! interval after the current one finishes, whatever its outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use waifu::{MessagePool, PostRecord, PosterState, Publisher, TickOutcome, MAX_POST_CHARS};

/// Poster configuration
#[derive(Debug, Clone)]
pub struct PosterConfig {
    /// Delay between the end of one tick and the start of the next
    pub interval: Duration,
    /// Longest post that will be published
    pub max_chars: usize,
    /// Enable/disable poster
    pub enabled: bool,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600), // 1 hour
            max_chars: MAX_POST_CHARS,
            enabled: true,
        }
    }
}

/// Post scheduler
pub struct PostScheduler {
    publisher: Arc<dyn Publisher>,
    pool: MessagePool,
    config: PosterConfig,
    state: watch::Sender<PosterState>,
}

impl PostScheduler {
    /// Creates a new scheduler
    pub fn new(
        publisher: Arc<dyn Publisher>,
        pool: MessagePool,
        config: Option<PosterConfig>,
    ) -> Self {
        let (state, _) = watch::channel(PosterState::Idle);
        Self {
            publisher,
            pool,
            config: config.unwrap_or_default(),
            state,
        }
    }

    /// Execute one tick: compose, check length, publish
    ///
    /// `Posting` covers only the publish call, so a skipped tick stays `Idle`.
    pub async fn run_tick(&self) -> TickOutcome {
        let post = {
            let mut rng = rand::rng();
            PostRecord::compose(self.pool.choose(&mut rng), &Local::now())
        };

        let chars = post.char_count();
        if !post.fits(self.config.max_chars) {
            return TickOutcome::Skipped { chars };
        }

        self.state.send_replace(PosterState::Posting);
        let outcome = match self.publisher.publish(&post.text).await {
            Ok(published) => TickOutcome::Posted { id: published.id },
            Err(e) => TickOutcome::Failed {
                error: e.to_string(),
            },
        };
        self.state.send_replace(PosterState::Idle);

        outcome
    }

    /// Start the scheduler (runs in background)
    pub fn start(self) -> PosterHandle {
        let cancel = CancellationToken::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let state = self.state.subscribe();

        let worker = tokio::spawn(self.run(cancel.clone(), ticks.clone()));

        // A panicking poster is reported here and leaves the rest of the
        // process running.
        let task = tokio::spawn(async move {
            if let Err(e) = worker.await {
                if e.is_panic() {
                    tracing::error!(error = %e, "📮 Scheduled poster crashed");
                }
            }
        });

        PosterHandle {
            cancel,
            ticks,
            state,
            task,
        }
    }

    /// Run the scheduler loop
    async fn run(self, cancel: CancellationToken, ticks: Arc<AtomicU64>) {
        if !self.config.enabled {
            tracing::info!("📮 Scheduled poster disabled");
            return;
        }

        tracing::info!(
            "📮 Scheduled poster started (interval: {:?}, publisher: {}, templates: {})",
            self.config.interval,
            self.publisher.name(),
            self.pool.len()
        );

        loop {
            let outcome = self.run_tick().await;
            ticks.fetch_add(1, Ordering::SeqCst);
            log_outcome(&outcome, self.config.max_chars);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        tracing::info!("📮 Scheduled poster stopped");
    }
}

fn log_outcome(outcome: &TickOutcome, max_chars: usize) {
    match outcome {
        TickOutcome::Posted { id } => {
            tracing::info!(post_id = %id, "📮 Scheduled post published");
        }
        TickOutcome::Skipped { chars } => {
            tracing::info!(
                chars = *chars,
                limit = max_chars,
                "📮 Scheduled post over length limit, skipping"
            );
        }
        TickOutcome::Failed { error } => {
            tracing::warn!(error = %error, "📮 Scheduled post failed");
        }
    }
}

/// Handle to a running poster
pub struct PosterHandle {
    cancel: CancellationToken,
    ticks: Arc<AtomicU64>,
    state: watch::Receiver<PosterState>,
    task: JoinHandle<()>,
}

impl PosterHandle {
    /// Current state (idle between ticks, posting while a publish call is in flight)
    pub fn state(&self) -> PosterState {
        *self.state.borrow()
    }

    /// Number of completed ticks, whatever their outcome
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the loop and wait for it to exit. An in-flight publish call
    /// completes first.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Start the poster if a publisher is configured
pub fn maybe_start_poster(
    publisher: Option<Arc<dyn Publisher>>,
    pool: MessagePool,
    interval: Duration,
) -> Option<PosterHandle> {
    let publisher = publisher?;

    let config = PosterConfig {
        interval,
        ..PosterConfig::default()
    };

    let scheduler = PostScheduler::new(publisher, pool, Some(config));

    Some(scheduler.start())
}
