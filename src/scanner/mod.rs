//! Scanner module - coordinates a mapping run.
//!
//! Work items are generated up front into a shared queue, then a fixed
//! pool of tokio workers drains it. Each worker probes one item at a time
//! and records successes in a shared result store; failures are dropped.

pub mod generator;
pub mod http;
pub mod queue;
pub mod rate_limiter;
pub mod store;
pub mod title;
pub mod traits;

use crate::output;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub use generator::generate_work;
pub use http::HttpProber;
pub use queue::WorkQueue;
pub use rate_limiter::RateLimiter;
pub use store::ResultStore;
pub use traits::{ProbeConfig, ProbeResult, Prober, StatusClass, DEFAULT_USER_AGENT};

use crate::types::WorkItem;

/// Settings for the worker pool.
#[derive(Debug, Clone)]
pub struct MapJobConfig {
    /// Number of concurrent workers.
    pub threads: usize,
    /// Global requests-per-second ceiling, 0 for unlimited.
    pub rate_limit: u32,
    /// Show the progress spinner and a line per responding service.
    pub show_progress: bool,
}

impl MapJobConfig {
    /// Default worker pool size.
    pub const DEFAULT_THREADS: usize = 30;

    /// Create a job configuration with the given pool size.
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            rate_limit: 0,
            show_progress: false,
        }
    }

    /// Set the rate limit.
    pub fn with_rate_limit(mut self, rate: u32) -> Self {
        self.rate_limit = rate;
        self
    }

    /// Enable progress output.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }
}

impl Default for MapJobConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THREADS)
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct MapRun {
    /// Successful probes in completion order.
    pub results: Vec<ProbeResult>,
    /// Number of work items attempted.
    pub items_probed: usize,
    /// Wall-clock duration of the run.
    pub duration_ms: u64,
}

/// Probe every work item with a bounded pool of workers.
///
/// Returns once every worker has finished. The result list holds exactly
/// one entry per successful probe.
pub async fn run_map(
    prober: Arc<dyn Prober>,
    items: Vec<WorkItem>,
    config: MapJobConfig,
) -> MapRun {
    let start_time = Instant::now();
    let total = items.len();

    info!(items = total, threads = config.threads, "starting run");

    let progress = if config.show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let queue = Arc::new(WorkQueue::new(items));
    let store = Arc::new(ResultStore::new());
    let limiter = RateLimiter::new(config.rate_limit);

    let handles: Vec<_> = (0..config.threads)
        .map(|id| {
            let worker = Worker {
                id,
                queue: Arc::clone(&queue),
                store: Arc::clone(&store),
                prober: Arc::clone(&prober),
                limiter: limiter.clone(),
                progress: progress.clone(),
            };
            tokio::spawn(worker.run())
        })
        .collect();

    for joined in join_all(handles).await {
        if let Err(e) = joined {
            warn!(error = %e, "worker terminated abnormally");
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    MapRun {
        results: store.drain_all(),
        items_probed: total,
        duration_ms: start_time.elapsed().as_millis() as u64,
    }
}

/// One member of the worker pool.
struct Worker {
    id: usize,
    queue: Arc<WorkQueue>,
    store: Arc<ResultStore>,
    prober: Arc<dyn Prober>,
    limiter: Option<RateLimiter>,
    progress: Option<ProgressBar>,
}

impl Worker {
    async fn run(self) {
        while let Some(item) = self.queue.pop() {
            if let Some(ref limiter) = self.limiter {
                limiter.wait().await;
            }

            let url = item.base_url();
            if let Some(ref pb) = self.progress {
                pb.set_message(format!("Testing {}", url));
            }

            match self.prober.probe(&item).await {
                Ok(result) => {
                    if let Some(ref pb) = self.progress {
                        let line = output::probe_line(&result);
                        if pb.is_hidden() {
                            println!("{}", line);
                        } else {
                            pb.println(line);
                        }
                    }
                    self.store.append(result.without_body());
                }
                Err(e) => debug!(worker = self.id, url = %url, error = %e, "probe failed"),
            }

            if let Some(ref pb) = self.progress {
                pb.inc(1);
            }
        }
        debug!(worker = self.id, "queue drained");
    }
}
