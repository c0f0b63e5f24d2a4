//! News Monitor Service
//!
//! Owns the orchestrator and the article store. Fetch cycles are serialized:
//! a trigger that arrives while a cycle runs waits for it to finish. Reads
//! only take the store lock, so queries stay responsive during network I/O.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use monitor_core::{Article, ArticleQuery};

use crate::orchestrator::{CycleReport, IngestionOrchestrator};
use crate::store::ArticleStore;

#[derive(Debug, Default)]
struct MonitorState {
    store: ArticleStore,
    /// When the last cycle finished
    last_fetch: Option<DateTime<Utc>>,
    /// When the last cycle started; freshness is measured from here
    last_cycle_started: Option<DateTime<Utc>>,
}

/// Point-in-time view of the monitor
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatus {
    pub last_fetch: Option<DateTime<Utc>>,
    pub total_tracked: usize,
    pub classifier: &'static str,
}

impl MonitorStatus {
    /// Human-readable last fetch time, or "Never"
    pub fn last_fetch_label(&self) -> String {
        self.last_fetch
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}

/// Long-lived monitor composing the pipeline
pub struct NewsMonitor {
    orchestrator: IngestionOrchestrator,
    state: RwLock<MonitorState>,
    cycle_lock: Mutex<()>,
    refresh_interval: Duration,
}

impl NewsMonitor {
    /// Create a monitor with an empty store; `refresh_interval` is both the
    /// scheduler period and the cache TTL
    pub fn new(orchestrator: IngestionOrchestrator, refresh_interval: Duration) -> Self {
        Self {
            orchestrator,
            state: RwLock::new(MonitorState::default()),
            cycle_lock: Mutex::new(()),
            refresh_interval,
        }
    }

    /// Run a fetch cycle now, after any cycle already in progress
    pub async fn fetch_now(&self) -> CycleReport {
        let _cycle = self.cycle_lock.lock().await;
        self.run_locked().await
    }

    /// Run a fetch cycle only if the last one is older than the refresh interval
    pub async fn refresh_if_stale(&self) -> Option<CycleReport> {
        let _cycle = self.cycle_lock.lock().await;

        let started = self.state.read().await.last_cycle_started;
        if !is_stale(started, Utc::now(), self.refresh_interval) {
            debug!("Articles are fresh (last cycle started {:?}), skipping cycle", started);
            return None;
        }

        Some(self.run_locked().await)
    }

    async fn run_locked(&self) -> CycleReport {
        let batch = self.orchestrator.gather().await;

        let mut state = self.state.write().await;
        let report = batch.merge_into(&mut state.store);
        state.last_fetch = Some(report.finished_at);
        state.last_cycle_started = Some(report.started_at);

        info!(
            "Fetch cycle complete: {} fetched, {} new, {} tracked, {} source failures",
            report.fetched,
            report.admitted,
            report.total,
            report.failures.len()
        );
        report
    }

    /// Filtered, ordered copy of the stored articles
    pub async fn query(&self, query: &ArticleQuery) -> Vec<Article> {
        let state = self.state.read().await;
        query
            .apply(state.store.snapshot())
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn status(&self) -> MonitorStatus {
        let state = self.state.read().await;
        MonitorStatus {
            last_fetch: state.last_fetch,
            total_tracked: state.store.len(),
            classifier: self.orchestrator.classifier().tier().as_str(),
        }
    }

    /// Fetch once immediately, then refresh whenever the cache expires
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            "Starting NewsMonitor with refresh interval {}s",
            self.refresh_interval.as_secs()
        );

        tokio::spawn(async move {
            self.fetch_now().await;

            if self.refresh_interval.is_zero() {
                warn!("Refresh interval is zero; periodic refresh disabled");
                return;
            }

            let mut ticker = interval(self.refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick fires immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                self.refresh_if_stale().await;
            }
        })
    }
}

/// Never fetched, or the last cycle started about `ttl` ago or earlier.
///
/// A tenth of `ttl` is allowed as slack so that a tick arriving a little
/// early relative to the previous cycle's start still refreshes.
fn is_stale(cycle_started: Option<DateTime<Utc>>, now: DateTime<Utc>, ttl: Duration) -> bool {
    let Some(at) = cycle_started else {
        return true;
    };
    match chrono::Duration::from_std(ttl - ttl / 10) {
        Ok(threshold) => now - at >= threshold,
        Err(_) => false,
    }
}
