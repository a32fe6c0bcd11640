//! Polling timers for the board
//!
//! Two independent periodic tasks drive recomputation: a fast tick that
//! advances "now" for the countdown summary (pure compute, no I/O) and a
//! slow fetch that replaces the order snapshot wholesale. Both are owned by
//! an explicit handle so every exit path releases them together.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::core::state::BoardState;
use crate::traits::OrderSource;

/// Cadence configuration for the two board timers.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Countdown recomputation cadence.
    pub tick_interval: Duration,
    /// Order snapshot refresh cadence.
    pub fetch_interval: Duration,
    /// Status sections to summarize on each tick.
    pub sections: Vec<String>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            fetch_interval: Duration::from_secs(300),
            sections: Vec::new(),
        }
    }
}

/// Handle owning both timer tasks.
///
/// Dropping the handle cancels both tasks, so the timers are released on
/// every exit path, including error paths.
pub struct PollerHandle {
    tick_task: JoinHandle<()>,
    fetch_task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop both timers, consuming the handle.
    pub fn stop(self) {
        self.tick_task.abort();
        self.fetch_task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.tick_task.abort();
        self.fetch_task.abort();
    }
}

/// Start the board timers against the given source and state.
///
/// The fetch loop fires immediately on start and then on every interval.
/// A failed fetch logs a warning and leaves the previous snapshot in place;
/// the next interval is the retry. A stale in-flight response simply
/// overwrites state last-write-wins, which is fine at this data scale.
pub fn start<S>(source: Arc<S>, state: Arc<RwLock<BoardState>>, config: PollerConfig) -> PollerHandle
where
    S: OrderSource + ?Sized + 'static,
{
    let fetch_task = tokio::spawn({
        let state = state.clone();
        let sections = config.sections.clone();
        let fetch_interval = config.fetch_interval;
        async move {
            let mut interval = tokio::time::interval(fetch_interval);
            loop {
                interval.tick().await;
                match source.fetch_orders().await {
                    Ok(orders) => {
                        let now = Utc::now();
                        info!("Order snapshot replaced: {} orders", orders.len());
                        let mut guard = state.write().await;
                        guard.replace_orders(orders, now);
                        guard.recompute_summary(&sections, now);
                    }
                    Err(e) => {
                        warn!("Order fetch failed, keeping previous snapshot: {e}");
                        state.write().await.record_fetch_error(e.to_string());
                    }
                }
            }
        }
    });

    let tick_task = tokio::spawn({
        let sections = config.sections;
        let tick_interval = config.tick_interval;
        async move {
            let mut interval = tokio::time::interval(tick_interval);
            loop {
                interval.tick().await;
                state.write().await.recompute_summary(&sections, Utc::now());
            }
        }
    });

    PollerHandle { tick_task, fetch_task }
}
