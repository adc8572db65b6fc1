//! Live watch sessions: an initial window followed by polled updates.

pub mod sse;

use std::time::Duration;
use tokio_stream::Stream;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::debug_log::DebugLog;
use crate::error::TailResult;
use crate::parser::EntryCollection;

pub use sse::{SseDispatcher, SseFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    /// Reading the initial window (happens exactly once).
    InitialFetch,
    Watching,
    Stopped,
}

/// Returns true if cancelled before the sleep elapsed.
async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// One sequential watch session over a [`DebugLog`].
pub struct Watcher {
    log: DebugLog,
    interval: Duration,
    initial_lines: u64,
    cancel: CancellationToken,
    state: WatchState,
    sleep_owed: bool,
}

impl Watcher {
    pub fn new(log: DebugLog, config: &WatchConfig, cancel: CancellationToken) -> Self {
        Self {
            log,
            interval: config.interval(),
            initial_lines: config.initial_lines,
            cancel,
            state: WatchState::Idle,
            sleep_owed: false,
        }
    }

    /// Override the tick interval for this session.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.interval = interval;
        }
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Advance the session to its next non-empty batch.
    ///
    /// `None` once the session is stopped (cancelled, or after an error was
    /// returned).
    pub async fn next_batch(&mut self) -> Option<TailResult<EntryCollection>> {
        loop {
            if self.cancel.is_cancelled() {
                self.stop();
            }

            match self.state {
                WatchState::Idle => {
                    info!(
                        path = %self.log.path().display(),
                        interval_ms = self.interval.as_millis() as u64,
                        initial_lines = self.initial_lines,
                        "watch session started"
                    );
                    self.state = WatchState::InitialFetch;
                }
                WatchState::InitialFetch => {
                    return match self.log.last_lines(self.initial_lines, None, false).await {
                        Ok(batch) => {
                            self.state = WatchState::Watching;
                            Some(Ok(batch))
                        }
                        Err(e) => {
                            self.stop();
                            Some(Err(e))
                        }
                    };
                }
                WatchState::Watching => {
                    if self.sleep_owed {
                        self.sleep_owed = false;
                        if sleep_or_cancel(self.interval, &self.cancel).await {
                            self.stop();
                            continue;
                        }
                    }

                    match self.log.updates().await {
                        Ok(batch) => {
                            self.sleep_owed = true;
                            if !batch.is_empty() {
                                debug!(
                                    entries = batch.len(),
                                    start = batch.start_line,
                                    end = batch.end_line,
                                    "new entries"
                                );
                                return Some(Ok(batch));
                            }
                        }
                        Err(e) => {
                            self.stop();
                            return Some(Err(e));
                        }
                    }
                }
                WatchState::Stopped => return None,
            }
        }
    }

    /// The session as a stream of batches. Ends after the first error or on
    /// cancellation.
    pub fn into_stream(mut self) -> impl Stream<Item = TailResult<EntryCollection>> + Send {
        async_stream::stream! {
            while let Some(item) = self.next_batch().await {
                yield item;
            }
        }
    }

    fn stop(&mut self) {
        if self.state != WatchState::Stopped {
            info!(path = %self.log.path().display(), "watch session stopped");
            self.state = WatchState::Stopped;
        }
    }
}
