//! SyncWorker - background task draining the ledger outbox
//!
//! Receives [`SyncItem`]s from [`super::LedgerService`], debounces them,
//! keeps only the latest change per resource and pushes the result as one
//! batch with exponential backoff.
//!
//! A batch goes out once edits pause for `debounce`, and never later than
//! `max_wait` after the oldest pending change. A batch that still fails after
//! `max_retries` attempts stays pending and is retried on a doubling timer,
//! so delivery does not depend on the user making another edit.

use shared::error::AppError;
use shared::sync::{SyncBatch, SyncItem, SyncResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::SyncTransport;
use crate::core::Config;

/// Cap for the backoff delay between attempts
const MAX_RETRY_DELAY_SECS: u64 = 60;

type PendingKey = (String, String);

/// Worker tuning
#[derive(Debug, Clone)]
pub struct SyncWorkerOptions {
    pub device_id: String,
    pub debounce: Duration,
    /// Upper bound on how long continuous edits can postpone a flush
    pub max_wait: Duration,
    pub max_retries: u32,
    pub initial_retry_delay: Duration,
}

impl SyncWorkerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            device_id: config.device_id.clone(),
            debounce: Duration::from_millis(config.sync_debounce_ms),
            max_wait: Duration::from_millis(config.sync_max_wait_ms),
            max_retries: config.sync_max_retries.max(1),
            initial_retry_delay: Duration::from_millis(config.sync_retry_delay_ms),
        }
    }
}

pub struct SyncWorker {
    transport: Arc<dyn SyncTransport>,
    outbox: mpsc::UnboundedReceiver<SyncItem>,
    options: SyncWorkerOptions,
    shutdown: CancellationToken,
}

impl SyncWorker {
    pub fn new(
        transport: Arc<dyn SyncTransport>,
        outbox: mpsc::UnboundedReceiver<SyncItem>,
        options: SyncWorkerOptions,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            transport,
            outbox,
            options,
            shutdown,
        }
    }

    /// Run until cancelled or until every [`super::LedgerService`] handle
    /// is dropped. Pending items are flushed once before returning.
    pub async fn run(mut self) {
        tracing::info!(device_id = %self.options.device_id, "SyncWorker started");

        let mut pending: HashMap<PendingKey, SyncItem> = HashMap::new();
        let mut debounce_deadline: Option<Instant> = None;
        // oldest change not yet delivered
        let mut first_pending_at: Option<Instant> = None;
        // set while a failed batch waits for its next attempt
        let mut retry_at: Option<Instant> = None;
        let mut retry_delay = self.initial_backoff();

        loop {
            let sleep_until =
                debounce_deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("SyncWorker shutting down");
                    self.drain_channel(&mut pending);
                    self.final_flush(&mut pending).await;
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if debounce_deadline.is_some() => {
                    if self.flush_pending(&mut pending).await {
                        debounce_deadline = None;
                        first_pending_at = None;
                        retry_at = None;
                        retry_delay = self.initial_backoff();
                    } else {
                        let at = Instant::now() + retry_delay;
                        tracing::warn!(
                            pending = pending.len(),
                            delay_ms = retry_delay.as_millis() as u64,
                            "Sync batch kept, next attempt scheduled"
                        );
                        debounce_deadline = Some(at);
                        retry_at = Some(at);
                        retry_delay = next_delay(retry_delay);
                    }
                }

                received = self.outbox.recv() => {
                    match received {
                        Some(item) => {
                            coalesce(&mut pending, item);
                            let now = Instant::now();
                            let first = *first_pending_at.get_or_insert(now);
                            let due = (now + self.options.debounce).min(first + self.options.max_wait);
                            debounce_deadline = Some(retry_at.map_or(due, |at| due.max(at)));
                        }
                        None => {
                            tracing::info!("Outbox closed, SyncWorker stopping");
                            self.final_flush(&mut pending).await;
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("SyncWorker stopped");
    }

    fn drain_channel(&mut self, pending: &mut HashMap<PendingKey, SyncItem>) {
        while let Ok(item) = self.outbox.try_recv() {
            coalesce(pending, item);
        }
    }

    /// Push everything pending. Returns `false` when the push failed; the
    /// items then stay pending (unless superseded meanwhile) and go out with
    /// the next flush.
    async fn flush_pending(&self, pending: &mut HashMap<PendingKey, SyncItem>) -> bool {
        let mut items: Vec<SyncItem> = pending.drain().map(|(_, item)| item).collect();
        if items.is_empty() {
            return true;
        }
        items.sort_by_key(|item| item.version);

        let count = items.len();
        let batch = SyncBatch {
            device_id: self.options.device_id.clone(),
            items,
            sent_at: shared::util::now_millis(),
        };

        match self.push_with_retry(&batch).await {
            Ok(resp) => {
                if resp.rejected > 0 {
                    tracing::warn!(
                        accepted = resp.accepted,
                        rejected = resp.rejected,
                        errors = ?resp.errors,
                        "Remote store rejected sync items"
                    );
                } else {
                    tracing::debug!(accepted = resp.accepted, "Flushed {count} sync items");
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to push sync batch after retries: {e}");
                for item in batch.items {
                    pending.entry(item.key()).or_insert(item);
                }
                false
            }
        }
    }

    /// First wait after a failed flush; never shorter than one debounce window
    fn initial_backoff(&self) -> Duration {
        self.options.initial_retry_delay.max(self.options.debounce)
    }

    async fn final_flush(&self, pending: &mut HashMap<PendingKey, SyncItem>) {
        self.flush_pending(pending).await;
        if !pending.is_empty() {
            tracing::error!(dropped = pending.len(), "Sync items dropped at shutdown");
            pending.clear();
        }
    }

    /// Push batch with exponential backoff retry
    async fn push_with_retry(&self, batch: &SyncBatch) -> Result<SyncResponse, AppError> {
        let max_retries = self.options.max_retries.max(1);
        let mut delay = self.options.initial_retry_delay;
        let mut last_err = None;

        for attempt in 0..max_retries {
            match self.transport.push_batch(batch).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt + 1 < max_retries => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Sync attempt failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay);
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| AppError::internal("Sync push was never attempted")))
    }
}

/// Double `delay`, at least 1ms and at most [`MAX_RETRY_DELAY_SECS`]
fn next_delay(delay: Duration) -> Duration {
    (delay * 2).clamp(Duration::from_millis(1), Duration::from_secs(MAX_RETRY_DELAY_SECS))
}

/// Keep only the newest change per resource
fn coalesce(pending: &mut HashMap<PendingKey, SyncItem>, item: SyncItem) {
    match pending.get(&item.key()) {
        Some(existing) if existing.version > item.version => {}
        _ => {
            pending.insert(item.key(), item);
        }
    }
}
