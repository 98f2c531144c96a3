//! LedgerService - shared store handle with an outbox
//!
//! Every successful mutation runs on the local store first and then queues
//! a [`SyncItem`] for the [`super::SyncWorker`]. The caller only sees the
//! local result; a failed mutation queues nothing.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{PaymentEntryInput, PaymentPeriodCreate, PaymentType};
use shared::sync::{RESOURCE_PAYMENT_PERIOD, SyncAction, SyncItem};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

use crate::ledger::{
    LedgerResult, LedgerSnapshot, PaymentEntry, PaymentLedgerStore, PaymentPeriod, PlayerPayment,
    SnapshotResult,
};

/// Cloneable handle to one team's ledger
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<RwLock<PaymentLedgerStore>>,
    outbox: mpsc::UnboundedSender<SyncItem>,
    /// Seeded from the wall clock so versions keep increasing across restarts
    version: Arc<AtomicU64>,
}

impl LedgerService {
    /// Wrap a store; the receiver goes to a [`super::SyncWorker`].
    pub fn new(store: PaymentLedgerStore) -> (Self, mpsc::UnboundedReceiver<SyncItem>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let seed = u64::try_from(shared::util::now_millis()).unwrap_or_default();
        let service = Self {
            store: Arc::new(RwLock::new(store)),
            outbox: tx,
            version: Arc::new(AtomicU64::new(seed)),
        };
        (service, rx)
    }

    /// Run a read-only closure against the store
    pub fn read<R>(&self, f: impl FnOnce(&PaymentLedgerStore) -> R) -> R {
        f(&*self.store.read())
    }

    pub fn export_snapshot(&self) -> LedgerSnapshot {
        self.store.read().export_snapshot()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SnapshotResult<()> {
        self.store.read().save(path)
    }

    /// Queue an upsert for every period, e.g. after a restore
    pub fn enqueue_full_sync(&self) -> usize {
        let store = self.store.read();
        let periods = store.periods();
        for period in &periods {
            self.enqueue_upsert(period);
        }
        tracing::info!(periods = periods.len(), "Full ledger sync queued");
        periods.len()
    }

    // ========== Period management ==========

    pub fn create_period(&self, input: PaymentPeriodCreate) -> LedgerResult<PaymentPeriod> {
        let mut store = self.store.write();
        let period = store.create_period(input)?.clone();
        self.enqueue_upsert(&period);
        Ok(period)
    }

    pub fn update_amount(&self, period_id: &str, amount: Decimal) -> LedgerResult<PaymentPeriod> {
        self.mutate_period(|store| store.update_amount(period_id, amount))
    }

    pub fn set_team_total_owed(
        &self,
        period_id: &str,
        team_total_owed: Option<Decimal>,
    ) -> LedgerResult<PaymentPeriod> {
        self.mutate_period(|store| store.set_team_total_owed(period_id, team_total_owed))
    }

    pub fn rename_period(&self, period_id: &str, title: &str) -> LedgerResult<PaymentPeriod> {
        self.mutate_period(|store| store.rename_period(period_id, title))
    }

    pub fn set_payment_type(
        &self,
        period_id: &str,
        payment_type: PaymentType,
    ) -> LedgerResult<PaymentPeriod> {
        self.mutate_period(|store| store.set_payment_type(period_id, payment_type))
    }

    pub fn add_participant(&self, period_id: &str, player_id: &str) -> LedgerResult<bool> {
        let mut store = self.store.write();
        let added = store.add_participant(period_id, player_id)?;
        if added {
            self.enqueue_period(&store, period_id);
        }
        Ok(added)
    }

    pub fn remove_participant(&self, period_id: &str, player_id: &str) -> LedgerResult<PlayerPayment> {
        let mut store = self.store.write();
        let removed = store.remove_participant(period_id, player_id)?;
        self.enqueue_period(&store, period_id);
        Ok(removed)
    }

    pub fn reorder(&self, ids: &[String]) -> LedgerResult<()> {
        let mut store = self.store.write();
        let before = order_map(&store);
        store.reorder(ids)?;
        self.enqueue_reordered(&store, &before);
        Ok(())
    }

    pub fn move_up(&self, index: usize) -> bool {
        let mut store = self.store.write();
        let before = order_map(&store);
        let moved = store.move_up(index);
        if moved {
            self.enqueue_reordered(&store, &before);
        }
        moved
    }

    pub fn move_down(&self, index: usize) -> bool {
        let mut store = self.store.write();
        let before = order_map(&store);
        let moved = store.move_down(index);
        if moved {
            self.enqueue_reordered(&store, &before);
        }
        moved
    }

    pub fn delete_period(&self, period_id: &str) -> LedgerResult<PaymentPeriod> {
        let mut store = self.store.write();
        let before = order_map(&store);
        let removed = store.delete_period(period_id)?;
        self.enqueue(SyncAction::Delete, period_id, serde_json::Value::Null);
        self.enqueue_reordered(&store, &before);
        Ok(removed)
    }

    // ========== Entry ledger ==========

    pub fn add_entry(
        &self,
        period_id: &str,
        player_id: &str,
        input: PaymentEntryInput,
    ) -> LedgerResult<PlayerPayment> {
        let mut store = self.store.write();
        let pp = store.add_entry(period_id, player_id, input)?.clone();
        self.enqueue_period(&store, period_id);
        Ok(pp)
    }

    pub fn remove_entry(
        &self,
        period_id: &str,
        player_id: &str,
        entry_id: &str,
    ) -> LedgerResult<PaymentEntry> {
        let mut store = self.store.write();
        let removed = store.remove_entry(period_id, player_id, entry_id)?;
        self.enqueue_period(&store, period_id);
        Ok(removed)
    }

    // ========== Outbox ==========

    fn mutate_period(
        &self,
        f: impl FnOnce(&mut PaymentLedgerStore) -> LedgerResult<&PaymentPeriod>,
    ) -> LedgerResult<PaymentPeriod> {
        let mut store = self.store.write();
        let period = f(&mut *store)?.clone();
        self.enqueue_upsert(&period);
        Ok(period)
    }

    fn enqueue_period(&self, store: &PaymentLedgerStore, period_id: &str) {
        if let Some(period) = store.period(period_id) {
            self.enqueue_upsert(period);
        }
    }

    /// Upsert every period whose display order changed
    fn enqueue_reordered(&self, store: &PaymentLedgerStore, before: &HashMap<String, u32>) {
        for period in store.periods() {
            if before.get(period.id()) != Some(&period.order()) {
                self.enqueue_upsert(period);
            }
        }
    }

    fn enqueue_upsert(&self, period: &PaymentPeriod) {
        match serde_json::to_value(period) {
            Ok(data) => self.enqueue(SyncAction::Upsert, period.id(), data),
            Err(e) => {
                tracing::error!(period_id = %period.id(), "Failed to serialize period for sync: {e}");
            }
        }
    }

    fn enqueue(&self, action: SyncAction, resource_id: &str, data: serde_json::Value) {
        let item = SyncItem {
            resource: RESOURCE_PAYMENT_PERIOD.to_string(),
            version: self.version.fetch_add(1, Ordering::Relaxed) + 1,
            action,
            resource_id: resource_id.to_string(),
            data,
        };
        if self.outbox.send(item).is_err() {
            tracing::debug!(resource_id = %resource_id, "Outbox closed, change kept locally only");
        }
    }
}

fn order_map(store: &PaymentLedgerStore) -> HashMap<String, u32> {
    store
        .periods()
        .into_iter()
        .map(|p| (p.id().to_string(), p.order()))
        .collect()
}
