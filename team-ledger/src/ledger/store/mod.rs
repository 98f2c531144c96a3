//! PaymentLedgerStore - period management and ledger dispatch
//!
//! Owns every payment period of a team. Passed explicitly (by reference or
//! behind a lock) to whoever needs it; there is no global instance.
//!
//! # Mutation Flow
//!
//! ```text
//! mutator(args)
//!     ├─ 1. Resolve period (NotFound)
//!     ├─ 2. Validate all inputs (Validation / InvalidAmount / DuplicateId)
//!     ├─ 3. Apply change
//!     └─ 4. Re-aggregate affected player payments
//! ```
//!
//! Nothing is written before step 3, so a failed call leaves the store
//! exactly as it was.

#[cfg(test)]
mod tests;

use super::entries;
use super::error::{LedgerError, LedgerResult};
use super::model::{PaymentEntry, PaymentPeriod, PlayerPayment};
use super::money;
use super::reconcile::PeriodView;
use super::snapshot::{LedgerSnapshot, SnapshotError, SnapshotResult};
use super::validation::{MAX_TITLE_LEN, validate_id, validate_required_text};
use rust_decimal::Decimal;
use shared::models::{PaymentEntryInput, PaymentPeriodCreate, PaymentType};
use shared::util::now_millis;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// In-memory payment ledger for one team
#[derive(Debug, Clone, Default)]
pub struct PaymentLedgerStore {
    periods: HashMap<String, PaymentPeriod>,
}

impl PaymentLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Snapshot ==========

    /// Rebuild a store from persisted data.
    ///
    /// Every period is checked and re-aggregated; display order is
    /// renumbered to `0..n` keeping the persisted relative order.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> SnapshotResult<Self> {
        let mut periods = HashMap::with_capacity(snapshot.periods.len());
        for (key, mut period) in snapshot.periods {
            if key != period.id() {
                return Err(SnapshotError::KeyMismatch {
                    key,
                    id: period.id().to_string(),
                });
            }
            period.normalize()?;
            periods.insert(key, period);
        }

        let mut store = Self { periods };
        let ordered = store.ordered_ids();
        store.renumber(&ordered);
        Ok(store)
    }

    pub fn export_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            version: super::snapshot::SNAPSHOT_VERSION,
            periods: self
                .periods
                .iter()
                .map(|(id, p)| (id.clone(), p.clone()))
                .collect(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> SnapshotResult<Self> {
        Self::from_snapshot(LedgerSnapshot::load_from_file(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SnapshotResult<()> {
        self.export_snapshot().save_to_file(path)
    }

    // ========== Queries ==========

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn period(&self, period_id: &str) -> Option<&PaymentPeriod> {
        self.periods.get(period_id)
    }

    pub fn get_period(&self, period_id: &str) -> LedgerResult<&PaymentPeriod> {
        self.periods
            .get(period_id)
            .ok_or_else(|| LedgerError::period_not_found(period_id))
    }

    /// Periods in display order
    pub fn periods(&self) -> Vec<&PaymentPeriod> {
        let mut list: Vec<&PaymentPeriod> = self.periods.values().collect();
        list.sort_by(|a, b| {
            a.order()
                .cmp(&b.order())
                .then_with(|| a.created_at().cmp(&b.created_at()))
                .then_with(|| a.id().cmp(b.id()))
        });
        list
    }

    /// Period ids in display order
    pub fn ordered_ids(&self) -> Vec<String> {
        self.periods().iter().map(|p| p.id().to_string()).collect()
    }

    /// Periods the player participates in, in display order
    pub fn periods_for_player(&self, player_id: &str) -> Vec<&PaymentPeriod> {
        self.periods()
            .into_iter()
            .filter(|p| p.player_payment(player_id).is_some())
            .collect()
    }

    pub fn player_payment(&self, period_id: &str, player_id: &str) -> LedgerResult<&PlayerPayment> {
        self.get_period(period_id)?
            .player_payment(player_id)
            .ok_or_else(|| LedgerError::player_not_found(period_id, player_id))
    }

    /// Whether removing the player would destroy recorded entries.
    /// Callers should confirm with the user before `remove_participant`.
    pub fn has_history(&self, period_id: &str, player_id: &str) -> LedgerResult<bool> {
        Ok(self.player_payment(period_id, player_id)?.has_history())
    }

    /// Participants whose id is not in the roster's current player set.
    ///
    /// The engine never cascades a roster removal; the display layer decides
    /// whether to hide these or the admin removes them explicitly.
    pub fn orphaned_players(
        &self,
        period_id: &str,
        known_player_ids: &HashSet<String>,
    ) -> LedgerResult<Vec<String>> {
        Ok(self
            .get_period(period_id)?
            .participant_ids()
            .filter(|id| !known_player_ids.contains(*id))
            .map(str::to_string)
            .collect())
    }

    /// Reconciliation view over one period
    pub fn view(&self, period_id: &str) -> LedgerResult<PeriodView<'_>> {
        Ok(PeriodView::new(self.get_period(period_id)?))
    }

    // ========== Period management ==========

    /// Create a period with an explicit initial roster, appended last.
    pub fn create_period(&mut self, input: PaymentPeriodCreate) -> LedgerResult<&PaymentPeriod> {
        validate_required_text(&input.title, "title", MAX_TITLE_LEN)?;
        money::validate_period_amount(input.amount, "amount")?;
        if let Some(total) = input.team_total_owed {
            money::validate_team_total(total)?;
        }
        if input.player_ids.is_empty() {
            return Err(LedgerError::validation(
                "a payment period needs at least one participant",
            ));
        }
        for player_id in &input.player_ids {
            validate_id(player_id, "player id")?;
        }

        let id = uuid::Uuid::new_v4().to_string();
        let order = self.next_order();
        let period = PaymentPeriod::new(
            id.clone(),
            input.title.trim().to_string(),
            input.amount,
            input.payment_type,
            input.team_total_owed,
            &input.player_ids,
            order,
            now_millis(),
        );

        tracing::debug!(
            period_id = %id,
            title = %period.title(),
            amount = %period.amount(),
            payment_type = period.payment_type().as_str(),
            participants = period.player_payments().len(),
            "Payment period created"
        );
        Ok(self.periods.entry(id).or_insert(period))
    }

    /// Change the required per-player amount. Entries are untouched; every
    /// player's status is re-derived against the new amount.
    pub fn update_amount(&mut self, period_id: &str, amount: Decimal) -> LedgerResult<&PaymentPeriod> {
        money::validate_period_amount(amount, "amount")?;
        let period = self.period_mut(period_id)?;
        let previous = period.amount();
        period.set_amount(amount);
        tracing::debug!(period_id = %period_id, %previous, %amount, "Payment period amount updated");
        Ok(period)
    }

    /// Set or clear (`None`) the team total owed.
    pub fn set_team_total_owed(
        &mut self,
        period_id: &str,
        team_total_owed: Option<Decimal>,
    ) -> LedgerResult<&PaymentPeriod> {
        if let Some(total) = team_total_owed {
            money::validate_team_total(total)?;
        }
        let period = self.period_mut(period_id)?;
        period.set_team_total_owed(team_total_owed);
        tracing::debug!(period_id = %period_id, team_total_owed = ?team_total_owed, "Team total owed updated");
        Ok(period)
    }

    pub fn rename_period(&mut self, period_id: &str, title: &str) -> LedgerResult<&PaymentPeriod> {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
        let period = self.period_mut(period_id)?;
        period.set_title(title.trim().to_string());
        Ok(period)
    }

    /// Change the presentation class. Status math is the same for all types.
    pub fn set_payment_type(
        &mut self,
        period_id: &str,
        payment_type: PaymentType,
    ) -> LedgerResult<&PaymentPeriod> {
        let period = self.period_mut(period_id)?;
        period.set_payment_type(payment_type);
        Ok(period)
    }

    /// Add a player with an empty ledger. Returns `false` (and changes
    /// nothing) if the player already participates.
    pub fn add_participant(&mut self, period_id: &str, player_id: &str) -> LedgerResult<bool> {
        validate_id(player_id, "player id")?;
        let period = self.period_mut(period_id)?;
        let added = period.add_player(player_id);
        if added {
            tracing::debug!(period_id = %period_id, player_id = %player_id, "Participant added");
        }
        Ok(added)
    }

    /// Remove a player and destroy their entries.
    ///
    /// Unconditional once called; use [`Self::has_history`] to warn first.
    pub fn remove_participant(&mut self, period_id: &str, player_id: &str) -> LedgerResult<PlayerPayment> {
        let period = self.period_mut(period_id)?;
        let removed = period
            .remove_player(player_id)
            .ok_or_else(|| LedgerError::player_not_found(period_id, player_id))?;
        tracing::warn!(
            period_id = %period_id,
            player_id = %player_id,
            entries_deleted = removed.entries().len(),
            paid_amount = %removed.paid_amount(),
            "Participant removed"
        );
        Ok(removed)
    }

    /// Replace the full display order.
    ///
    /// `ids` must contain every existing period exactly once; otherwise the
    /// call fails and the previous order is kept.
    pub fn reorder(&mut self, ids: &[String]) -> LedgerResult<()> {
        if ids.len() != self.periods.len() {
            return Err(LedgerError::validation(format!(
                "reorder lists {} periods, expected {}",
                ids.len(),
                self.periods.len()
            )));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                return Err(LedgerError::validation(format!(
                    "reorder lists period {id} twice"
                )));
            }
            if !self.periods.contains_key(id) {
                return Err(LedgerError::validation(format!(
                    "reorder lists unknown period {id}"
                )));
            }
        }
        self.renumber(ids);
        Ok(())
    }

    /// Swap the period at `index` with the one above it.
    /// No-op (returns `false`) at the top or out of range.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.periods.len() {
            return false;
        }
        self.swap_adjacent(index - 1)
    }

    /// Swap the period at `index` with the one below it.
    /// No-op (returns `false`) at the bottom or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.periods.len().saturating_sub(1) {
            return false;
        }
        self.swap_adjacent(index)
    }

    /// Delete a period with all of its player payments and entries.
    pub fn delete_period(&mut self, period_id: &str) -> LedgerResult<PaymentPeriod> {
        let removed = self
            .periods
            .remove(period_id)
            .ok_or_else(|| LedgerError::period_not_found(period_id))?;
        let ordered = self.ordered_ids();
        self.renumber(&ordered);
        tracing::warn!(
            period_id = %period_id,
            participants = removed.player_payments().len(),
            "Payment period deleted"
        );
        Ok(removed)
    }

    // ========== Entry ledger ==========

    pub fn add_entry(
        &mut self,
        period_id: &str,
        player_id: &str,
        input: PaymentEntryInput,
    ) -> LedgerResult<&PlayerPayment> {
        let period = self.period_mut(period_id)?;
        entries::add_entry(period, player_id, input, now_millis())
    }

    pub fn remove_entry(
        &mut self,
        period_id: &str,
        player_id: &str,
        entry_id: &str,
    ) -> LedgerResult<PaymentEntry> {
        let period = self.period_mut(period_id)?;
        entries::remove_entry(period, player_id, entry_id)
    }

    // ========== Internal ==========

    fn period_mut(&mut self, period_id: &str) -> LedgerResult<&mut PaymentPeriod> {
        self.periods
            .get_mut(period_id)
            .ok_or_else(|| LedgerError::period_not_found(period_id))
    }

    fn next_order(&self) -> u32 {
        self.periods
            .values()
            .map(|p| p.order() + 1)
            .max()
            .unwrap_or(0)
    }

    fn swap_adjacent(&mut self, upper: usize) -> bool {
        let mut ordered = self.ordered_ids();
        ordered.swap(upper, upper + 1);
        self.renumber(&ordered);
        true
    }

    /// Assign `order = position` following `ordered_ids`.
    fn renumber(&mut self, ordered_ids: &[String]) {
        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(period) = self.periods.get_mut(id) {
                period.set_order(position as u32);
            }
        }
    }
}
