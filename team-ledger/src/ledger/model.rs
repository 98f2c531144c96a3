//! Payment period model
//!
//! A [`PaymentPeriod`] exclusively owns its [`PlayerPayment`]s, which own
//! their [`PaymentEntry`] ledgers. `player_id` is a non-owning reference into
//! the roster; the engine never checks it against a roster.
//!
//! Fields are private: derived values (`paid_amount`, `status`) have no
//! setter and are only rewritten through [`PlayerPayment::recompute`].

use super::aggregate::aggregate;
use super::error::{LedgerError, LedgerResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{PaymentEntryInput, PaymentStatus, PaymentType};
use std::collections::HashSet;

/// One recorded contribution. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentEntry {
    pub id: String,
    pub amount: Decimal,
    /// Day the payment applies to (not when it was recorded)
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
}

impl PaymentEntry {
    pub fn from_input(input: PaymentEntryInput, created_at: i64) -> Self {
        Self {
            id: input.id,
            amount: input.amount,
            date: input.date,
            note: input.note,
            created_at,
        }
    }
}

/// One player's participation in one period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPayment {
    player_id: String,
    #[serde(default)]
    entries: Vec<PaymentEntry>,
    /// Derived from `entries`
    #[serde(default)]
    paid_amount: Decimal,
    /// Derived from `paid_amount` and the period amount
    #[serde(default)]
    status: PaymentStatus,
}

impl PlayerPayment {
    pub(crate) fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            entries: Vec::new(),
            paid_amount: Decimal::ZERO,
            status: PaymentStatus::Unpaid,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[PaymentEntry] {
        &self.entries
    }

    /// Entries in display order: newest `date` first, then newest recorded.
    pub fn sorted_entries(&self) -> Vec<&PaymentEntry> {
        let mut sorted: Vec<&PaymentEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        sorted
    }

    pub fn entry(&self, entry_id: &str) -> Option<&PaymentEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn paid_amount(&self) -> Decimal {
        self.paid_amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Whether removing this player would destroy recorded payments
    pub fn has_history(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Re-derive `paid_amount` and `status`.
    pub(crate) fn recompute(&mut self, required: Decimal) {
        let agg = aggregate(&self.entries, required);
        self.paid_amount = agg.paid_amount;
        self.status = agg.status;
    }

    pub(crate) fn push_entry(&mut self, entry: PaymentEntry, required: Decimal) {
        self.entries.push(entry);
        self.recompute(required);
    }

    pub(crate) fn take_entry(&mut self, entry_id: &str, required: Decimal) -> Option<PaymentEntry> {
        let idx = self.entries.iter().position(|e| e.id == entry_id)?;
        let removed = self.entries.remove(idx);
        self.recompute(required);
        Some(removed)
    }
}

/// One billing cycle / charge definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentPeriod {
    id: String,
    title: String,
    /// Required contribution per player
    amount: Decimal,
    #[serde(rename = "type", default)]
    payment_type: PaymentType,
    /// Admin-entered lump sum, independent of `amount * participants`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_total_owed: Option<Decimal>,
    #[serde(default)]
    player_payments: Vec<PlayerPayment>,
    /// Display position among sibling periods
    #[serde(default)]
    order: u32,
    created_at: i64,
}

impl PaymentPeriod {
    /// Build a period with one unpaid payment per distinct player id.
    /// Inputs are assumed validated by the caller.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        title: String,
        amount: Decimal,
        payment_type: PaymentType,
        team_total_owed: Option<Decimal>,
        player_ids: &[String],
        order: u32,
        created_at: i64,
    ) -> Self {
        let mut seen = HashSet::new();
        let player_payments = player_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .map(|id| PlayerPayment::new(id.clone()))
            .collect();
        Self {
            id,
            title,
            amount,
            payment_type,
            team_total_owed,
            player_payments,
            order,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn is_balance_type(&self) -> bool {
        self.payment_type.is_balance_type()
    }

    pub fn team_total_owed(&self) -> Option<Decimal> {
        self.team_total_owed
    }

    pub fn player_payments(&self) -> &[PlayerPayment] {
        &self.player_payments
    }

    pub fn player_payment(&self, player_id: &str) -> Option<&PlayerPayment> {
        self.player_payments
            .iter()
            .find(|pp| pp.player_id == player_id)
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = &str> {
        self.player_payments.iter().map(|pp| pp.player_id.as_str())
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Whether any player's ledger in this period already uses `entry_id`
    pub fn contains_entry_id(&self, entry_id: &str) -> bool {
        self.player_payments
            .iter()
            .any(|pp| pp.entry(entry_id).is_some())
    }

    // ========== crate-internal mutation ==========

    pub(crate) fn player_payment_mut(&mut self, player_id: &str) -> Option<&mut PlayerPayment> {
        self.player_payments
            .iter_mut()
            .find(|pp| pp.player_id == player_id)
    }

    /// Change the required amount; every player's status is re-derived.
    pub(crate) fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
        self.recompute_all();
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
    }

    pub(crate) fn set_team_total_owed(&mut self, team_total_owed: Option<Decimal>) {
        self.team_total_owed = team_total_owed;
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Returns false if the player was already a participant.
    pub(crate) fn add_player(&mut self, player_id: &str) -> bool {
        if self.player_payment(player_id).is_some() {
            return false;
        }
        let mut pp = PlayerPayment::new(player_id);
        pp.recompute(self.amount);
        self.player_payments.push(pp);
        true
    }

    pub(crate) fn remove_player(&mut self, player_id: &str) -> Option<PlayerPayment> {
        let idx = self
            .player_payments
            .iter()
            .position(|pp| pp.player_id == player_id)?;
        Some(self.player_payments.remove(idx))
    }

    pub(crate) fn recompute_all(&mut self) {
        let required = self.amount;
        for pp in &mut self.player_payments {
            pp.recompute(required);
        }
    }

    /// Check invariants of externally supplied data and re-derive every
    /// projection. Cached `paid_amount`/`status` in the input are ignored.
    pub(crate) fn normalize(&mut self) -> LedgerResult<()> {
        if self.id.trim().is_empty() {
            return Err(LedgerError::validation("payment period id must not be empty"));
        }
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "payment period {} has negative amount {}",
                self.id, self.amount
            )));
        }
        if let Some(total) = self.team_total_owed
            && total < Decimal::ZERO
        {
            return Err(LedgerError::validation(format!(
                "payment period {} has negative team total owed {}",
                self.id, total
            )));
        }

        let mut players = HashSet::new();
        let mut entry_ids = HashSet::new();
        for pp in &self.player_payments {
            if !players.insert(pp.player_id.as_str()) {
                return Err(LedgerError::validation(format!(
                    "payment period {} lists player {} twice",
                    self.id, pp.player_id
                )));
            }
            for entry in &pp.entries {
                if entry.amount <= Decimal::ZERO {
                    return Err(LedgerError::InvalidAmount(entry.amount));
                }
                if !entry_ids.insert(entry.id.as_str()) {
                    return Err(LedgerError::DuplicateId(entry.id.clone()));
                }
            }
        }

        self.recompute_all();
        Ok(())
    }
}
