//! Reconciliation view model
//!
//! Read-only aggregates computed on demand from the ledger. Nothing here is
//! cached or persisted; a [`PeriodView`] borrows the period and recomputes
//! every figure on each call.

use super::error::{LedgerError, LedgerResult};
use super::model::{PaymentPeriod, PlayerPayment};
use super::money;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{PaymentStatus, PaymentType};

/// Team-level roll-up of one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub period_id: String,
    pub payment_type: PaymentType,
    pub is_balance_type: bool,
    pub participants: usize,
    pub paid_count: usize,
    pub partial_count: usize,
    pub unpaid_count: usize,
    pub team_collected: Decimal,
    /// `amount * participants`
    pub required_total: Decimal,
    pub team_total_owed: Option<Decimal>,
    /// Clamped at zero
    pub team_remaining: Option<Decimal>,
    /// Signed; negative means overcollected
    pub team_remaining_raw: Option<Decimal>,
}

/// Per-player read model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub paid_amount: Decimal,
    pub status: PaymentStatus,
    /// Only present for balance-type (dues) periods
    pub balance: Option<Decimal>,
    pub progress_percent: Decimal,
    pub entry_count: usize,
}

/// Borrowed view over one period
#[derive(Debug, Clone, Copy)]
pub struct PeriodView<'a> {
    period: &'a PaymentPeriod,
}

impl<'a> PeriodView<'a> {
    pub fn new(period: &'a PaymentPeriod) -> Self {
        Self { period }
    }

    pub fn period(&self) -> &'a PaymentPeriod {
        self.period
    }

    /// Type guard: callers must check this before asking for a balance.
    pub fn is_balance_type(&self) -> bool {
        self.period.is_balance_type()
    }

    /// Sum of every participant's paid amount
    pub fn team_collected(&self) -> Decimal {
        money::sum(self.period.player_payments().iter().map(|pp| pp.paid_amount()))
    }

    /// `team_total_owed - team_collected`, unclamped. `None` when no team
    /// total is set.
    pub fn team_remaining_raw(&self) -> Option<Decimal> {
        self.period
            .team_total_owed()
            .map(|owed| owed - self.team_collected())
    }

    /// Remaining team balance for display, never negative.
    pub fn team_remaining(&self) -> Option<Decimal> {
        self.team_remaining_raw().map(|r| r.max(Decimal::ZERO))
    }

    /// Whether collections exceed the team total owed
    pub fn is_overcollected(&self) -> bool {
        self.team_remaining_raw()
            .is_some_and(|r| r < Decimal::ZERO)
    }

    /// `amount * participants`
    pub fn required_total(&self) -> Decimal {
        self.period.amount() * Decimal::from(self.period.player_payments().len())
    }

    pub fn paid_count(&self) -> usize {
        self.count_status(PaymentStatus::Paid)
    }

    fn count_status(&self, status: PaymentStatus) -> usize {
        self.period
            .player_payments()
            .iter()
            .filter(|pp| pp.status() == status)
            .count()
    }

    fn player(&self, player_id: &str) -> LedgerResult<&'a PlayerPayment> {
        self.period
            .player_payment(player_id)
            .ok_or_else(|| LedgerError::player_not_found(self.period.id(), player_id))
    }

    pub fn paid_amount(&self, player_id: &str) -> LedgerResult<Decimal> {
        Ok(self.player(player_id)?.paid_amount())
    }

    /// `max(0, amount - paid)` for dues periods.
    ///
    /// Non-dues periods are contribution-tracked and have no balance; asking
    /// for one is a caller error rather than a silent zero.
    pub fn player_balance(&self, player_id: &str) -> LedgerResult<Decimal> {
        if !self.is_balance_type() {
            return Err(LedgerError::validation(format!(
                "{} periods track contributions, not balances",
                self.period.payment_type().as_str()
            )));
        }
        let pp = self.player(player_id)?;
        Ok((self.period.amount() - pp.paid_amount()).max(Decimal::ZERO))
    }

    /// `min(100, paid / amount * 100)`, 0 when the amount is zero
    pub fn progress_percent(&self, player_id: &str) -> LedgerResult<Decimal> {
        let pp = self.player(player_id)?;
        Ok(money::percent_of(pp.paid_amount(), self.period.amount()))
    }

    pub fn player_summary(&self, player_id: &str) -> LedgerResult<PlayerSummary> {
        let pp = self.player(player_id)?;
        Ok(self.summarize_player(pp))
    }

    /// Player summaries in roster order
    pub fn player_summaries(&self) -> Vec<PlayerSummary> {
        self.period
            .player_payments()
            .iter()
            .map(|pp| self.summarize_player(pp))
            .collect()
    }

    fn summarize_player(&self, pp: &PlayerPayment) -> PlayerSummary {
        let amount = self.period.amount();
        PlayerSummary {
            player_id: pp.player_id().to_string(),
            paid_amount: pp.paid_amount(),
            status: pp.status(),
            balance: self
                .is_balance_type()
                .then(|| (amount - pp.paid_amount()).max(Decimal::ZERO)),
            progress_percent: money::percent_of(pp.paid_amount(), amount),
            entry_count: pp.entries().len(),
        }
    }

    pub fn summary(&self) -> PeriodSummary {
        PeriodSummary {
            period_id: self.period.id().to_string(),
            payment_type: self.period.payment_type(),
            is_balance_type: self.is_balance_type(),
            participants: self.period.player_payments().len(),
            paid_count: self.paid_count(),
            partial_count: self.count_status(PaymentStatus::Partial),
            unpaid_count: self.count_status(PaymentStatus::Unpaid),
            team_collected: self.team_collected(),
            required_total: self.required_total(),
            team_total_owed: self.period.team_total_owed(),
            team_remaining: self.team_remaining(),
            team_remaining_raw: self.team_remaining_raw(),
        }
    }
}
