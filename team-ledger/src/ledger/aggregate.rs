//! Player payment aggregator
//!
//! The only place `paid_amount` and `status` are derived. Every ledger
//! mutation and every change of a period's required amount ends in
//! [`aggregate`], so the stored projection can never disagree with the
//! entries behind it.

use super::model::PaymentEntry;
use super::money;
use rust_decimal::Decimal;
use shared::models::PaymentStatus;

/// Projection of one player's ledger against a required amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub paid_amount: Decimal,
    pub status: PaymentStatus,
}

/// Recompute paid total and status from entries.
///
/// Depends only on the sum of the entries and `required`, never on their
/// order or count.
pub fn aggregate(entries: &[PaymentEntry], required: Decimal) -> Aggregate {
    let paid_amount = money::sum(entries.iter().map(|e| e.amount));
    Aggregate {
        paid_amount,
        status: derive_status(paid_amount, required),
    }
}

/// Status rule:
/// - `paid <= 0` → unpaid
/// - `0 < paid < required` → partial
/// - `paid >= required` → paid (overpayment still reports paid)
pub fn derive_status(paid: Decimal, required: Decimal) -> PaymentStatus {
    if paid <= Decimal::ZERO {
        PaymentStatus::Unpaid
    } else if paid < required {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Paid
    }
}
