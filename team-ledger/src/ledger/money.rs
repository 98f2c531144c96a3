//! Money helpers using rust_decimal for precision
//!
//! Entries are summed as `Decimal` so a ledger of many small contributions
//! never drifts away from the required amount.

use super::error::{LedgerError, LedgerResult};
use rust_decimal::prelude::*;

/// Rounding for percentages (2 decimal places, half-up)
const PERCENT_DECIMAL_PLACES: u32 = 2;

/// Maximum allowed single amount (1,000,000 units)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Validate a required per-player or team-level amount.
///
/// Period amounts are form input, so failures are validation errors.
pub fn validate_period_amount(amount: Decimal, field: &str) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "{field} must be greater than zero, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}

/// Team total owed may be zero but never negative.
pub fn validate_team_total(amount: Decimal) -> LedgerResult<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "team total owed must not be negative, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::validation(format!(
            "team total owed exceeds maximum allowed ({MAX_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}

/// Validate a single ledger entry amount
pub fn validate_entry_amount(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO || amount > MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

/// Sum a sequence of amounts
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, a| acc + a)
}

/// `min(100, part / whole * 100)`, 0 when `whole` is zero or negative
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO || part <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // a quotient past Decimal::MAX is far beyond 100%
    let pct = match part.checked_div(whole).and_then(|q| q.checked_mul(ONE_HUNDRED)) {
        Some(pct) => pct.min(ONE_HUNDRED),
        None => ONE_HUNDRED,
    };
    pct.round_dp_with_strategy(PERCENT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
