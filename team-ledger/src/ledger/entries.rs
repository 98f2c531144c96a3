//! Entry ledger
//!
//! Append/remove-only list of entries per (period, player). Touches nothing
//! but the owning player payment; period-level totals are computed on read
//! by [`super::reconcile`].

use super::error::{LedgerError, LedgerResult};
use super::model::{PaymentEntry, PaymentPeriod, PlayerPayment};
use super::money;
use super::validation::{MAX_NOTE_LEN, validate_id, validate_optional_text};
use shared::models::PaymentEntryInput;

/// Append an entry to a player's ledger.
///
/// Checks run before anything is written:
/// 1. player is a participant (`NotFound`)
/// 2. amount is positive (`InvalidAmount`)
/// 3. id and note are well formed (`Validation`)
/// 4. id is unused within the period (`DuplicateId`)
pub fn add_entry<'a>(
    period: &'a mut PaymentPeriod,
    player_id: &str,
    input: PaymentEntryInput,
    created_at: i64,
) -> LedgerResult<&'a PlayerPayment> {
    if period.player_payment(player_id).is_none() {
        return Err(LedgerError::player_not_found(period.id(), player_id));
    }
    money::validate_entry_amount(input.amount)?;
    validate_id(&input.id, "entry id")?;
    validate_optional_text(&input.note, "note", MAX_NOTE_LEN)?;
    if period.contains_entry_id(&input.id) {
        return Err(LedgerError::DuplicateId(input.id));
    }

    let required = period.amount();
    let period_id = period.id().to_string();
    let entry = PaymentEntry::from_input(input, created_at);
    let entry_id = entry.id.clone();
    let amount = entry.amount;

    let pp = period
        .player_payment_mut(player_id)
        .ok_or_else(|| LedgerError::player_not_found(&period_id, player_id))?;
    pp.push_entry(entry, required);

    tracing::debug!(
        period_id = %period_id,
        player_id = %player_id,
        entry_id = %entry_id,
        amount = %amount,
        paid_amount = %pp.paid_amount(),
        status = ?pp.status(),
        "Payment entry added"
    );
    Ok(pp)
}

/// Remove an entry from a player's ledger. Irreversible.
pub fn remove_entry(
    period: &mut PaymentPeriod,
    player_id: &str,
    entry_id: &str,
) -> LedgerResult<PaymentEntry> {
    let required = period.amount();
    let period_id = period.id().to_string();
    let pp = period
        .player_payment_mut(player_id)
        .ok_or_else(|| LedgerError::player_not_found(&period_id, player_id))?;
    let removed = pp
        .take_entry(entry_id, required)
        .ok_or_else(|| LedgerError::entry_not_found(player_id, entry_id))?;

    tracing::warn!(
        period_id = %period_id,
        player_id = %player_id,
        entry_id = %entry_id,
        amount = %removed.amount,
        paid_amount = %pp.paid_amount(),
        status = ?pp.status(),
        "Payment entry removed"
    );
    Ok(removed)
}
