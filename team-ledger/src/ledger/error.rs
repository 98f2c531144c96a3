use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// What a `NotFound` failed to resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Missing {
    #[error("Payment period {0}")]
    Period(String),

    #[error("Player {player_id} in payment period {period_id}")]
    Player { period_id: String, player_id: String },

    #[error("Payment entry {entry_id} for player {player_id}")]
    Entry { player_id: String, entry_id: String },
}

/// Ledger errors
///
/// Every mutator either fully applies or returns one of these without
/// touching state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(Missing),

    #[error("Duplicate payment entry id: {0}")]
    DuplicateId(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn period_not_found(period_id: &str) -> Self {
        Self::NotFound(Missing::Period(period_id.to_string()))
    }

    pub fn player_not_found(period_id: &str, player_id: &str) -> Self {
        Self::NotFound(Missing::Player {
            period_id: period_id.to_string(),
            player_id: player_id.to_string(),
        })
    }

    pub fn entry_not_found(player_id: &str, entry_id: &str) -> Self {
        Self::NotFound(Missing::Entry {
            player_id: player_id.to_string(),
            entry_id: entry_id.to_string(),
        })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::NotFound(Missing::Period(_)) => ErrorCode::PaymentPeriodNotFound,
            Self::NotFound(Missing::Player { .. }) => ErrorCode::PlayerPaymentNotFound,
            Self::NotFound(Missing::Entry { .. }) => ErrorCode::PaymentEntryNotFound,
            Self::DuplicateId(_) => ErrorCode::PaymentEntryDuplicateId,
            Self::InvalidAmount(_) => ErrorCode::PaymentInvalidAmount,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let app = AppError::with_message(code, message);
        match err {
            LedgerError::NotFound(Missing::Period(id)) => app.with_detail("period_id", id),
            LedgerError::NotFound(Missing::Player {
                period_id,
                player_id,
            }) => app
                .with_detail("period_id", period_id)
                .with_detail("player_id", player_id),
            LedgerError::NotFound(Missing::Entry {
                player_id,
                entry_id,
            }) => app
                .with_detail("player_id", player_id)
                .with_detail("entry_id", entry_id),
            LedgerError::DuplicateId(id) => app.with_detail("entry_id", id),
            LedgerError::InvalidAmount(amount) => app.with_detail("amount", amount.to_string()),
            LedgerError::Validation(_) => app,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
