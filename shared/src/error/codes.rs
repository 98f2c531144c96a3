//! Unified error codes for the team ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 5xxx: Payment ledger errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 5xxx: Payment ====================
    /// Payment period not found
    PaymentPeriodNotFound = 5101,
    /// Player is not a participant of the period
    PlayerPaymentNotFound = 5102,
    /// Payment entry not found
    PaymentEntryNotFound = 5103,
    /// Payment entry id already used
    PaymentEntryDuplicateId = 5104,
    /// Payment amount must be positive
    PaymentInvalidAmount = 5105,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Payment
            ErrorCode::PaymentPeriodNotFound => "Payment period not found",
            ErrorCode::PlayerPaymentNotFound => "Player is not part of this payment period",
            ErrorCode::PaymentEntryNotFound => "Payment entry not found",
            ErrorCode::PaymentEntryDuplicateId => "Payment entry id is already in use",
            ErrorCode::PaymentInvalidAmount => "Payment amount must be greater than zero",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Payment
            5101 => Ok(ErrorCode::PaymentPeriodNotFound),
            5102 => Ok(ErrorCode::PlayerPaymentNotFound),
            5103 => Ok(ErrorCode::PaymentEntryNotFound),
            5104 => Ok(ErrorCode::PaymentEntryDuplicateId),
            5105 => Ok(ErrorCode::PaymentInvalidAmount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
