//! Payment period / ledger contract types
//!
//! Plain data exchanged between the host app and the ledger engine.
//! The engine owns the stateful period model; this module only carries
//! enums and input payloads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of charge a payment period represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// 会费 - balance owed per player
    #[default]
    Dues,
    ReserveFee,
    FacilityRental,
    Misc,
}

impl PaymentType {
    /// Dues are tracked as a balance owed; every other type only tracks
    /// how much has been contributed.
    pub fn is_balance_type(&self) -> bool {
        matches!(self, PaymentType::Dues)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dues => "dues",
            Self::ReserveFee => "reserve_fee",
            Self::FacilityRental => "facility_rental",
            Self::Misc => "misc",
        }
    }
}

/// Derived payment status of one player within one period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// Position on the unpaid → partial → paid axis
    pub fn rank(&self) -> u8 {
        match self {
            Self::Unpaid => 0,
            Self::Partial => 1,
            Self::Paid => 2,
        }
    }
}

/// Create payment period payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPeriodCreate {
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type", default)]
    pub payment_type: PaymentType,
    pub player_ids: Vec<String>,
    #[serde(default)]
    pub team_total_owed: Option<Decimal>,
}

/// Record payment entry payload
///
/// `id` is generated by the caller (see [`crate::util::snowflake_id`]) so a
/// double submission of the same form is detectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntryInput {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl PaymentEntryInput {
    /// Build an input with a freshly generated time-based id
    pub fn new(amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: crate::util::snowflake_id().to_string(),
            amount,
            date,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
