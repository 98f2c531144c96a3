//! Shared types for the team ledger
//!
//! Contract types used by both the ledger engine and the host application:
//! payment enums and input payloads, unified error codes, and the outbox
//! sync protocol.

pub mod error;
pub mod models;
pub mod sync;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{PaymentEntryInput, PaymentPeriodCreate, PaymentStatus, PaymentType};
pub use serde::{Deserialize, Serialize};
