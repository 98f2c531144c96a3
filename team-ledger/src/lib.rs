//! Team Ledger - payment tracking and reconciliation for a team app
//!
//! # Modules
//!
//! ```text
//! team-ledger/src/
//! ├── ledger/    # periods, entry ledger, aggregation, reconciliation, snapshots
//! ├── sync/      # outbox: LedgerService, SyncWorker, transports
//! ├── core/      # config and runtime wiring
//! └── utils/     # logging
//! ```
//!
//! The ledger itself is synchronous and owns no globals; hold a
//! [`PaymentLedgerStore`] directly, or a [`LedgerService`] when changes
//! should also be pushed to a remote store.

pub mod core;
pub mod ledger;
pub mod sync;
pub mod utils;

pub use crate::core::{Config, LedgerRuntime};
pub use ledger::{
    LedgerError, LedgerResult, LedgerSnapshot, PaymentEntry, PaymentLedgerStore, PaymentPeriod,
    PeriodSummary, PeriodView, PlayerPayment, PlayerSummary, SnapshotError,
};
pub use sync::{HttpSyncTransport, LedgerService, SyncTransport, SyncWorker, SyncWorkerOptions};

pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::models::{PaymentEntryInput, PaymentPeriodCreate, PaymentStatus, PaymentType};
