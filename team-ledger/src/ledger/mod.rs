//! Payment ledger engine
//!
//! - [`store`]: period management, owns all state
//! - [`entries`]: append/remove-only entry ledger
//! - [`aggregate`]: the single paid/status derivation
//! - [`reconcile`]: read-only team and player figures
//! - [`snapshot`]: JSON persistence

pub mod aggregate;
pub mod entries;
pub mod error;
pub mod model;
pub mod money;
pub mod reconcile;
pub mod snapshot;
pub mod store;
pub mod validation;

pub use aggregate::{Aggregate, aggregate};
pub use error::{LedgerError, LedgerResult, Missing};
pub use model::{PaymentEntry, PaymentPeriod, PlayerPayment};
pub use reconcile::{PeriodSummary, PeriodView, PlayerSummary};
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION, SnapshotError, SnapshotResult};
pub use store::PaymentLedgerStore;
