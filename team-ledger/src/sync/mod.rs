//! Outbox sync - push local ledger changes to the remote store
//!
//! ```text
//! LedgerService (mutate locally)
//!   └── mpsc outbox ──► SyncWorker
//!                         ├── debounce + coalesce per period
//!                         └── SyncTransport::push_batch (retry with backoff)
//! ```
//!
//! The remote side applies items last-write-wins per period; concurrent
//! edits to one period from two devices are not merged.

mod service;
mod transport;
mod worker;

pub use service::LedgerService;
pub use transport::{HttpSyncTransport, SyncTransport};
pub use worker::{SyncWorker, SyncWorkerOptions};
