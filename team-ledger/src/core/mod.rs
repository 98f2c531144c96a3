//! Configuration and runtime wiring
//!
//! - [`Config`] - environment configuration
//! - [`LedgerRuntime`] - loaded ledger plus background sync

pub mod config;
pub mod runtime;

pub use config::Config;
pub use runtime::LedgerRuntime;
