//! Unified error system for the team ledger
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::PaymentEntryNotFound);
//! assert_eq!(err.code.code(), 5103);
//!
//! let err = AppError::validation("title must not be empty")
//!     .with_detail("field", "title");
//! assert!(err.is_user_facing());
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
