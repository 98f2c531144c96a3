//! Data models shared with the host application

pub mod payment;

pub use payment::{PaymentEntryInput, PaymentPeriodCreate, PaymentStatus, PaymentType};
