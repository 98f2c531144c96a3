//! Outbox sync batch protocol types
//!
//! Used by the ledger service to push local changes to the remote store.
//! The remote side applies items with last-write-wins per `resource_id`.

use serde::{Deserialize, Serialize};

/// Resource name for payment periods
pub const RESOURCE_PAYMENT_PERIOD: &str = "payment_period";

/// What happened to the resource locally
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Upsert,
    Delete,
}

/// A single resource change to push to the remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncItem {
    /// Resource type, e.g. "payment_period"
    pub resource: String,
    /// Monotonically increasing version for this device
    pub version: u64,
    pub action: SyncAction,
    /// Resource ID on this device
    pub resource_id: String,
    /// Full resource data as JSON (Null for deletes)
    pub data: serde_json::Value,
}

impl SyncItem {
    /// Coalescing key used when batching (one slot per resource)
    pub fn key(&self) -> (String, String) {
        (self.resource.clone(), self.resource_id.clone())
    }
}

/// A batch of sync items from one device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncBatch {
    /// Device / installation identifier
    pub device_id: String,
    pub items: Vec<SyncItem>,
    /// Timestamp when the batch was sent (Unix millis)
    pub sent_at: i64,
}

/// Response from the remote store after processing a sync batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Number of items accepted
    pub accepted: u32,
    /// Number of items rejected
    pub rejected: u32,
    /// Errors for rejected items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SyncItemError>,
}

/// Error detail for a rejected sync item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncItemError {
    /// Index of the item in the batch
    pub index: u32,
    /// Resource ID that failed
    pub resource_id: String,
    pub message: String,
}
