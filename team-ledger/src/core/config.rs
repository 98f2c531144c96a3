/// Ledger runtime configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LEDGER_SNAPSHOT_PATH | ./data/ledger.json | Snapshot file |
/// | DEVICE_ID | local | Identifies this device in sync batches |
/// | SYNC_URL | (unset) | Remote sync base URL; sync is off when unset |
/// | SYNC_DEBOUNCE_MS | 500 | Outbox debounce window |
/// | SYNC_MAX_WAIT_MS | 5000 | Longest a pending change waits under continuous edits |
/// | SYNC_MAX_RETRIES | 3 | Attempts per batch |
/// | SYNC_RETRY_DELAY_MS | 1000 | First retry delay, doubled per attempt |
/// | SYNC_TIMEOUT_MS | 30000 | HTTP request timeout |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: String,
    pub device_id: String,
    pub sync_url: Option<String>,
    pub sync_debounce_ms: u64,
    pub sync_max_wait_ms: u64,
    pub sync_max_retries: u32,
    pub sync_retry_delay_ms: u64,
    pub sync_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load from the environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            snapshot_path: std::env::var("LEDGER_SNAPSHOT_PATH")
                .unwrap_or_else(|_| "./data/ledger.json".into()),
            device_id: std::env::var("DEVICE_ID").unwrap_or_else(|_| "local".into()),
            sync_url: std::env::var("SYNC_URL").ok().filter(|u| !u.trim().is_empty()),
            sync_debounce_ms: std::env::var("SYNC_DEBOUNCE_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(500),
            sync_max_wait_ms: std::env::var("SYNC_MAX_WAIT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            sync_max_retries: std::env::var("SYNC_MAX_RETRIES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3),
            sync_retry_delay_ms: std::env::var("SYNC_RETRY_DELAY_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1000),
            sync_timeout_ms: std::env::var("SYNC_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }

    /// Fixed values for tests: snapshot under `dir`, sync off, short timings
    pub fn for_tests(dir: impl AsRef<std::path::Path>) -> Self {
        Self {
            snapshot_path: dir.as_ref().join("ledger.json").to_string_lossy().into_owned(),
            device_id: "test-device".into(),
            sync_url: None,
            sync_debounce_ms: 10,
            sync_max_wait_ms: 100,
            sync_max_retries: 3,
            sync_retry_delay_ms: 5,
            sync_timeout_ms: 1000,
            log_level: "debug".into(),
            log_dir: None,
        }
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync_url.is_some()
    }
}
