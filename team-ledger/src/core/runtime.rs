//! Runtime wiring: snapshot load, ledger service, sync worker

use shared::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::Config;
use crate::ledger::PaymentLedgerStore;
use crate::sync::{HttpSyncTransport, LedgerService, SyncTransport, SyncWorker, SyncWorkerOptions};

/// A running ledger with its background sync worker
pub struct LedgerRuntime {
    config: Config,
    service: LedgerService,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl LedgerRuntime {
    /// Load the snapshot and start syncing to `SYNC_URL` if configured.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: Config) -> Result<Self, AppError> {
        let transport: Option<Arc<dyn SyncTransport>> = match &config.sync_url {
            Some(url) => Some(Arc::new(HttpSyncTransport::new(
                url.clone(),
                Duration::from_millis(config.sync_timeout_ms),
            )?)),
            None => None,
        };
        Self::start_with_transport(config, transport)
    }

    /// Same as [`Self::start`] with an explicit transport (`None` keeps
    /// every change local).
    pub fn start_with_transport(
        config: Config,
        transport: Option<Arc<dyn SyncTransport>>,
    ) -> Result<Self, AppError> {
        let store = PaymentLedgerStore::load(&config.snapshot_path)?;
        tracing::info!(
            path = %config.snapshot_path,
            periods = store.len(),
            sync = transport.is_some(),
            "Ledger runtime starting"
        );

        let (service, outbox) = LedgerService::new(store);
        let shutdown = CancellationToken::new();
        let worker = transport.map(|transport| {
            let worker = SyncWorker::new(
                transport,
                outbox,
                SyncWorkerOptions::from_config(&config),
                shutdown.child_token(),
            );
            tokio::spawn(worker.run())
        });

        Ok(Self {
            config,
            service,
            shutdown,
            worker,
        })
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Persist the current ledger to the snapshot file
    pub fn save(&self) -> Result<(), AppError> {
        self.service.save(&self.config.snapshot_path)?;
        Ok(())
    }

    /// Save, then stop the worker after its final flush
    pub async fn shutdown(self) -> Result<(), AppError> {
        let saved = self.save();
        self.shutdown.cancel();
        if let Some(handle) = self.worker
            && let Err(e) = handle.await
        {
            tracing::error!("SyncWorker task failed: {e}");
        }
        tracing::info!("Ledger runtime stopped");
        saved
    }
}
