use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::config::Config;
use crate::db::{MemStorage, SharedStorage};
use crate::services::{AuthService, UploadService};

/// Everything a request handler needs, built once and handed to the
/// router. Tests build a fresh one per case.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub storage: SharedStorage,

    pub auth: Arc<AuthService>,

    pub uploads: Arc<UploadService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Self {
        Self::with_storage(config, Arc::new(MemStorage::new()), prometheus_handle)
    }

    #[must_use]
    pub fn with_storage(
        config: Config,
        storage: SharedStorage,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(storage.clone(), config.security.clone()));
        let uploads = Arc::new(UploadService::new(&config.uploads));

        Self {
            config: Arc::new(config),
            storage,
            auth,
            uploads,
            prometheus_handle,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &dyn crate::db::Storage {
        self.storage.as_ref()
    }
}
