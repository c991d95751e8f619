use std::sync::Arc;

use ragbridge_backend::BackendClient;

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// The backend client is built once at startup and reused for every
/// request; handlers own nothing beyond the lifetime of their request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<BackendClient>,
}

impl AppState {
    pub fn new(config: Config, backend: BackendClient) -> Self {
        Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
        }
    }
}
