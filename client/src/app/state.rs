//! Application state management

use std::sync::Arc;

use tracing::info;

use crate::app::options::AppOptions;
use crate::authn::token_cache::TokenCache;
use crate::errors::ClientError;
use crate::http::client::ApiClient;
use crate::storage::layout::StorageLayout;
use crate::storage::session;
use crate::storage::templates::TemplateStore;
use crate::store::config_store::ConfigStore;

/// Main application state
pub struct AppState {
    /// Storage layout
    pub layout: StorageLayout,

    /// Live configuration store
    pub store: ConfigStore,

    /// Token cache for authentication
    pub tokens: Arc<TokenCache>,

    /// HTTP client for backend communication
    pub client: Arc<ApiClient>,
}

impl AppState {
    /// Initialize application state
    pub async fn init(options: &AppOptions) -> Result<Self, ClientError> {
        info!("Initializing application state...");

        let layout = options.storage.clone();
        layout.setup().await?;

        // Pick up the configuration the previous invocation left behind
        let config = session::load_config(&layout.config_file()).await;
        let templates = TemplateStore::new(layout.templates_file());
        let store = ConfigStore::new(config, templates);

        let tokens = Arc::new(TokenCache::new(layout.token_file()).await);
        let client = Arc::new(ApiClient::new(&options.backend_base_url, tokens.clone())?);

        Ok(Self {
            layout,
            store,
            tokens,
            client,
        })
    }

    /// Persist the live configuration for the next invocation
    pub async fn save_session(&self) -> Result<(), ClientError> {
        session::save_config(&self.layout.config_file(), self.store.config()).await
    }
}
