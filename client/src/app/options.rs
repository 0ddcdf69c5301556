//! Application configuration options

use crate::storage::layout::StorageLayout;
use crate::workers::poller;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Backend API base URL
    pub backend_base_url: String,

    /// Storage layout paths
    pub storage: StorageLayout,

    /// Status poller options
    pub poller: poller::Options,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            backend_base_url: "http://localhost:8000/api".to_string(),
            storage: StorageLayout::default(),
            poller: poller::Options::default(),
        }
    }
}
