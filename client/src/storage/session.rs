//! Session snapshot of the live deployment configuration
//!
//! Persisted after every mutation so a new invocation picks up where the last
//! one left off.

use crate::errors::ClientError;
use crate::filesys::file::File;
use crate::models::config::DeploymentConfig;

/// Load the session configuration, falling back to defaults when absent or
/// unreadable (a corrupt snapshot should never brick the wizard)
pub async fn load_config(config_file: &File) -> DeploymentConfig {
    if !config_file.exists().await {
        return DeploymentConfig::default();
    }

    match config_file.read_json().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Discarding unreadable session config: {}", e);
            DeploymentConfig::default()
        }
    }
}

/// Save the session configuration
pub async fn save_config(config_file: &File, config: &DeploymentConfig) -> Result<(), ClientError> {
    config_file.write_json(config).await
}
