//! Storage layout configuration

use std::path::PathBuf;

use tokio::fs;

use crate::errors::ClientError;
use crate::filesys::file::File;

/// Storage layout for the client
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Base directory for all storage
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Session snapshot of the live deployment configuration
    pub fn config_file(&self) -> File {
        File::new(self.base_dir.join("config.json"))
    }

    /// Named template map
    pub fn templates_file(&self) -> File {
        File::new(self.base_dir.join("templates.json"))
    }

    /// Stored bearer token
    pub fn token_file(&self) -> File {
        File::new(self.base_dir.join("token.json"))
    }

    /// Client settings
    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join("settings.json"))
    }

    /// Setup the storage layout (create the base directory)
    pub async fn setup(&self) -> Result<(), ClientError> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        let base_dir = match std::env::var_os("STRATO_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".strato"),
        };
        Self::new(base_dir)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
