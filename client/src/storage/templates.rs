//! Named deployment templates
//!
//! A template is a full snapshot of the deployment configuration, persisted
//! under a user-chosen name. Saving over an existing name silently replaces
//! it; templates never expire.

use std::collections::BTreeMap;

use crate::errors::ClientError;
use crate::filesys::file::File;
use crate::models::config::DeploymentConfig;

/// Template storage over a single JSON map file
#[derive(Debug, Clone)]
pub struct TemplateStore {
    file: File,
}

impl TemplateStore {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, DeploymentConfig>, ClientError> {
        if !self.file.exists().await {
            return Ok(BTreeMap::new());
        }
        self.file.read_json().await
    }

    /// Save a snapshot under `name`, replacing any existing entry
    pub async fn save(&self, name: &str, config: &DeploymentConfig) -> Result<(), ClientError> {
        let mut templates = self.read_map().await?;
        templates.insert(name.to_string(), config.clone());
        self.file.write_json(&templates).await
    }

    /// Load the snapshot stored under `name`
    pub async fn load(&self, name: &str) -> Result<Option<DeploymentConfig>, ClientError> {
        let mut templates = self.read_map().await?;
        Ok(templates.remove(name))
    }

    /// All stored template names
    pub async fn names(&self) -> Result<Vec<String>, ClientError> {
        let templates = self.read_map().await?;
        Ok(templates.into_keys().collect())
    }

    /// Delete the entry under `name`; returns whether it existed
    pub async fn delete(&self, name: &str) -> Result<bool, ClientError> {
        let mut templates = self.read_map().await?;
        let existed = templates.remove(name).is_some();
        if existed {
            self.file.write_json(&templates).await?;
        }
        Ok(existed)
    }
}
