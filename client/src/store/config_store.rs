//! Single source of truth for the in-progress deployment configuration
//!
//! All mutations are synchronous and in-memory; validation and cost are
//! derived on read, never stored. Template operations go through the
//! persisted [`TemplateStore`]. Callers that run the store from multiple
//! tasks must serialize access themselves.

use crate::catalog;
use crate::errors::ClientError;
use crate::models::config::{
    ContainerImageSpec, ContainerServiceConfigPatch, DeploymentConfig, FunctionConfigPatch,
    ImageField, ServiceType, VmConfigPatch,
};
use crate::storage::templates::TemplateStore;

/// Maximum container image slots per configuration
pub const MAX_IMAGES: usize = 3;

pub struct ConfigStore {
    config: DeploymentConfig,
    templates: TemplateStore,
}

impl ConfigStore {
    pub fn new(config: DeploymentConfig, templates: TemplateStore) -> Self {
        Self { config, templates }
    }

    /// The live configuration
    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    /// Select the target service. Sibling sub-configs are kept so switching
    /// back never loses edits; validation is derived lazily, not here.
    pub fn set_service(&mut self, service: ServiceType) {
        self.config.service = service;
    }

    /// Add the region if absent, remove it if present. The non-empty
    /// requirement is enforced by validation, not here.
    pub fn toggle_region(&mut self, region_id: &str) {
        if let Some(pos) = self.config.regions.iter().position(|r| r == region_id) {
            self.config.regions.remove(pos);
        } else {
            self.config.regions.push(region_id.to_string());
        }
    }

    /// Append a blank image slot. No-op when already at the maximum.
    /// Returns the new slot's id, if one was added.
    pub fn add_image(&mut self) -> Option<String> {
        if self.config.container_images.len() >= MAX_IMAGES {
            return None;
        }
        let image = ContainerImageSpec::blank();
        let id = image.id.clone();
        self.config.container_images.push(image);
        Some(id)
    }

    /// Remove an image slot by id. No-op when it would leave zero slots.
    pub fn remove_image(&mut self, id: &str) {
        if self.config.container_images.len() <= 1 {
            return;
        }
        self.config.container_images.retain(|img| img.id != id);
    }

    /// Update one field of an image slot by id. No-op when the id is unknown.
    pub fn update_image(&mut self, id: &str, field: ImageField, value: &str) -> Result<(), ClientError> {
        let Some(image) = self.config.container_images.iter_mut().find(|img| img.id == id) else {
            return Ok(());
        };

        match field {
            ImageField::Repository => image.repository = value.to_string(),
            ImageField::Tag => image.tag = value.to_string(),
            ImageField::ExposedPort => {
                image.exposed_port = Some(value.parse().map_err(|_| {
                    ClientError::UsageError(format!("port: expected a number, got '{}'", value))
                })?)
            }
            ImageField::CpuUnits => {
                image.cpu_units = Some(value.parse().map_err(|_| {
                    ClientError::UsageError(format!("cpu: expected a number, got '{}'", value))
                })?)
            }
            ImageField::MemoryMb => {
                image.memory_mb = Some(value.parse().map_err(|_| {
                    ClientError::UsageError(format!("memory: expected a number, got '{}'", value))
                })?)
            }
        }
        Ok(())
    }

    /// Shallow-merge a partial VM config update
    pub fn set_vm_config(&mut self, patch: VmConfigPatch) {
        patch.apply(&mut self.config.vm_config);
    }

    /// Shallow-merge a partial container service config update
    pub fn set_container_service_config(&mut self, patch: ContainerServiceConfigPatch) {
        patch.apply(&mut self.config.container_service_config);
    }

    /// Shallow-merge a partial function config update
    pub fn set_function_config(&mut self, patch: FunctionConfigPatch) {
        patch.apply(&mut self.config.function_config);
    }

    /// Restore the fixed default configuration
    pub fn reset(&mut self) {
        self.config = DeploymentConfig::default();
    }

    /// CPU unit choices still available to the given image slot, given what
    /// the sibling slots already reserve out of the task budget.
    ///
    /// This inline budget filter is the only place the per-image CPU/memory
    /// sum is checked against the task budget; `validate` deliberately does
    /// not gate on it.
    pub fn available_cpu_units(&self, image_id: &str) -> Vec<u32> {
        let reserved: u32 = self
            .config
            .container_images
            .iter()
            .filter(|img| img.id != image_id)
            .filter_map(|img| img.cpu_units)
            .sum();
        let budget = self.config.container_service_config.task_cpu_units;
        catalog::IMAGE_CPU_UNITS
            .iter()
            .copied()
            .filter(|opt| opt + reserved <= budget)
            .collect()
    }

    /// Memory choices still available to the given image slot
    pub fn available_memory_mb(&self, image_id: &str) -> Vec<u32> {
        let reserved: u32 = self
            .config
            .container_images
            .iter()
            .filter(|img| img.id != image_id)
            .filter_map(|img| img.memory_mb)
            .sum();
        let budget = self.config.container_service_config.task_memory_mb;
        catalog::IMAGE_MEMORY_MB
            .iter()
            .copied()
            .filter(|opt| opt + reserved <= budget)
            .collect()
    }

    /// Save the live configuration as a named template, silently replacing
    /// any existing template of that name
    pub async fn save_template(&self, name: &str) -> Result<(), ClientError> {
        self.templates.save(name, &self.config).await
    }

    /// Replace the entire live configuration with the named template.
    /// Returns `false` (leaving the configuration untouched) when the name
    /// is unknown.
    pub async fn load_template(&mut self, name: &str) -> Result<bool, ClientError> {
        match self.templates.load(name).await? {
            Some(config) => {
                self.config = config;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Names of all stored templates
    pub async fn template_names(&self) -> Result<Vec<String>, ClientError> {
        self.templates.names().await
    }

    /// Delete a named template; returns whether it existed
    pub async fn delete_template(&self, name: &str) -> Result<bool, ClientError> {
        self.templates.delete(name).await
    }
}
