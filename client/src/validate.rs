//! Deployment configuration validation
//!
//! Pure function of the configuration. Errors block submission; warnings are
//! advisory only. Rule evaluation order carries no meaning.

use crate::models::config::{DeploymentConfig, ServiceType};

/// Validation result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Validation {
    /// Whether the configuration may be submitted
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a deployment configuration
pub fn validate(config: &DeploymentConfig) -> Validation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.regions.is_empty() {
        errors.push("At least one region must be selected".to_string());
    }

    let has_named_image = config.named_images().next().is_some();

    match config.service {
        ServiceType::Vm => {
            let vm = &config.vm_config;
            if vm.key_pair.trim().is_empty() {
                errors.push("A key pair is required for virtual machines".to_string());
            }
            if !has_named_image {
                errors.push("At least one container image must be specified".to_string());
            }
            if vm.storage_size_gb < 8 {
                warnings.push("The recommended minimum storage size is 8 GB".to_string());
            }
        }

        ServiceType::ContainerService => {
            let ecs = &config.container_service_config;
            if ecs.cluster_name.trim().is_empty() {
                errors.push("A cluster name is required".to_string());
            }
            if ecs.service_name.trim().is_empty() {
                errors.push("A service name is required".to_string());
            }
            if ecs.task_definition_family.trim().is_empty() {
                errors.push("A task definition family is required".to_string());
            }
            if !has_named_image {
                errors.push("At least one container image must be specified".to_string());
            }
            if ecs.subnets.is_empty() {
                errors.push("At least one subnet must be specified".to_string());
            }
            if ecs.security_groups.is_empty() {
                errors.push("At least one security group must be specified".to_string());
            }
            if ecs.task_memory_mb < 512 {
                warnings.push("At least 512 MB of task memory is recommended".to_string());
            }
            if ecs.container_port == 0 || ecs.container_port > 65535 {
                errors.push("The container port must be between 1 and 65535".to_string());
            }
        }

        ServiceType::Function => {
            let function = &config.function_config;
            if function.handler.trim().is_empty() {
                errors.push("A handler is required for functions".to_string());
            }
            // Unreachable through the clamped input path, kept for parity
            // with submissions built elsewhere.
            if function.timeout_secs > 900 {
                warnings.push("The maximum function timeout is 15 minutes".to_string());
            }
            if function.memory_mb < 128 {
                warnings.push("The minimum function memory is 128 MB".to_string());
            }
        }
    }

    Validation { errors, warnings }
}

/// Per-image resource usage against the task budget.
///
/// This check is intentionally not part of [`validate`]: the wizard surfaces
/// it inline when picking per-image reservations, but it has never gated
/// submission. Whether it should is an open product decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBudget {
    pub cpu_used: u32,
    pub cpu_budget: u32,
    pub memory_used: u32,
    pub memory_budget: u32,
}

impl ImageBudget {
    pub fn exceeded(&self) -> bool {
        self.cpu_used > self.cpu_budget || self.memory_used > self.memory_budget
    }
}

/// Sum the per-image CPU/memory reservations against the task budget
pub fn image_budget(config: &DeploymentConfig) -> ImageBudget {
    let ecs = &config.container_service_config;
    ImageBudget {
        cpu_used: config.container_images.iter().filter_map(|img| img.cpu_units).sum(),
        cpu_budget: ecs.task_cpu_units,
        memory_used: config.container_images.iter().filter_map(|img| img.memory_mb).sum(),
        memory_budget: ecs.task_memory_mb,
    }
}
