//! Wire types for the orchestrator API
//!
//! Field names are a compatibility contract with the backend (camelCase on the
//! wire) and must not be changed to match internal naming.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::config::{
    ContainerServiceConfig, EnvVar, FunctionConfig, SecretRef, VmConfig,
};

/// Service identifier on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireService {
    Ec2,
    Ecs,
    Lambda,
}

/// Deployment lifecycle state as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentState {
    Pending,
    InProgress,
    Completed,
    Failed,
    Stopped,
}

impl DeploymentState {
    /// Whether polling should stop at this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentState::Completed | DeploymentState::Failed | DeploymentState::Stopped
        )
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeploymentState::Pending => "pending",
            DeploymentState::InProgress => "in_progress",
            DeploymentState::Completed => "completed",
            DeploymentState::Failed => "failed",
            DeploymentState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// A container image entry in a create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireImage {
    pub id: String,
    pub name: String,
    pub tag: String,
}

/// VM section of a create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmRequest {
    pub os: String,
    pub instance_type: String,
    pub key_pair: String,
    pub security_group: String,
    pub subnet: String,
    pub storage_type: String,
    pub storage_size: u32,
    pub user_data: String,
    pub monitoring: bool,
}

impl From<&VmConfig> for VmRequest {
    fn from(config: &VmConfig) -> Self {
        Self {
            os: config.os.clone(),
            instance_type: config.instance_type.clone(),
            key_pair: config.key_pair.clone(),
            security_group: config.security_group.clone(),
            subnet: config.subnet.clone(),
            storage_type: config.storage_type.clone(),
            storage_size: config.storage_size_gb,
            user_data: config.user_data.clone(),
            monitoring: config.monitoring,
        }
    }
}

/// Environment variable on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEnvVar {
    pub name: String,
    pub value: String,
}

impl From<&EnvVar> for WireEnvVar {
    fn from(var: &EnvVar) -> Self {
        Self {
            name: var.name.clone(),
            value: var.value.clone(),
        }
    }
}

/// Secret reference on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSecret {
    pub name: String,
    #[serde(rename = "valueFrom")]
    pub value_from: String,
}

impl From<&SecretRef> for WireSecret {
    fn from(secret: &SecretRef) -> Self {
        Self {
            name: secret.name.clone(),
            value_from: secret.value_from.clone(),
        }
    }
}

/// Container service section of a create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerServiceRequest {
    pub cluster_name: String,
    pub service_name: String,
    pub task_definition_family: String,
    pub task_cpu: u32,
    pub task_memory: u32,
    pub desired_count: u32,
    pub load_balancer: bool,
    pub auto_scaling: bool,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub network_mode: String,
    pub platform_version: String,
    pub assign_public_ip: bool,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub container_port: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_port: Option<u32>,
    pub protocol: String,
    pub essential: bool,
    pub log_group: String,
    pub log_region: String,
    pub log_stream_prefix: String,
    pub environment_variables: Vec<WireEnvVar>,
    pub secrets: Vec<WireSecret>,
    pub health_check_enabled: bool,
    pub health_check_path: String,
    pub health_check_interval: u32,
    pub health_check_timeout: u32,
    pub health_check_retries: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_reservation: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_reservation: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_hard_limit: Option<u32>,
}

impl From<&ContainerServiceConfig> for ContainerServiceRequest {
    fn from(config: &ContainerServiceConfig) -> Self {
        Self {
            cluster_name: config.cluster_name.clone(),
            service_name: config.service_name.clone(),
            task_definition_family: config.task_definition_family.clone(),
            task_cpu: config.task_cpu_units,
            task_memory: config.task_memory_mb,
            desired_count: config.desired_count,
            load_balancer: config.load_balancer,
            auto_scaling: config.auto_scaling,
            min_capacity: config.min_capacity,
            max_capacity: config.max_capacity,
            network_mode: config.network_mode.clone(),
            platform_version: config.platform_version.clone(),
            assign_public_ip: config.assign_public_ip,
            subnets: config.subnets.clone(),
            security_groups: config.security_groups.clone(),
            container_port: config.container_port,
            host_port: config.host_port,
            protocol: config.protocol.clone(),
            essential: config.essential,
            log_group: config.log_group.clone(),
            log_region: config.log_region.clone(),
            log_stream_prefix: config.log_stream_prefix.clone(),
            environment_variables: config.environment_variables.iter().map(Into::into).collect(),
            secrets: config.secrets.iter().map(Into::into).collect(),
            health_check_enabled: config.health_check_enabled,
            health_check_path: config.health_check_path.clone(),
            health_check_interval: config.health_check_interval,
            health_check_timeout: config.health_check_timeout,
            health_check_retries: config.health_check_retries,
            cpu_reservation: config.cpu_reservation,
            memory_reservation: config.memory_reservation,
            memory_hard_limit: config.memory_hard_limit,
        }
    }
}

/// Function section of a create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub runtime: String,
    pub handler: String,
    pub timeout: u32,
    pub memory: u32,
    pub environment_vars: String,
    pub trigger: String,
    pub dead_letter_queue: bool,
}

impl From<&FunctionConfig> for FunctionRequest {
    fn from(config: &FunctionConfig) -> Self {
        Self {
            runtime: config.runtime.clone(),
            handler: config.handler.clone(),
            timeout: config.timeout_secs,
            memory: config.memory_mb,
            environment_vars: config.environment_vars.clone(),
            trigger: config.trigger.wire_id().to_string(),
            dead_letter_queue: config.dead_letter_queue,
        }
    }
}

/// The service-specific section of a create payload, keyed the way the
/// backend expects it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServiceRequest {
    #[serde(rename = "ec2Config")]
    Vm(VmRequest),
    #[serde(rename = "ecsConfig")]
    ContainerService(ContainerServiceRequest),
    #[serde(rename = "lambdaConfig")]
    Function(FunctionRequest),
}

/// Create-deployment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    pub service: WireService,
    pub regions: Vec<String>,
    pub docker_images: Vec<WireImage>,
    #[serde(flatten)]
    pub config: ServiceRequest,
}

/// Backend resource identifiers assigned during provisioning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResources {
    #[serde(default)]
    pub cluster_arn: Option<String>,
    #[serde(default)]
    pub service_arn: Option<String>,
    #[serde(default)]
    pub task_definition_arn: Option<String>,
    #[serde(default)]
    pub load_balancer_arn: Option<String>,
}

/// Response to create/scale/update calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResponse {
    pub success: bool,
    pub deployment_id: String,
    pub message: String,
    pub status: DeploymentState,
    #[serde(default)]
    pub resources: Option<DeploymentResources>,
    #[serde(default)]
    pub estimated_time: Option<u64>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
}

/// Deployment status as polled from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    pub deployment_id: String,
    pub status: DeploymentState,
    pub progress: f64,
    pub current_step: String,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub resources: DeploymentResources,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_time_remaining: Option<u64>,
    pub service: WireService,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

/// Paginated deployment listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentListResponse {
    pub deployments: Vec<DeploymentStatus>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Scale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleRequest {
    pub desired_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<bool>,
}

/// Update payload; only present fields are changed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_cpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_memory: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Vec<WireEnvVar>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<WireSecret>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
}

/// Plain success/message acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// Log lines for a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsResponse {
    pub logs: Vec<String>,
    pub has_more: bool,
}

/// One metrics sample for a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentMetrics {
    pub deployment_id: String,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub network_in: f64,
    pub network_out: f64,
    pub task_count: u32,
    pub running_tasks: u32,
    pub pending_tasks: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub disk_utilization: Option<f64>,
    #[serde(default)]
    pub request_count: Option<u64>,
    #[serde(default)]
    pub error_rate: Option<f64>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

/// Image registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCreateRequest {
    pub name: String,
    pub tag: String,
}

/// Domain availability check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCheckRequest {
    pub domain: String,
    pub tld: String,
}

/// Domain availability check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCheckResponse {
    pub available: bool,
    pub message: String,
    #[serde(default)]
    pub price: Option<String>,
}

/// Error body the backend returns on failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<u32>,
}
