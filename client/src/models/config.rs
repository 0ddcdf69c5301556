//! Deployment configuration model
//!
//! The aggregate edited by the wizard. All three service sub-configs are kept
//! in memory at once so switching the target service never loses edits; only
//! the sub-config matching `service` is read at submission time.

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Target compute service for a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Vm,
    ContainerService,
    Function,
}

impl ServiceType {
    /// Identifier the backend expects on the wire
    pub fn wire_id(&self) -> &'static str {
        match self {
            ServiceType::Vm => "ec2",
            ServiceType::ContainerService => "ecs",
            ServiceType::Function => "lambda",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vm" | "ec2" => Ok(ServiceType::Vm),
            "container_service" | "container-service" | "ecs" => Ok(ServiceType::ContainerService),
            "function" | "lambda" => Ok(ServiceType::Function),
            _ => Err(ClientError::UsageError(format!("unknown service: {}", s))),
        }
    }
}

/// Event source that invokes a serverless function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    #[serde(rename = "api-gateway")]
    HttpGateway,
    #[serde(rename = "s3")]
    ObjectStorageEvent,
    #[serde(rename = "dynamodb")]
    ChangeStream,
    #[serde(rename = "sqs")]
    Queue,
    #[serde(rename = "sns")]
    Topic,
    #[serde(rename = "cloudwatch")]
    ScheduledEvent,
    #[serde(rename = "eventbridge")]
    EventBus,
}

impl TriggerKind {
    pub fn wire_id(&self) -> &'static str {
        match self {
            TriggerKind::HttpGateway => "api-gateway",
            TriggerKind::ObjectStorageEvent => "s3",
            TriggerKind::ChangeStream => "dynamodb",
            TriggerKind::Queue => "sqs",
            TriggerKind::Topic => "sns",
            TriggerKind::ScheduledEvent => "cloudwatch",
            TriggerKind::EventBus => "eventbridge",
        }
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api-gateway" | "http-gateway" => Ok(TriggerKind::HttpGateway),
            "s3" | "object-storage-event" => Ok(TriggerKind::ObjectStorageEvent),
            "dynamodb" | "change-stream" => Ok(TriggerKind::ChangeStream),
            "sqs" | "queue" => Ok(TriggerKind::Queue),
            "sns" | "topic" => Ok(TriggerKind::Topic),
            "cloudwatch" | "scheduled-event" => Ok(TriggerKind::ScheduledEvent),
            "eventbridge" | "event-bus" => Ok(TriggerKind::EventBus),
            _ => Err(ClientError::UsageError(format!("unknown trigger: {}", s))),
        }
    }
}

/// A container image slot in the deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerImageSpec {
    /// Opaque id, stable across edits
    pub id: String,

    /// Image repository name; blank slots are skipped at submission
    pub repository: String,

    /// Image tag
    pub tag: String,

    /// Exposed container port
    #[serde(default)]
    pub exposed_port: Option<u16>,

    /// CPU units reserved for this container within the task budget
    #[serde(default)]
    pub cpu_units: Option<u32>,

    /// Memory (MB) reserved for this container within the task budget
    #[serde(default)]
    pub memory_mb: Option<u32>,
}

impl ContainerImageSpec {
    /// A blank slot with a fresh id and the default tag
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            repository: String::new(),
            tag: "latest".to_string(),
            exposed_port: None,
            cpu_units: None,
            memory_mb: None,
        }
    }

    /// Whether the slot names an actual image
    pub fn is_named(&self) -> bool {
        !self.repository.trim().is_empty()
    }
}

/// Editable field of a container image slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Repository,
    Tag,
    ExposedPort,
    CpuUnits,
    MemoryMb,
}

impl std::str::FromStr for ImageField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository" | "name" => Ok(ImageField::Repository),
            "tag" => Ok(ImageField::Tag),
            "port" => Ok(ImageField::ExposedPort),
            "cpu" => Ok(ImageField::CpuUnits),
            "memory" => Ok(ImageField::MemoryMb),
            _ => Err(ClientError::UsageError(format!("unknown image field: {}", s))),
        }
    }
}

/// Virtual machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmConfig {
    pub os: String,
    pub instance_type: String,
    pub key_pair: String,
    pub security_group: String,
    pub subnet: String,
    pub storage_type: String,
    pub storage_size_gb: u32,
    pub user_data: String,
    pub monitoring: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            os: "amazon-linux-2".to_string(),
            instance_type: "t3.medium".to_string(),
            key_pair: String::new(),
            security_group: "default".to_string(),
            subnet: "default".to_string(),
            storage_type: "gp3".to_string(),
            storage_size_gb: 20,
            user_data: String::new(),
            monitoring: false,
        }
    }
}

/// Environment variable passed to a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// Reference to an externally stored secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretRef {
    pub name: String,
    pub value_from: String,
}

/// Managed container service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerServiceConfig {
    pub cluster_name: String,
    pub service_name: String,
    pub task_definition_family: String,

    /// CPU budget shared by all containers in one task
    pub task_cpu_units: u32,

    /// Memory budget (MB) shared by all containers in one task
    pub task_memory_mb: u32,

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
    #[serde(default)]
    pub host_port: Option<u32>,
    pub protocol: String,
    pub essential: bool,

    pub log_group: String,
    pub log_region: String,
    pub log_stream_prefix: String,

    pub environment_variables: Vec<EnvVar>,
    pub secrets: Vec<SecretRef>,

    pub health_check_enabled: bool,
    pub health_check_path: String,
    pub health_check_interval: u32,
    pub health_check_timeout: u32,
    pub health_check_retries: u32,

    #[serde(default)]
    pub cpu_reservation: Option<u32>,
    #[serde(default)]
    pub memory_reservation: Option<u32>,
    #[serde(default)]
    pub memory_hard_limit: Option<u32>,
}

impl Default for ContainerServiceConfig {
    fn default() -> Self {
        Self {
            cluster_name: String::new(),
            service_name: String::new(),
            task_definition_family: String::new(),
            task_cpu_units: 256,
            task_memory_mb: 512,
            desired_count: 1,
            load_balancer: false,
            auto_scaling: false,
            min_capacity: 1,
            max_capacity: 10,
            network_mode: "awsvpc".to_string(),
            platform_version: "LATEST".to_string(),
            assign_public_ip: true,
            subnets: Vec::new(),
            security_groups: Vec::new(),
            container_port: 80,
            host_port: None,
            protocol: "tcp".to_string(),
            essential: true,
            log_group: "/ecs/fargate-task".to_string(),
            log_region: "us-east-1".to_string(),
            log_stream_prefix: "ecs".to_string(),
            environment_variables: Vec::new(),
            secrets: Vec::new(),
            health_check_enabled: true,
            health_check_path: "/health".to_string(),
            health_check_interval: 30,
            health_check_timeout: 5,
            health_check_retries: 3,
            cpu_reservation: None,
            memory_reservation: None,
            memory_hard_limit: None,
        }
    }
}

/// Serverless function configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionConfig {
    pub runtime: String,
    pub handler: String,
    pub timeout_secs: u32,
    pub memory_mb: u32,

    /// Raw KEY=VALUE lines, forwarded verbatim
    pub environment_vars: String,

    pub trigger: TriggerKind,
    pub dead_letter_queue: bool,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            runtime: "nodejs18.x".to_string(),
            handler: "index.handler".to_string(),
            timeout_secs: 30,
            memory_mb: 128,
            environment_vars: String::new(),
            trigger: TriggerKind::HttpGateway,
            dead_letter_queue: false,
        }
    }
}

/// The aggregate deployment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub service: ServiceType,

    /// Selected regions, in insertion order
    pub regions: Vec<String>,

    /// 1 to 3 container image slots
    pub container_images: Vec<ContainerImageSpec>,

    pub vm_config: VmConfig,
    pub container_service_config: ContainerServiceConfig,
    pub function_config: FunctionConfig,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            service: ServiceType::Vm,
            regions: vec!["us-east-1".to_string()],
            container_images: vec![ContainerImageSpec {
                id: "1".to_string(),
                repository: String::new(),
                tag: "latest".to_string(),
                exposed_port: None,
                cpu_units: None,
                memory_mb: None,
            }],
            vm_config: VmConfig::default(),
            container_service_config: ContainerServiceConfig::default(),
            function_config: FunctionConfig::default(),
        }
    }
}

impl DeploymentConfig {
    /// Image slots that name an actual image
    pub fn named_images(&self) -> impl Iterator<Item = &ContainerImageSpec> {
        self.container_images.iter().filter(|img| img.is_named())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ClientError> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(ClientError::UsageError(format!(
            "{}: expected a boolean, got '{}'",
            key, value
        ))),
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ClientError> {
    value
        .parse()
        .map_err(|_| ClientError::UsageError(format!("{}: expected a number, got '{}'", key, value)))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `NAME=VALUE;NAME2=VALUE2` pairs
fn parse_pairs(key: &str, value: &str) -> Result<Vec<(String, String)>, ClientError> {
    value
        .split(';')
        .filter(|s| !s.trim().is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| {
                    ClientError::UsageError(format!("{}: expected NAME=VALUE pairs, got '{}'", key, pair))
                })
        })
        .collect()
}

/// Partial update for [`VmConfig`]
#[derive(Debug, Clone, Default)]
pub struct VmConfigPatch {
    pub os: Option<String>,
    pub instance_type: Option<String>,
    pub key_pair: Option<String>,
    pub security_group: Option<String>,
    pub subnet: Option<String>,
    pub storage_type: Option<String>,
    pub storage_size_gb: Option<u32>,
    pub user_data: Option<String>,
    pub monitoring: Option<bool>,
}

impl VmConfigPatch {
    /// Build a single-field patch from a `key=value` pair
    pub fn from_kv(key: &str, value: &str) -> Result<Self, ClientError> {
        let mut patch = Self::default();
        match key {
            "os" => patch.os = Some(value.to_string()),
            "instance-type" => patch.instance_type = Some(value.to_string()),
            "key-pair" => patch.key_pair = Some(value.to_string()),
            "security-group" => patch.security_group = Some(value.to_string()),
            "subnet" => patch.subnet = Some(value.to_string()),
            "storage-type" => patch.storage_type = Some(value.to_string()),
            "storage-size" => patch.storage_size_gb = Some(parse_u32(key, value)?),
            "user-data" => patch.user_data = Some(value.to_string()),
            "monitoring" => patch.monitoring = Some(parse_bool(key, value)?),
            _ => return Err(ClientError::UsageError(format!("unknown vm field: {}", key))),
        }
        Ok(patch)
    }

    pub fn apply(self, config: &mut VmConfig) {
        if let Some(v) = self.os {
            config.os = v;
        }
        if let Some(v) = self.instance_type {
            config.instance_type = v;
        }
        if let Some(v) = self.key_pair {
            config.key_pair = v;
        }
        if let Some(v) = self.security_group {
            config.security_group = v;
        }
        if let Some(v) = self.subnet {
            config.subnet = v;
        }
        if let Some(v) = self.storage_type {
            config.storage_type = v;
        }
        if let Some(v) = self.storage_size_gb {
            config.storage_size_gb = v;
        }
        if let Some(v) = self.user_data {
            config.user_data = v;
        }
        if let Some(v) = self.monitoring {
            config.monitoring = v;
        }
    }
}

/// Partial update for [`ContainerServiceConfig`]
#[derive(Debug, Clone, Default)]
pub struct ContainerServiceConfigPatch {
    pub cluster_name: Option<String>,
    pub service_name: Option<String>,
    pub task_definition_family: Option<String>,
    pub task_cpu_units: Option<u32>,
    pub task_memory_mb: Option<u32>,
    pub desired_count: Option<u32>,
    pub load_balancer: Option<bool>,
    pub auto_scaling: Option<bool>,
    pub min_capacity: Option<u32>,
    pub max_capacity: Option<u32>,
    pub network_mode: Option<String>,
    pub platform_version: Option<String>,
    pub assign_public_ip: Option<bool>,
    pub subnets: Option<Vec<String>>,
    pub security_groups: Option<Vec<String>>,
    pub container_port: Option<u32>,
    pub host_port: Option<Option<u32>>,
    pub protocol: Option<String>,
    pub essential: Option<bool>,
    pub log_group: Option<String>,
    pub log_region: Option<String>,
    pub log_stream_prefix: Option<String>,
    pub environment_variables: Option<Vec<EnvVar>>,
    pub secrets: Option<Vec<SecretRef>>,
    pub health_check_enabled: Option<bool>,
    pub health_check_path: Option<String>,
    pub health_check_interval: Option<u32>,
    pub health_check_timeout: Option<u32>,
    pub health_check_retries: Option<u32>,
    pub cpu_reservation: Option<Option<u32>>,
    pub memory_reservation: Option<Option<u32>>,
    pub memory_hard_limit: Option<Option<u32>>,
}

impl ContainerServiceConfigPatch {
    /// Build a single-field patch from a `key=value` pair
    pub fn from_kv(key: &str, value: &str) -> Result<Self, ClientError> {
        let mut patch = Self::default();
        match key {
            "cluster-name" => patch.cluster_name = Some(value.to_string()),
            "service-name" => patch.service_name = Some(value.to_string()),
            "task-family" => patch.task_definition_family = Some(value.to_string()),
            "task-cpu" => patch.task_cpu_units = Some(parse_u32(key, value)?),
            "task-memory" => patch.task_memory_mb = Some(parse_u32(key, value)?),
            "desired-count" => patch.desired_count = Some(parse_u32(key, value)?),
            "load-balancer" => patch.load_balancer = Some(parse_bool(key, value)?),
            "auto-scaling" => patch.auto_scaling = Some(parse_bool(key, value)?),
            "min-capacity" => patch.min_capacity = Some(parse_u32(key, value)?),
            "max-capacity" => patch.max_capacity = Some(parse_u32(key, value)?),
            "network-mode" => patch.network_mode = Some(value.to_string()),
            "platform-version" => patch.platform_version = Some(value.to_string()),
            "assign-public-ip" => patch.assign_public_ip = Some(parse_bool(key, value)?),
            "subnets" => patch.subnets = Some(parse_list(value)),
            "security-groups" => patch.security_groups = Some(parse_list(value)),
            "container-port" => patch.container_port = Some(parse_u32(key, value)?),
            "host-port" => patch.host_port = Some(Some(parse_u32(key, value)?)),
            "protocol" => patch.protocol = Some(value.to_string()),
            "essential" => patch.essential = Some(parse_bool(key, value)?),
            "log-group" => patch.log_group = Some(value.to_string()),
            "log-region" => patch.log_region = Some(value.to_string()),
            "log-stream-prefix" => patch.log_stream_prefix = Some(value.to_string()),
            "env" => {
                patch.environment_variables = Some(
                    parse_pairs(key, value)?
                        .into_iter()
                        .map(|(name, value)| EnvVar { name, value })
                        .collect(),
                )
            }
            "secrets" => {
                patch.secrets = Some(
                    parse_pairs(key, value)?
                        .into_iter()
                        .map(|(name, value_from)| SecretRef { name, value_from })
                        .collect(),
                )
            }
            "health-check" => patch.health_check_enabled = Some(parse_bool(key, value)?),
            "health-check-path" => patch.health_check_path = Some(value.to_string()),
            "health-check-interval" => patch.health_check_interval = Some(parse_u32(key, value)?),
            "health-check-timeout" => patch.health_check_timeout = Some(parse_u32(key, value)?),
            "health-check-retries" => patch.health_check_retries = Some(parse_u32(key, value)?),
            "cpu-reservation" => patch.cpu_reservation = Some(Some(parse_u32(key, value)?)),
            "memory-reservation" => patch.memory_reservation = Some(Some(parse_u32(key, value)?)),
            "memory-hard-limit" => patch.memory_hard_limit = Some(Some(parse_u32(key, value)?)),
            _ => return Err(ClientError::UsageError(format!("unknown ecs field: {}", key))),
        }
        Ok(patch)
    }

    pub fn apply(self, config: &mut ContainerServiceConfig) {
        if let Some(v) = self.cluster_name {
            config.cluster_name = v;
        }
        if let Some(v) = self.service_name {
            config.service_name = v;
        }
        if let Some(v) = self.task_definition_family {
            config.task_definition_family = v;
        }
        if let Some(v) = self.task_cpu_units {
            config.task_cpu_units = v;
        }
        if let Some(v) = self.task_memory_mb {
            config.task_memory_mb = v;
        }
        if let Some(v) = self.desired_count {
            config.desired_count = v;
        }
        if let Some(v) = self.load_balancer {
            config.load_balancer = v;
        }
        if let Some(v) = self.auto_scaling {
            config.auto_scaling = v;
        }
        if let Some(v) = self.min_capacity {
            config.min_capacity = v;
        }
        if let Some(v) = self.max_capacity {
            config.max_capacity = v;
        }
        if let Some(v) = self.network_mode {
            config.network_mode = v;
        }
        if let Some(v) = self.platform_version {
            config.platform_version = v;
        }
        if let Some(v) = self.assign_public_ip {
            config.assign_public_ip = v;
        }
        if let Some(v) = self.subnets {
            config.subnets = v;
        }
        if let Some(v) = self.security_groups {
            config.security_groups = v;
        }
        if let Some(v) = self.container_port {
            config.container_port = v;
        }
        if let Some(v) = self.host_port {
            config.host_port = v;
        }
        if let Some(v) = self.protocol {
            config.protocol = v;
        }
        if let Some(v) = self.essential {
            config.essential = v;
        }
        if let Some(v) = self.log_group {
            config.log_group = v;
        }
        if let Some(v) = self.log_region {
            config.log_region = v;
        }
        if let Some(v) = self.log_stream_prefix {
            config.log_stream_prefix = v;
        }
        if let Some(v) = self.environment_variables {
            config.environment_variables = v;
        }
        if let Some(v) = self.secrets {
            config.secrets = v;
        }
        if let Some(v) = self.health_check_enabled {
            config.health_check_enabled = v;
        }
        if let Some(v) = self.health_check_path {
            config.health_check_path = v;
        }
        if let Some(v) = self.health_check_interval {
            config.health_check_interval = v;
        }
        if let Some(v) = self.health_check_timeout {
            config.health_check_timeout = v;
        }
        if let Some(v) = self.health_check_retries {
            config.health_check_retries = v;
        }
        if let Some(v) = self.cpu_reservation {
            config.cpu_reservation = v;
        }
        if let Some(v) = self.memory_reservation {
            config.memory_reservation = v;
        }
        if let Some(v) = self.memory_hard_limit {
            config.memory_hard_limit = v;
        }
    }
}

/// Partial update for [`FunctionConfig`]
#[derive(Debug, Clone, Default)]
pub struct FunctionConfigPatch {
    pub runtime: Option<String>,
    pub handler: Option<String>,
    pub timeout_secs: Option<u32>,
    pub memory_mb: Option<u32>,
    pub environment_vars: Option<String>,
    pub trigger: Option<TriggerKind>,
    pub dead_letter_queue: Option<bool>,
}

impl FunctionConfigPatch {
    /// Build a single-field patch from a `key=value` pair.
    ///
    /// Timeout and memory are clamped to the catalog bounds here, matching the
    /// range-limited input widgets of the original wizard.
    pub fn from_kv(key: &str, value: &str) -> Result<Self, ClientError> {
        let mut patch = Self::default();
        match key {
            "runtime" => patch.runtime = Some(value.to_string()),
            "handler" => patch.handler = Some(value.to_string()),
            "timeout" => {
                patch.timeout_secs = Some(crate::catalog::clamp_function_timeout(parse_u32(key, value)?))
            }
            "memory" => {
                patch.memory_mb = Some(crate::catalog::clamp_function_memory(parse_u32(key, value)?))
            }
            "env" => patch.environment_vars = Some(value.to_string()),
            "trigger" => patch.trigger = Some(value.parse()?),
            "dead-letter-queue" => patch.dead_letter_queue = Some(parse_bool(key, value)?),
            _ => return Err(ClientError::UsageError(format!("unknown lambda field: {}", key))),
        }
        Ok(patch)
    }

    pub fn apply(self, config: &mut FunctionConfig) {
        if let Some(v) = self.runtime {
            config.runtime = v;
        }
        if let Some(v) = self.handler {
            config.handler = v;
        }
        if let Some(v) = self.timeout_secs {
            config.timeout_secs = v;
        }
        if let Some(v) = self.memory_mb {
            config.memory_mb = v;
        }
        if let Some(v) = self.environment_vars {
            config.environment_vars = v;
        }
        if let Some(v) = self.trigger {
            config.trigger = v;
        }
        if let Some(v) = self.dead_letter_queue {
            config.dead_letter_queue = v;
        }
    }
}
