//! Validation engine tests

use stratoctl::models::config::{DeploymentConfig, ServiceType};
use stratoctl::validate::{image_budget, validate};

fn vm_config_ready() -> DeploymentConfig {
    let mut config = DeploymentConfig::default();
    config.vm_config.key_pair = "deploy-key".to_string();
    config.container_images[0].repository = "nginx".to_string();
    config
}

fn ecs_config_ready() -> DeploymentConfig {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;
    config.container_service_config.cluster_name = "prod".to_string();
    config.container_service_config.service_name = "web".to_string();
    config.container_service_config.task_definition_family = "web-task".to_string();
    config.container_service_config.subnets = vec!["subnet-1".to_string()];
    config.container_service_config.security_groups = vec!["sg-1".to_string()];
    config.container_images[0].repository = "nginx".to_string();
    config
}

#[test]
fn test_empty_regions_is_an_error() {
    let mut config = vm_config_ready();
    config.regions.clear();

    let result = validate(&config);
    assert!(!result.is_valid());
    assert!(result
        .errors
        .contains(&"At least one region must be selected".to_string()));
}

#[test]
fn test_ready_vm_config_is_valid() {
    let result = validate(&vm_config_ready());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_vm_requires_key_pair_and_image() {
    let result = validate(&DeploymentConfig::default());
    assert!(!result.is_valid());
    assert!(result
        .errors
        .contains(&"A key pair is required for virtual machines".to_string()));
    assert!(result
        .errors
        .contains(&"At least one container image must be specified".to_string()));
}

#[test]
fn test_vm_small_storage_warns_but_does_not_block() {
    let mut config = vm_config_ready();
    config.vm_config.storage_size_gb = 4;

    let result = validate(&config);
    assert!(result.is_valid());
    assert!(result
        .warnings
        .contains(&"The recommended minimum storage size is 8 GB".to_string()));
}

#[test]
fn test_ready_ecs_config_is_valid() {
    let result = validate(&ecs_config_ready());
    assert!(result.is_valid());
}

#[test]
fn test_ecs_requires_names_networking_and_image() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;

    let result = validate(&config);
    let expected = [
        "A cluster name is required",
        "A service name is required",
        "A task definition family is required",
        "At least one container image must be specified",
        "At least one subnet must be specified",
        "At least one security group must be specified",
    ];
    for message in expected {
        assert!(result.errors.contains(&message.to_string()), "missing: {}", message);
    }
}

#[test]
fn test_ecs_container_port_bounds() {
    let mut config = ecs_config_ready();
    config.container_service_config.container_port = 0;
    assert!(validate(&config)
        .errors
        .contains(&"The container port must be between 1 and 65535".to_string()));

    config.container_service_config.container_port = 70000;
    assert!(validate(&config)
        .errors
        .contains(&"The container port must be between 1 and 65535".to_string()));

    config.container_service_config.container_port = 65535;
    assert!(validate(&config).is_valid());
}

#[test]
fn test_ecs_low_memory_warns() {
    let mut config = ecs_config_ready();
    config.container_service_config.task_memory_mb = 256;

    let result = validate(&config);
    assert!(result.is_valid());
    assert!(result
        .warnings
        .contains(&"At least 512 MB of task memory is recommended".to_string()));
}

#[test]
fn test_function_requires_handler() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::Function;
    config.function_config.handler = String::new();

    let result = validate(&config);
    assert!(result
        .errors
        .contains(&"A handler is required for functions".to_string()));
}

#[test]
fn test_default_function_config_is_valid() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::Function;

    let result = validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validation_is_idempotent() {
    let config = DeploymentConfig::default();
    assert_eq!(validate(&config), validate(&config));
}

#[test]
fn test_image_budget_overrun_does_not_block_submission() {
    let mut config = ecs_config_ready();
    // Default task budget is 256 CPU units / 512 MB
    config.container_images[0].cpu_units = Some(512);
    config.container_images[0].memory_mb = Some(1024);

    let result = validate(&config);
    assert!(result.is_valid());

    let budget = image_budget(&config);
    assert!(budget.exceeded());
    assert_eq!(budget.cpu_used, 512);
    assert_eq!(budget.cpu_budget, 256);
    assert_eq!(budget.memory_used, 1024);
    assert_eq!(budget.memory_budget, 512);
}
