//! Request builder and wire format tests
//!
//! The serialized shapes asserted here are a compatibility contract with the
//! backend; key names must stay camelCase regardless of internal naming.

use serde_json::Value;
use stratoctl::catalog::{clamp_function_memory, clamp_function_timeout};
use stratoctl::deploy::request::build_request;
use stratoctl::models::config::{
    DeploymentConfig, FunctionConfigPatch, ServiceType, TriggerKind,
};

fn to_json(config: &DeploymentConfig) -> Value {
    serde_json::to_value(build_request(config)).unwrap()
}

#[test]
fn test_vm_request_shape() {
    let mut config = DeploymentConfig::default();
    config.vm_config.key_pair = "deploy-key".to_string();
    config.container_images[0].repository = "nginx".to_string();

    let json = to_json(&config);
    assert_eq!(json["service"], "ec2");
    assert_eq!(json["regions"], serde_json::json!(["us-east-1"]));

    let vm = &json["ec2Config"];
    assert_eq!(vm["instanceType"], "t3.medium");
    assert_eq!(vm["keyPair"], "deploy-key");
    assert_eq!(vm["storageSize"], 20);
    assert_eq!(vm["monitoring"], false);

    // Exactly one service section is present
    assert!(json.get("ecsConfig").is_none());
    assert!(json.get("lambdaConfig").is_none());
}

#[test]
fn test_ecs_request_shape() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;
    config.container_service_config.cluster_name = "prod".to_string();

    let json = to_json(&config);
    assert_eq!(json["service"], "ecs");

    let ecs = &json["ecsConfig"];
    assert_eq!(ecs["clusterName"], "prod");
    assert_eq!(ecs["taskCpu"], 256);
    assert_eq!(ecs["taskMemory"], 512);
    assert_eq!(ecs["assignPublicIp"], true);
    assert_eq!(ecs["healthCheckEnabled"], true);

    // Unset optionals are omitted, not serialized as null
    assert!(ecs.get("hostPort").is_none());
    assert!(ecs.get("cpuReservation").is_none());
}

#[test]
fn test_lambda_request_shape() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::Function;
    config.function_config.trigger = TriggerKind::Queue;

    let json = to_json(&config);
    assert_eq!(json["service"], "lambda");

    let lambda = &json["lambdaConfig"];
    assert_eq!(lambda["runtime"], "nodejs18.x");
    assert_eq!(lambda["handler"], "index.handler");
    assert_eq!(lambda["timeout"], 30);
    assert_eq!(lambda["memory"], 128);
    assert_eq!(lambda["trigger"], "sqs");
    assert_eq!(lambda["deadLetterQueue"], false);
}

#[test]
fn test_blank_image_slots_are_dropped() {
    let mut config = DeploymentConfig::default();
    config.container_images[0].repository = "nginx".to_string();
    config.container_images.push(stratoctl::models::config::ContainerImageSpec::blank());

    let json = to_json(&config);
    let images = json["dockerImages"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["name"], "nginx");
    assert_eq!(images[0]["tag"], "latest");
}

#[test]
fn test_image_entries_carry_only_identity() {
    let mut config = DeploymentConfig::default();
    config.container_images[0].repository = "nginx".to_string();
    config.container_images[0].cpu_units = Some(256);

    let json = to_json(&config);
    let entry = json["dockerImages"][0].as_object().unwrap();
    let mut keys: Vec<&str> = entry.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "name", "tag"]);
}

#[test]
fn test_sibling_configs_never_leak_into_payload() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::Function;
    // Edits to the other sub-configs stay local
    config.vm_config.key_pair = "deploy-key".to_string();
    config.container_service_config.cluster_name = "prod".to_string();

    let json = to_json(&config);
    assert!(json.get("ec2Config").is_none());
    assert!(json.get("ecsConfig").is_none());
    assert!(json.get("lambdaConfig").is_some());
}

#[test]
fn test_function_memory_clamps_to_step() {
    assert_eq!(clamp_function_memory(64), 128);
    assert_eq!(clamp_function_memory(1000), 960);
    assert_eq!(clamp_function_memory(10240), 10240);
    assert_eq!(clamp_function_memory(20000), 10240);
}

#[test]
fn test_function_timeout_clamps_to_range() {
    assert_eq!(clamp_function_timeout(0), 1);
    assert_eq!(clamp_function_timeout(30), 30);
    assert_eq!(clamp_function_timeout(2000), 900);
}

#[test]
fn test_function_patch_clamps_on_parse() {
    let patch = FunctionConfigPatch::from_kv("memory", "1000").unwrap();
    assert_eq!(patch.memory_mb, Some(960));

    let patch = FunctionConfigPatch::from_kv("timeout", "2000").unwrap();
    assert_eq!(patch.timeout_secs, Some(900));
}
