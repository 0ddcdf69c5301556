//! Cost estimator tests
//!
//! Dollar figures asserted here are the published estimates; a change in any
//! of them is a pricing change, not a refactor.

use stratoctl::cost::estimate;
use stratoctl::models::config::{DeploymentConfig, ServiceType};

#[test]
fn test_default_vm_estimate() {
    // t3.medium at 0.0416/h * 720h + 20 GB * 0.10, single region at 1.0
    let config = DeploymentConfig::default();
    let result = estimate(&config);
    assert_eq!(result.total_display(), "31.95");
    assert_eq!(result.breakdown.len(), 1);
    assert_eq!(result.breakdown[0].region, "US East (N. Virginia)");
}

#[test]
fn test_vm_monitoring_surcharge() {
    let mut config = DeploymentConfig::default();
    config.vm_config.monitoring = true;

    let with = estimate(&config).total;
    config.vm_config.monitoring = false;
    let without = estimate(&config).total;
    assert!((with - without - 2.10).abs() < 1e-9);
}

#[test]
fn test_unknown_instance_type_uses_fallback_rate() {
    let mut config = DeploymentConfig::default();
    config.vm_config.instance_type = "m9.colossal".to_string();

    // Fallback rate equals t3.medium
    assert_eq!(estimate(&config).total_display(), "31.95");
}

#[test]
fn test_default_ecs_estimate() {
    // (256/1024 * 0.04048 + 512/1024 * 0.004445) * 720h * 1 task
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;

    let result = estimate(&config);
    assert_eq!(result.total_display(), "8.89");
}

#[test]
fn test_ecs_load_balancer_surcharge_scales_with_regions() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;
    config.container_service_config.load_balancer = true;

    // The surcharge is part of the base cost, so it is multiplied per region
    let one_region = estimate(&config).total;
    config.regions.push("us-west-2".to_string());
    let two_regions = estimate(&config).total;
    assert!((two_regions - one_region * 2.05).abs() < 1e-9);
}

#[test]
fn test_ecs_estimate_scales_with_desired_count() {
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;

    let one = estimate(&config).total;
    config.container_service_config.desired_count = 3;
    let three = estimate(&config).total;
    assert!((three - one * 3.0).abs() < 1e-9);
}

#[test]
fn test_function_estimate_minimal() {
    // 1M requests at 0.0000002 plus compute at 128 MB with a 1 second timeout
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::Function;
    config.function_config.timeout_secs = 1;
    config.function_config.memory_mb = 128;

    let result = estimate(&config);
    assert!((result.total - 0.2020833).abs() < 1e-4);
    assert_eq!(result.total_display(), "0.20");
}

#[test]
fn test_total_equals_breakdown_sum() {
    let mut config = DeploymentConfig::default();
    config.regions = vec![
        "us-east-1".to_string(),
        "eu-central-1".to_string(),
        "ap-northeast-1".to_string(),
        "sa-east-1".to_string(),
    ];

    let result = estimate(&config);
    assert_eq!(result.breakdown.len(), 4);
    let sum: f64 = result.breakdown.iter().map(|entry| entry.cost).sum();
    assert!((result.total - sum).abs() < 1e-9);
}

#[test]
fn test_unknown_region_counts_in_total_but_not_breakdown() {
    let mut config = DeploymentConfig::default();
    config.regions = vec!["us-east-1".to_string(), "mars-north-1".to_string()];

    let result = estimate(&config);
    assert_eq!(result.breakdown.len(), 1);
    // Unknown regions contribute the base cost at multiplier 1.0
    let sum: f64 = result.breakdown.iter().map(|entry| entry.cost).sum();
    assert!((result.total - sum * 2.0).abs() < 1e-9);
}

#[test]
fn test_estimate_is_pure() {
    let config = DeploymentConfig::default();
    assert_eq!(estimate(&config), estimate(&config));
}

#[test]
fn test_empty_regions_estimate_is_zero() {
    let mut config = DeploymentConfig::default();
    config.regions.clear();

    let result = estimate(&config);
    assert_eq!(result.total, 0.0);
    assert!(result.breakdown.is_empty());
}
