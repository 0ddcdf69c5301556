//! Monthly cost estimation
//!
//! Pure function of the configuration. The estimate models running the same
//! deployment independently in every selected region, so the region factor is
//! the sum of the selected multipliers, not their average. Per-region entries
//! apply a single multiplier to the same base cost, which keeps the total
//! equal to the sum of the breakdown by construction.

use crate::catalog;
use crate::models::config::{DeploymentConfig, ServiceType};

/// Hours billed per month in the estimate
const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Invocations assumed per month for function estimates
const FUNCTION_INVOCATIONS: f64 = 1_000_000.0;

/// Cost contribution of one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCost {
    pub region: String,
    pub flag: String,
    pub cost: f64,
}

impl RegionCost {
    /// Cost formatted to two decimal places
    pub fn display(&self) -> String {
        format!("{:.2}", self.cost)
    }
}

/// Estimated monthly cost
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub total: f64,
    pub breakdown: Vec<RegionCost>,
}

impl CostEstimate {
    /// Total formatted to two decimal places
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total)
    }
}

/// Estimate the monthly cost of a configuration
pub fn estimate(config: &DeploymentConfig) -> CostEstimate {
    let base = base_cost(config);

    // Unknown region ids count as multiplier 1.0 in the total but are
    // dropped from the breakdown, matching the observed behavior.
    let region_factor: f64 = config
        .regions
        .iter()
        .map(|id| catalog::region(id).map(|r| r.price_multiplier).unwrap_or(1.0))
        .sum();

    let breakdown = config
        .regions
        .iter()
        .filter_map(|id| catalog::region(id))
        .map(|region| RegionCost {
            region: region.name.to_string(),
            flag: region.flag.to_string(),
            cost: base * region.price_multiplier,
        })
        .collect();

    CostEstimate {
        total: base * region_factor,
        breakdown,
    }
}

/// Base monthly cost for a single region at multiplier 1.0
fn base_cost(config: &DeploymentConfig) -> f64 {
    match config.service {
        ServiceType::Vm => {
            let vm = &config.vm_config;
            let hourly = catalog::instance_hourly_rate(&vm.instance_type);
            let mut cost = hourly * HOURS_PER_MONTH + f64::from(vm.storage_size_gb) * 0.10;
            if vm.monitoring {
                cost += 2.10;
            }
            cost
        }

        ServiceType::ContainerService => {
            let ecs = &config.container_service_config;
            let per_task = f64::from(ecs.task_cpu_units) / 1024.0 * 0.04048
                + f64::from(ecs.task_memory_mb) / 1024.0 * 0.004445;
            let mut cost = per_task * HOURS_PER_MONTH * f64::from(ecs.desired_count);
            if ecs.load_balancer {
                cost += 16.20;
            }
            cost
        }

        ServiceType::Function => {
            let function = &config.function_config;
            let request_cost = FUNCTION_INVOCATIONS * 0.0000002;
            // The timeout is divided by 1000 even though it is already in
            // seconds. Kept verbatim: the published estimates depend on it.
            let compute_cost = f64::from(function.memory_mb) / 1024.0
                * (f64::from(function.timeout_secs) / 1000.0)
                * 0.0000166667
                * FUNCTION_INVOCATIONS;
            request_cost + compute_cost
        }
    }
}
