//! Static catalog of selectable services, regions, and instance pricing
//!
//! Everything here mirrors what the orchestrator backend provisions against;
//! the lists are fixed and never fetched at runtime.

use serde::{Deserialize, Serialize};

use crate::models::config::ServiceType;

/// Relative latency bucket for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyClass {
    Low,
    Medium,
    High,
}

/// A selectable deployment region
#[derive(Debug, Clone)]
pub struct Region {
    /// Region identifier as the backend knows it
    pub id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Flag glyph for display
    pub flag: &'static str,

    /// Latency bucket
    pub latency: LatencyClass,

    /// Static cost scaling factor relative to the cheapest region
    pub price_multiplier: f64,
}

/// A selectable compute service
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub service: ServiceType,
    pub name: &'static str,
    pub description: &'static str,
}

/// A value/label pair for fixed option lists
#[derive(Debug, Clone)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const SERVICES: &[ServiceInfo] = &[
    ServiceInfo {
        service: ServiceType::Vm,
        name: "Virtual Machine",
        description: "Scalable virtual server",
    },
    ServiceInfo {
        service: ServiceType::ContainerService,
        name: "Container Service",
        description: "Managed container tasks",
    },
    ServiceInfo {
        service: ServiceType::Function,
        name: "Function",
        description: "Serverless functions",
    },
];

pub const REGIONS: &[Region] = &[
    Region {
        id: "us-east-1",
        name: "US East (N. Virginia)",
        flag: "\u{1F1FA}\u{1F1F8}",
        latency: LatencyClass::Low,
        price_multiplier: 1.0,
    },
    Region {
        id: "us-west-2",
        name: "US West (Oregon)",
        flag: "\u{1F1FA}\u{1F1F8}",
        latency: LatencyClass::Low,
        price_multiplier: 1.05,
    },
    Region {
        id: "eu-west-1",
        name: "Europe (Ireland)",
        flag: "\u{1F1EE}\u{1F1EA}",
        latency: LatencyClass::Medium,
        price_multiplier: 1.1,
    },
    Region {
        id: "eu-central-1",
        name: "Europe (Frankfurt)",
        flag: "\u{1F1E9}\u{1F1EA}",
        latency: LatencyClass::Medium,
        price_multiplier: 1.15,
    },
    Region {
        id: "ap-southeast-1",
        name: "Asia Pacific (Singapore)",
        flag: "\u{1F1F8}\u{1F1EC}",
        latency: LatencyClass::High,
        price_multiplier: 1.2,
    },
    Region {
        id: "ap-northeast-1",
        name: "Asia Pacific (Tokyo)",
        flag: "\u{1F1EF}\u{1F1F5}",
        latency: LatencyClass::High,
        price_multiplier: 1.25,
    },
    Region {
        id: "sa-east-1",
        name: "South America (S\u{e3}o Paulo)",
        flag: "\u{1F1E7}\u{1F1F7}",
        latency: LatencyClass::High,
        price_multiplier: 1.3,
    },
    Region {
        id: "ca-central-1",
        name: "Canada (Central)",
        flag: "\u{1F1E8}\u{1F1E6}",
        latency: LatencyClass::Low,
        price_multiplier: 1.08,
    },
];

pub const OPERATING_SYSTEMS: &[CatalogOption] = &[
    CatalogOption { value: "amazon-linux-2", label: "Amazon Linux 2" },
    CatalogOption { value: "ubuntu-20.04", label: "Ubuntu 20.04 LTS" },
    CatalogOption { value: "ubuntu-22.04", label: "Ubuntu 22.04 LTS" },
    CatalogOption { value: "windows-2019", label: "Windows Server 2019" },
    CatalogOption { value: "windows-2022", label: "Windows Server 2022" },
    CatalogOption { value: "rhel-8", label: "Red Hat Enterprise Linux 8" },
    CatalogOption { value: "centos-7", label: "CentOS 7" },
];

pub const RUNTIMES: &[CatalogOption] = &[
    CatalogOption { value: "nodejs18.x", label: "Node.js 18.x" },
    CatalogOption { value: "nodejs16.x", label: "Node.js 16.x" },
    CatalogOption { value: "python3.9", label: "Python 3.9" },
    CatalogOption { value: "python3.8", label: "Python 3.8" },
    CatalogOption { value: "java11", label: "Java 11" },
    CatalogOption { value: "java8", label: "Java 8" },
    CatalogOption { value: "dotnet6", label: ".NET 6" },
    CatalogOption { value: "go1.x", label: "Go 1.x" },
    CatalogOption { value: "ruby2.7", label: "Ruby 2.7" },
];

/// Hourly rate per instance size class, in USD
pub const INSTANCE_RATES: &[(&str, f64)] = &[
    ("t3.micro", 0.0104),
    ("t3.small", 0.0208),
    ("t3.medium", 0.0416),
    ("t3.large", 0.0832),
    ("t3.xlarge", 0.1664),
];

/// Fallback rate for unknown instance classes (the medium tier)
pub const DEFAULT_INSTANCE_RATE: f64 = 0.0416;

/// CPU unit choices for a single container within a task
pub const IMAGE_CPU_UNITS: &[u32] = &[128, 256, 512, 1024, 2048, 4096, 8192, 16384];

/// Memory (MB) choices for a single container within a task
pub const IMAGE_MEMORY_MB: &[u32] = &[128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536];

pub const FUNCTION_MEMORY_MIN_MB: u32 = 128;
pub const FUNCTION_MEMORY_MAX_MB: u32 = 10240;
pub const FUNCTION_MEMORY_STEP_MB: u32 = 64;

pub const FUNCTION_TIMEOUT_MIN_SECS: u32 = 1;
pub const FUNCTION_TIMEOUT_MAX_SECS: u32 = 900;

/// Look up a region by id
pub fn region(id: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.id == id)
}

/// Hourly rate for an instance size class, falling back to the medium tier
pub fn instance_hourly_rate(instance_type: &str) -> f64 {
    INSTANCE_RATES
        .iter()
        .find(|(class, _)| *class == instance_type)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_INSTANCE_RATE)
}

/// Clamp a function memory size to the allowed range and 64 MB granularity
pub fn clamp_function_memory(memory_mb: u32) -> u32 {
    let clamped = memory_mb.clamp(FUNCTION_MEMORY_MIN_MB, FUNCTION_MEMORY_MAX_MB);
    clamped - clamped % FUNCTION_MEMORY_STEP_MB
}

/// Clamp a function timeout to the allowed range
pub fn clamp_function_timeout(timeout_secs: u32) -> u32 {
    timeout_secs.clamp(FUNCTION_TIMEOUT_MIN_SECS, FUNCTION_TIMEOUT_MAX_SECS)
}
