//! Deployment request builder
//!
//! Translates the edited configuration into the backend's create payload.
//! Only the sub-config matching the selected service is included; blank
//! image slots are dropped.

use crate::models::api::{DeploymentRequest, ServiceRequest, WireImage, WireService};
use crate::models::config::{DeploymentConfig, ServiceType};

/// Build the create payload for the current configuration
pub fn build_request(config: &DeploymentConfig) -> DeploymentRequest {
    let docker_images = config
        .named_images()
        .map(|img| WireImage {
            id: img.id.clone(),
            name: img.repository.clone(),
            tag: img.tag.clone(),
        })
        .collect();

    let (service, service_config) = match config.service {
        ServiceType::Vm => (
            WireService::Ec2,
            ServiceRequest::Vm((&config.vm_config).into()),
        ),
        ServiceType::ContainerService => (
            WireService::Ecs,
            ServiceRequest::ContainerService((&config.container_service_config).into()),
        ),
        ServiceType::Function => (
            WireService::Lambda,
            ServiceRequest::Function((&config.function_config).into()),
        ),
    };

    DeploymentRequest {
        service,
        regions: config.regions.clone(),
        docker_images,
        config: service_config,
    }
}
