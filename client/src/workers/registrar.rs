//! Fire-and-forget image registration
//!
//! Each named image is registered with the backend in its own detached task.
//! Failures are logged and never affect the local image list, which has
//! already been updated by the time these tasks run.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::http::client::ApiClient;
use crate::models::api::ImageCreateRequest;
use crate::models::config::ContainerImageSpec;

/// Spawn one registration task per named image.
///
/// The returned handles exist so callers that are about to exit (the one-shot
/// CLI) can wait for the requests to leave; long-lived callers may drop them.
pub fn register_images(client: Arc<ApiClient>, images: &[ContainerImageSpec]) -> Vec<JoinHandle<()>> {
    images
        .iter()
        .filter(|img| img.is_named())
        .map(|img| {
            let client = client.clone();
            let request = ImageCreateRequest {
                name: img.repository.clone(),
                tag: img.tag.clone(),
            };
            tokio::spawn(async move {
                match client.create_image(&request).await {
                    Ok(_) => debug!("Registered image {}:{}", request.name, request.tag),
                    Err(e) => error!("Failed to register image {}:{}: {}", request.name, request.tag, e),
                }
            })
        })
        .collect()
}
