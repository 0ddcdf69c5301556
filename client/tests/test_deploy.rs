//! Deploy command gating tests
//!
//! The backend address in these tests is unroutable, so any attempted
//! request would surface as a connection or authentication failure. The
//! assertions rely on that to prove which side of the submission gate a
//! configuration lands on.

use std::path::PathBuf;

use stratoctl::app::options::AppOptions;
use stratoctl::app::run::{run, Command};
use stratoctl::errors::ClientError;
use stratoctl::models::config::{DeploymentConfig, ServiceType};
use stratoctl::storage::layout::StorageLayout;
use stratoctl::storage::session;

fn temp_layout() -> (PathBuf, StorageLayout) {
    let dir = std::env::temp_dir().join(format!("strato-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    (dir.clone(), StorageLayout::new(dir))
}

fn unroutable_options(storage: StorageLayout) -> AppOptions {
    AppOptions {
        backend_base_url: "http://192.0.2.1:1/api".to_string(),
        storage,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_deploy_with_invalid_config_never_submits() {
    let (_dir, layout) = temp_layout();

    // Container service with its required names left empty
    let mut config = DeploymentConfig::default();
    config.service = ServiceType::ContainerService;
    session::save_config(&layout.config_file(), &config).await.unwrap();

    let result = run(unroutable_options(layout), Command::Deploy).await;

    // A validation failure, not a connection or auth error: the create
    // request was never attempted
    assert!(matches!(result, Err(ClientError::ValidationError(_))));
}

#[tokio::test]
async fn test_deploy_with_valid_config_reaches_submission() {
    let (_dir, layout) = temp_layout();

    let mut config = DeploymentConfig::default();
    config.vm_config.key_pair = "deploy-key".to_string();
    config.container_images[0].repository = "nginx".to_string();
    session::save_config(&layout.config_file(), &config).await.unwrap();

    let result = run(unroutable_options(layout), Command::Deploy).await;

    // Validation passes, so the command proceeds to submission and fails
    // there (no token is stored)
    assert!(matches!(result, Err(ClientError::AuthError(_))));
}
