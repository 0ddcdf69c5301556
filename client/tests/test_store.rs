//! Configuration store tests

use std::path::PathBuf;

use stratoctl::filesys::file::File;
use stratoctl::models::config::{DeploymentConfig, ImageField, ServiceType};
use stratoctl::storage::templates::TemplateStore;
use stratoctl::store::config_store::{ConfigStore, MAX_IMAGES};

fn temp_templates_file() -> (PathBuf, File) {
    let dir = std::env::temp_dir().join(format!("strato-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("templates.json");
    (dir, File::new(path))
}

fn new_store() -> (PathBuf, ConfigStore) {
    let (dir, file) = temp_templates_file();
    let store = ConfigStore::new(DeploymentConfig::default(), TemplateStore::new(file));
    (dir, store)
}

#[test]
fn test_add_image_caps_at_maximum() {
    let (_dir, mut store) = new_store();

    assert_eq!(store.config().container_images.len(), 1);
    assert!(store.add_image().is_some());
    assert!(store.add_image().is_some());
    assert_eq!(store.config().container_images.len(), MAX_IMAGES);

    // At the cap the call is a no-op
    assert!(store.add_image().is_none());
    assert_eq!(store.config().container_images.len(), MAX_IMAGES);
}

#[test]
fn test_remove_image_keeps_last_slot() {
    let (_dir, mut store) = new_store();

    let last_id = store.config().container_images[0].id.clone();
    store.remove_image(&last_id);
    assert_eq!(store.config().container_images.len(), 1);

    let added = store.add_image().unwrap();
    store.remove_image(&added);
    assert_eq!(store.config().container_images.len(), 1);
    assert_eq!(store.config().container_images[0].id, last_id);
}

#[test]
fn test_toggle_region_adds_and_removes() {
    let (_dir, mut store) = new_store();

    assert_eq!(store.config().regions, vec!["us-east-1"]);
    store.toggle_region("eu-west-1");
    assert_eq!(store.config().regions, vec!["us-east-1", "eu-west-1"]);

    store.toggle_region("us-east-1");
    assert_eq!(store.config().regions, vec!["eu-west-1"]);

    // Toggling down to zero regions is allowed; validation reports it
    store.toggle_region("eu-west-1");
    assert!(store.config().regions.is_empty());
}

#[test]
fn test_update_image_unknown_id_is_noop() {
    let (_dir, mut store) = new_store();

    let before = store.config().clone();
    store
        .update_image("no-such-id", ImageField::Repository, "nginx")
        .unwrap();
    assert_eq!(store.config(), &before);
}

#[test]
fn test_update_image_rejects_bad_number() {
    let (_dir, mut store) = new_store();

    let id = store.config().container_images[0].id.clone();
    assert!(store.update_image(&id, ImageField::ExposedPort, "eighty").is_err());
    assert!(store.update_image(&id, ImageField::ExposedPort, "80").is_ok());
    assert_eq!(store.config().container_images[0].exposed_port, Some(80));
}

#[test]
fn test_available_cpu_units_respects_sibling_reservations() {
    let (_dir, mut store) = new_store();

    let first = store.config().container_images[0].id.clone();
    let second = store.add_image().unwrap();

    // Default task budget is 256 CPU units
    store.update_image(&first, ImageField::CpuUnits, "128").unwrap();

    let options = store.available_cpu_units(&second);
    assert_eq!(options, vec![128]);

    // The slot's own reservation does not count against itself
    let own_options = store.available_cpu_units(&first);
    assert_eq!(own_options, vec![128, 256]);
}

#[tokio::test]
async fn test_template_round_trip() {
    let (_dir, mut store) = new_store();

    store.set_service(ServiceType::Function);
    store.toggle_region("ap-northeast-1");
    let saved = store.config().clone();

    store.save_template("prod").await.unwrap();
    store.reset();
    assert_eq!(store.config(), &DeploymentConfig::default());

    assert!(store.load_template("prod").await.unwrap());
    assert_eq!(store.config(), &saved);
}

#[tokio::test]
async fn test_load_unknown_template_leaves_config_untouched() {
    let (_dir, mut store) = new_store();

    store.toggle_region("sa-east-1");
    let before = store.config().clone();

    assert!(!store.load_template("missing").await.unwrap());
    assert_eq!(store.config(), &before);
}

#[tokio::test]
async fn test_save_template_overwrites_silently() {
    let (_dir, mut store) = new_store();

    store.save_template("base").await.unwrap();
    store.set_service(ServiceType::ContainerService);
    store.save_template("base").await.unwrap();

    assert_eq!(store.template_names().await.unwrap(), vec!["base"]);

    store.reset();
    assert!(store.load_template("base").await.unwrap());
    assert_eq!(store.config().service, ServiceType::ContainerService);
}

#[tokio::test]
async fn test_delete_template_reports_existence() {
    let (_dir, mut store) = new_store();

    store.save_template("gone").await.unwrap();
    assert!(store.delete_template("gone").await.unwrap());
    assert!(!store.delete_template("gone").await.unwrap());
}
