//! Token cache and HTTP client gating tests

use std::path::PathBuf;
use std::sync::Arc;

use stratoctl::authn::token_cache::{TokenCache, TokenCacheExt};
use stratoctl::errors::ClientError;
use stratoctl::filesys::file::File;
use stratoctl::http::client::ApiClient;

fn temp_token_file() -> (PathBuf, File) {
    let dir = std::env::temp_dir().join(format!("strato-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    (dir.clone(), File::new(dir.join("token.json")))
}

#[tokio::test]
async fn test_token_cache_starts_empty() {
    let (_dir, file) = temp_token_file();
    let cache = TokenCache::new(file).await;
    assert!(cache.bearer().await.is_none());
}

#[tokio::test]
async fn test_token_cache_round_trip() {
    let (_dir, file) = temp_token_file();

    let cache = TokenCache::new(file.clone()).await;
    cache.store("abc123").await.unwrap();
    assert_eq!(cache.bearer().await.as_deref(), Some("abc123"));

    // A fresh cache over the same file picks the token up from disk
    let reloaded = TokenCache::new(file).await;
    assert_eq!(reloaded.bearer().await.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_token_cache_clear_removes_file() {
    let (_dir, file) = temp_token_file();

    let cache = TokenCache::new(file.clone()).await;
    cache.store("abc123").await.unwrap();
    cache.clear().await.unwrap();
    assert!(cache.bearer().await.is_none());
    assert!(!file.exists().await);
}

#[tokio::test]
async fn test_token_cache_ignores_corrupt_file() {
    let (_dir, file) = temp_token_file();
    file.write_string("not json").await.unwrap();

    let cache = TokenCache::new(file).await;
    assert!(cache.bearer().await.is_none());
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let (_dir, file) = temp_token_file();
    let tokens = Arc::new(TokenCache::new(file).await);

    // The address is unroutable; the call must fail on the missing token,
    // never by attempting the connection
    let client = ApiClient::new("http://192.0.2.1:1/api", tokens).unwrap();
    let result = client.get::<serde_json::Value>("/deployments/").await;
    assert!(matches!(result, Err(ClientError::AuthError(_))));
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let (_dir, file) = temp_token_file();
    let tokens = Arc::new(TokenCache::new(file).await);

    let client = ApiClient::new("http://localhost:8000/api/", tokens).unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000/api");
}
