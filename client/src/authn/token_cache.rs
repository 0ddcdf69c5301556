//! Bearer token cache
//!
//! The token itself is opaque to the client: it is stored, attached to
//! requests, and cleared when the backend rejects it. There is no refresh
//! protocol.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ClientError;
use crate::filesys::file::File;

/// Token cache seam for testability
#[async_trait]
pub trait TokenCacheExt: Send + Sync {
    /// The current bearer token, if one is stored
    async fn bearer(&self) -> Option<String>;

    /// Store a new token
    async fn store(&self, token: &str) -> Result<(), ClientError>;

    /// Clear the stored token
    async fn clear(&self) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct StoredToken {
    access_token: String,
}

/// File-backed token cache
pub struct TokenCache {
    token_file: File,
    cached: RwLock<Option<SecretString>>,
}

impl TokenCache {
    /// Create a cache over the given token file, loading any existing token
    pub async fn new(token_file: File) -> Self {
        let cached = if token_file.exists().await {
            match token_file.read_json::<StoredToken>().await {
                Ok(stored) => Some(SecretString::from(stored.access_token)),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable token file: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            token_file,
            cached: RwLock::new(cached),
        }
    }
}

#[async_trait]
impl TokenCacheExt for TokenCache {
    async fn bearer(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached.as_ref().map(|t| t.expose_secret().to_string())
    }

    async fn store(&self, token: &str) -> Result<(), ClientError> {
        self.token_file
            .write_json(&serde_json::json!({ "access_token": token }))
            .await?;
        self.token_file.set_permissions_600().await?;

        let mut cached = self.cached.write().await;
        *cached = Some(SecretString::from(token.to_string()));
        debug!("Stored bearer token");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        self.token_file.delete().await?;

        let mut cached = self.cached.write().await;
        *cached = None;
        debug!("Cleared bearer token");
        Ok(())
    }
}
