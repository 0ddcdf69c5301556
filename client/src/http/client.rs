//! HTTP client implementation

use std::sync::Arc;

use reqwest::{header, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::authn::token_cache::TokenCacheExt;
use crate::errors::ClientError;
use crate::models::api::ApiErrorBody;

/// Endpoints served without authentication
const PUBLIC_ENDPOINTS: &[&str] = &["/users/login/", "/users/register/"];

/// HTTP client for the orchestrator backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenCacheExt>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str, tokens: Arc<dyn TokenCacheExt>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);

        if !is_public(path) {
            let token = self.tokens.bearer().await.ok_or_else(|| {
                ClientError::AuthError("No authentication token is stored".to_string())
            })?;
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            error!("HTTP {} {} failed: {}", method, url, status);
            return Err(self.handle_failure(status, response).await);
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Normalize a non-2xx response into a [`ClientError`].
    ///
    /// A 401 additionally clears the stored token: the session is over and
    /// every subsequent call would fail the same way.
    async fn handle_failure(&self, status: StatusCode, response: Response) -> ClientError {
        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.tokens.clear().await {
                error!("Failed to clear stored token: {}", e);
            }
            return ClientError::AuthError(
                "Token expired or invalid; stored credentials cleared".to_string(),
            );
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            ),
        };

        ClientError::ApiError {
            status: status.as_u16(),
            message,
        }
    }
}

fn is_public(path: &str) -> bool {
    PUBLIC_ENDPOINTS.contains(&path)
}
