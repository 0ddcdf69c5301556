//! Image registry and domain check API client

use crate::errors::ClientError;
use crate::http::client::ApiClient;
use crate::models::api::{
    DeploymentResponse, DomainCheckRequest, DomainCheckResponse, ImageCreateRequest,
};

impl ApiClient {
    /// Register a container image with the backend registry
    pub async fn create_image(&self, request: &ImageCreateRequest) -> Result<DeploymentResponse, ClientError> {
        self.post("/images/create/", request).await
    }

    /// Check availability of a domain name
    pub async fn check_domain(&self, request: &DomainCheckRequest) -> Result<DomainCheckResponse, ClientError> {
        self.post("/check-domain/", request).await
    }
}
