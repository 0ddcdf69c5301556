//! Deployment API client
//!
//! Each method maps 1:1 to a backend endpoint and surfaces the backend's
//! reported outcome verbatim. None of these calls retry.

use url::form_urlencoded;

use crate::errors::ClientError;
use crate::http::client::ApiClient;
use crate::models::api::{
    AckResponse, DeploymentListResponse, DeploymentMetrics, DeploymentRequest, DeploymentResponse,
    DeploymentStatus, LogsResponse, ScaleRequest, UpdateRequest, WireService,
};

/// Query parameters for listing deployments
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub status: Option<String>,
    pub service: Option<WireService>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            status: None,
            service: None,
        }
    }
}

/// Query parameters for fetching deployment logs
#[derive(Debug, Clone, Default)]
pub struct LogsQuery {
    pub lines: Option<u32>,
    pub since: Option<String>,
    pub follow: bool,
}

/// Query parameters for fetching deployment metrics
#[derive(Debug, Clone, Default)]
pub struct MetricsQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub period: Option<u32>,
}

impl ApiClient {
    /// Submit a new deployment
    pub async fn create_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentResponse, ClientError> {
        self.post("/deployments/create/", request).await
    }

    /// Fetch the current status of a deployment
    pub async fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatus, ClientError> {
        self.get(&format!("/deployments/{}/status/", deployment_id)).await
    }

    /// Fetch a single deployment
    pub async fn get_deployment(&self, deployment_id: &str) -> Result<DeploymentStatus, ClientError> {
        self.get(&format!("/deployments/{}/", deployment_id)).await
    }

    /// List deployments with pagination and optional filters
    pub async fn list_deployments(&self, query: &ListQuery) -> Result<DeploymentListResponse, ClientError> {
        let mut params = form_urlencoded::Serializer::new(String::new());
        params.append_pair("page", &query.page.to_string());
        params.append_pair("page_size", &query.page_size.to_string());
        if let Some(status) = &query.status {
            params.append_pair("status", status);
        }
        if let Some(service) = query.service {
            let id = match service {
                WireService::Ec2 => "ec2",
                WireService::Ecs => "ecs",
                WireService::Lambda => "lambda",
            };
            params.append_pair("service", id);
        }

        self.get(&format!("/deployments/?{}", params.finish())).await
    }

    /// Scale a deployment
    pub async fn scale_deployment(
        &self,
        deployment_id: &str,
        request: &ScaleRequest,
    ) -> Result<DeploymentResponse, ClientError> {
        self.post(&format!("/deployments/{}/scale/", deployment_id), request)
            .await
    }

    /// Update a deployment in place
    pub async fn update_deployment(
        &self,
        deployment_id: &str,
        request: &UpdateRequest,
    ) -> Result<DeploymentResponse, ClientError> {
        self.put(&format!("/deployments/{}/update/", deployment_id), request)
            .await
    }

    /// Stop a running deployment
    pub async fn stop_deployment(&self, deployment_id: &str) -> Result<AckResponse, ClientError> {
        self.post(&format!("/deployments/{}/stop/", deployment_id), &serde_json::json!({}))
            .await
    }

    /// Start a stopped deployment
    pub async fn start_deployment(&self, deployment_id: &str) -> Result<AckResponse, ClientError> {
        self.post(&format!("/deployments/{}/start/", deployment_id), &serde_json::json!({}))
            .await
    }

    /// Delete a deployment
    pub async fn delete_deployment(&self, deployment_id: &str) -> Result<AckResponse, ClientError> {
        self.delete(&format!("/deployments/{}/delete/", deployment_id)).await
    }

    /// Fetch log lines for a deployment
    pub async fn deployment_logs(
        &self,
        deployment_id: &str,
        query: &LogsQuery,
    ) -> Result<LogsResponse, ClientError> {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(lines) = query.lines {
            params.append_pair("lines", &lines.to_string());
        }
        if let Some(since) = &query.since {
            params.append_pair("since", since);
        }
        if query.follow {
            params.append_pair("follow", "true");
        }

        let query_string = params.finish();
        let path = if query_string.is_empty() {
            format!("/deployments/{}/logs/", deployment_id)
        } else {
            format!("/deployments/{}/logs/?{}", deployment_id, query_string)
        };
        self.get(&path).await
    }

    /// Fetch metrics samples for a deployment
    pub async fn deployment_metrics(
        &self,
        deployment_id: &str,
        query: &MetricsQuery,
    ) -> Result<Vec<DeploymentMetrics>, ClientError> {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(start_time) = &query.start_time {
            params.append_pair("start_time", start_time);
        }
        if let Some(end_time) = &query.end_time {
            params.append_pair("end_time", end_time);
        }
        if let Some(period) = query.period {
            params.append_pair("period", &period.to_string());
        }

        let query_string = params.finish();
        let path = if query_string.is_empty() {
            format!("/deployments/{}/metrics/", deployment_id)
        } else {
            format!("/deployments/{}/metrics/?{}", deployment_id, query_string)
        };
        self.get(&path).await
    }
}
