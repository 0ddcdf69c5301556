//! Deployment status polling
//!
//! A single repeating poll per deployment, started only after a successful
//! create. The status read is the only thing retried; the create itself
//! never is. The client never infers transitions, it reflects whatever the
//! backend last reported.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::errors::ClientError;
use crate::http::client::ApiClient;
use crate::models::api::DeploymentStatus;

/// Poller options
#[derive(Debug, Clone)]
pub struct Options {
    /// Interval between status reads
    pub interval: Duration,

    /// Hard stop after this much time, regardless of outcome
    pub ceiling: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            ceiling: Duration::from_secs(600),
        }
    }
}

/// How a watch ended
#[derive(Debug, Clone)]
pub enum WatchOutcome {
    /// The backend reported a terminal state
    Terminal(DeploymentStatus),

    /// The ceiling elapsed first; carries the last status seen, if any
    TimedOut(Option<DeploymentStatus>),
}

/// Poll a deployment until it reaches a terminal state or the ceiling elapses
pub async fn watch(
    client: &ApiClient,
    deployment_id: &str,
    options: &Options,
    mut on_update: impl FnMut(&DeploymentStatus),
) -> Result<WatchOutcome, ClientError> {
    info!("Watching deployment {}", deployment_id);

    let deadline = Instant::now() + options.ceiling;
    let mut last_status: Option<DeploymentStatus> = None;

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => {
                info!("Watch ceiling reached for deployment {}", deployment_id);
                return Ok(WatchOutcome::TimedOut(last_status));
            }
            _ = tokio::time::sleep(options.interval) => {}
        }

        let status = client.deployment_status(deployment_id).await?;
        debug!(
            "Deployment {}: {} ({}%) - {}",
            deployment_id, status.status, status.progress, status.current_step
        );
        on_update(&status);

        if status.status.is_terminal() {
            return Ok(WatchOutcome::Terminal(status));
        }
        last_status = Some(status);
    }
}
