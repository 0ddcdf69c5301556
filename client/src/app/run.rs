//! Command execution
//!
//! One command per invocation. Mutations persist the session snapshot before
//! returning so the next invocation continues from the same configuration.

use std::collections::HashMap;

use tracing::info;

use crate::app::options::AppOptions;
use crate::app::state::AppState;
use crate::authn::token_cache::TokenCacheExt;
use crate::cost;
use crate::deploy::request::build_request;
use crate::errors::ClientError;
use crate::http::deployments::{ListQuery, LogsQuery, MetricsQuery};
use crate::models::api::{DeploymentState, DomainCheckRequest, ScaleRequest};
use crate::models::config::{
    ContainerServiceConfigPatch, FunctionConfigPatch, ImageField, ServiceType, VmConfigPatch,
};
use crate::store::config_store::MAX_IMAGES;
use crate::validate;
use crate::workers::{poller, registrar};

/// A single client action
#[derive(Debug, Clone)]
pub enum Command {
    Show,
    SetService(ServiceType),
    ToggleRegion(String),
    AddImage,
    RemoveImage(String),
    UpdateImage {
        id: String,
        field: ImageField,
        value: String,
    },
    SetVm(VmConfigPatch),
    SetContainerService(ContainerServiceConfigPatch),
    SetFunction(FunctionConfigPatch),
    SaveTemplate(String),
    LoadTemplate(String),
    ListTemplates,
    DeleteTemplate(String),
    Reset,
    Deploy,
    Watch(String),
    List(ListQuery),
    Scale {
        id: String,
        request: ScaleRequest,
    },
    Stop(String),
    Start(String),
    Delete(String),
    Logs {
        id: String,
        query: LogsQuery,
    },
    Metrics {
        id: String,
        query: MetricsQuery,
    },
    CheckDomain {
        domain: String,
        tld: String,
    },
    SetToken(String),
}

impl Command {
    /// Build a command from `--key=value` style arguments
    pub fn from_args(args: &HashMap<String, String>) -> Result<Self, ClientError> {
        if args.contains_key("show") {
            return Ok(Command::Show);
        }
        if let Some(service) = args.get("set-service") {
            return Ok(Command::SetService(service.parse()?));
        }
        if let Some(region) = args.get("toggle-region") {
            return Ok(Command::ToggleRegion(region.clone()));
        }
        if args.contains_key("add-image") {
            return Ok(Command::AddImage);
        }
        if let Some(id) = args.get("remove-image") {
            return Ok(Command::RemoveImage(id.clone()));
        }
        if let Some(spec) = args.get("update-image") {
            let (id, assignment) = spec.split_once(':').ok_or_else(|| {
                ClientError::UsageError("--update-image expects ID:FIELD=VALUE".to_string())
            })?;
            let (field, value) = assignment.split_once('=').ok_or_else(|| {
                ClientError::UsageError("--update-image expects ID:FIELD=VALUE".to_string())
            })?;
            return Ok(Command::UpdateImage {
                id: id.to_string(),
                field: field.parse()?,
                value: value.to_string(),
            });
        }
        if let Some(assignment) = args.get("set-vm") {
            let (key, value) = split_assignment("--set-vm", assignment)?;
            return Ok(Command::SetVm(VmConfigPatch::from_kv(key, value)?));
        }
        if let Some(assignment) = args.get("set-ecs") {
            let (key, value) = split_assignment("--set-ecs", assignment)?;
            return Ok(Command::SetContainerService(ContainerServiceConfigPatch::from_kv(key, value)?));
        }
        if let Some(assignment) = args.get("set-lambda") {
            let (key, value) = split_assignment("--set-lambda", assignment)?;
            return Ok(Command::SetFunction(FunctionConfigPatch::from_kv(key, value)?));
        }
        if let Some(name) = args.get("save-template") {
            return Ok(Command::SaveTemplate(name.clone()));
        }
        if let Some(name) = args.get("load-template") {
            return Ok(Command::LoadTemplate(name.clone()));
        }
        if args.contains_key("templates") {
            return Ok(Command::ListTemplates);
        }
        if let Some(name) = args.get("delete-template") {
            return Ok(Command::DeleteTemplate(name.clone()));
        }
        if args.contains_key("reset") {
            return Ok(Command::Reset);
        }
        if args.contains_key("deploy") {
            return Ok(Command::Deploy);
        }
        if let Some(id) = args.get("watch") {
            return Ok(Command::Watch(id.clone()));
        }
        if args.contains_key("list") {
            let mut query = ListQuery::default();
            if let Some(page) = args.get("page") {
                query.page = parse_number("--page", page)?;
            }
            if let Some(page_size) = args.get("page-size") {
                query.page_size = parse_number("--page-size", page_size)?;
            }
            query.status = args.get("status").cloned();
            if let Some(service) = args.get("service") {
                let service: ServiceType = service.parse()?;
                query.service = Some(match service {
                    ServiceType::Vm => crate::models::api::WireService::Ec2,
                    ServiceType::ContainerService => crate::models::api::WireService::Ecs,
                    ServiceType::Function => crate::models::api::WireService::Lambda,
                });
            }
            return Ok(Command::List(query));
        }
        if let Some(id) = args.get("scale") {
            let count = args.get("count").ok_or_else(|| {
                ClientError::UsageError("--scale requires --count=N".to_string())
            })?;
            let request = ScaleRequest {
                desired_count: parse_number("--count", count)?,
                min_capacity: args.get("min").map(|v| parse_number("--min", v)).transpose()?,
                max_capacity: args.get("max").map(|v| parse_number("--max", v)).transpose()?,
                auto_scaling: None,
            };
            return Ok(Command::Scale {
                id: id.clone(),
                request,
            });
        }
        if let Some(id) = args.get("stop") {
            return Ok(Command::Stop(id.clone()));
        }
        if let Some(id) = args.get("start") {
            return Ok(Command::Start(id.clone()));
        }
        if let Some(id) = args.get("delete") {
            return Ok(Command::Delete(id.clone()));
        }
        if let Some(id) = args.get("logs") {
            let query = LogsQuery {
                lines: args.get("lines").map(|v| parse_number("--lines", v)).transpose()?,
                since: args.get("since").cloned(),
                follow: false,
            };
            return Ok(Command::Logs {
                id: id.clone(),
                query,
            });
        }
        if let Some(id) = args.get("metrics") {
            let query = MetricsQuery {
                start_time: args.get("start-time").cloned(),
                end_time: args.get("end-time").cloned(),
                period: args.get("period").map(|v| parse_number("--period", v)).transpose()?,
            };
            return Ok(Command::Metrics {
                id: id.clone(),
                query,
            });
        }
        if let Some(domain) = args.get("check-domain") {
            return Ok(Command::CheckDomain {
                domain: domain.clone(),
                tld: args.get("tld").cloned().unwrap_or_else(|| "com".to_string()),
            });
        }
        if let Some(token) = args.get("set-token") {
            return Ok(Command::SetToken(token.clone()));
        }

        Err(ClientError::UsageError(
            "No command given; try --show, --deploy, or --list".to_string(),
        ))
    }
}

fn split_assignment<'a>(flag: &str, assignment: &'a str) -> Result<(&'a str, &'a str), ClientError> {
    assignment
        .split_once('=')
        .ok_or_else(|| ClientError::UsageError(format!("{} expects KEY=VALUE", flag)))
}

fn parse_number(flag: &str, value: &str) -> Result<u32, ClientError> {
    value
        .parse()
        .map_err(|_| ClientError::UsageError(format!("{}: expected a number, got '{}'", flag, value)))
}

/// Run a single command
pub async fn run(options: AppOptions, command: Command) -> Result<(), ClientError> {
    let mut state = AppState::init(&options).await?;

    match command {
        Command::Show => show(&state),

        Command::SetService(service) => {
            state.store.set_service(service);
            state.save_session().await?;
            println!("Service set to {}", service.wire_id());
        }

        Command::ToggleRegion(region) => {
            state.store.toggle_region(&region);
            state.save_session().await?;
            println!("Regions: {}", state.store.config().regions.join(", "));
        }

        Command::AddImage => {
            // Register what is already filled in before appending the new
            // blank slot; registration runs detached and never blocks the
            // local mutation.
            let handles =
                registrar::register_images(state.client.clone(), &state.store.config().container_images);

            match state.store.add_image() {
                Some(id) => println!("Added image slot {}", id),
                None => println!("Image limit reached ({} slots)", MAX_IMAGES),
            }
            state.save_session().await?;

            // The process is about to exit; give the detached requests a
            // chance to leave. Their failures are logged, not surfaced.
            for handle in handles {
                let _ = handle.await;
            }
        }

        Command::RemoveImage(id) => {
            state.store.remove_image(&id);
            state.save_session().await?;
            println!(
                "{} image slot(s) remaining",
                state.store.config().container_images.len()
            );
        }

        Command::UpdateImage { id, field, value } => {
            state.store.update_image(&id, field, &value)?;
            state.save_session().await?;
        }

        Command::SetVm(patch) => {
            state.store.set_vm_config(patch);
            state.save_session().await?;
        }

        Command::SetContainerService(patch) => {
            state.store.set_container_service_config(patch);
            state.save_session().await?;
        }

        Command::SetFunction(patch) => {
            state.store.set_function_config(patch);
            state.save_session().await?;
        }

        Command::SaveTemplate(name) => {
            state.store.save_template(&name).await?;
            println!("Saved template '{}'", name);
        }

        Command::LoadTemplate(name) => {
            if state.store.load_template(&name).await? {
                state.save_session().await?;
                println!("Loaded template '{}'", name);
            } else {
                return Err(ClientError::NotFound(format!("template '{}'", name)));
            }
        }

        Command::ListTemplates => {
            let names = state.store.template_names().await?;
            if names.is_empty() {
                println!("No templates saved");
            }
            for name in names {
                println!("{}", name);
            }
        }

        Command::DeleteTemplate(name) => {
            if state.store.delete_template(&name).await? {
                println!("Deleted template '{}'", name);
            } else {
                return Err(ClientError::NotFound(format!("template '{}'", name)));
            }
        }

        Command::Reset => {
            state.store.reset();
            state.save_session().await?;
            println!("Configuration reset to defaults");
        }

        Command::Deploy => deploy(&state, &options).await?,

        Command::Watch(id) => {
            watch(&state, &options, &id).await?;
        }

        Command::List(query) => {
            let response = state.client.list_deployments(&query).await?;
            for deployment in &response.deployments {
                println!(
                    "{}  {:<12} {:>4.0}%  {}",
                    deployment.deployment_id, deployment.status, deployment.progress, deployment.current_step
                );
            }
            println!(
                "Page {} of {} deployment(s){}",
                response.page,
                response.total,
                if response.has_next { " (more available)" } else { "" }
            );
        }

        Command::Scale { id, request } => {
            let response = state.client.scale_deployment(&id, &request).await?;
            if !response.success {
                return Err(ClientError::DeployError(response.message));
            }
            println!("Scaled deployment {}: {}", id, response.message);
        }

        Command::Stop(id) => {
            let response = state.client.stop_deployment(&id).await?;
            if !response.success {
                return Err(ClientError::DeployError(response.message));
            }
            println!("Stopped deployment {}", id);
        }

        Command::Start(id) => {
            let response = state.client.start_deployment(&id).await?;
            if !response.success {
                return Err(ClientError::DeployError(response.message));
            }
            println!("Started deployment {}", id);
        }

        Command::Delete(id) => {
            let response = state.client.delete_deployment(&id).await?;
            if !response.success {
                return Err(ClientError::DeployError(response.message));
            }
            println!("Deleted deployment {}", id);
        }

        Command::Logs { id, query } => {
            let response = state.client.deployment_logs(&id, &query).await?;
            for line in &response.logs {
                println!("{}", line);
            }
            if response.has_more {
                println!("(more log lines available)");
            }
        }

        Command::Metrics { id, query } => {
            let samples = state.client.deployment_metrics(&id, &query).await?;
            for sample in &samples {
                println!(
                    "{}  cpu {:>5.1}%  mem {:>5.1}%  tasks {}/{}",
                    sample.timestamp, sample.cpu_utilization, sample.memory_utilization,
                    sample.running_tasks, sample.task_count
                );
            }
        }

        Command::CheckDomain { domain, tld } => {
            let response = state
                .client
                .check_domain(&DomainCheckRequest { domain, tld })
                .await?;
            if response.available {
                match response.price {
                    Some(price) => println!("Available ({})", price),
                    None => println!("Available"),
                }
            } else {
                println!("Not available: {}", response.message);
            }
        }

        Command::SetToken(token) => {
            state.tokens.store(&token).await?;
            println!("Token stored");
        }
    }

    Ok(())
}

/// Print the current configuration with derived validation and cost
fn show(state: &AppState) {
    let config = state.store.config();

    println!("Service: {}", config.service.wire_id());
    println!("Regions: {}", config.regions.join(", "));
    for image in &config.container_images {
        let name = if image.is_named() { image.repository.as_str() } else { "(blank)" };
        println!("Image {}: {}:{}", image.id, name, image.tag);
    }

    let validation = validate::validate(config);
    for error in &validation.errors {
        println!("error: {}", error);
    }
    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }

    if config.service == ServiceType::ContainerService {
        let budget = validate::image_budget(config);
        if budget.exceeded() {
            println!(
                "note: image reservations ({} cpu / {} MB) exceed the task budget ({} cpu / {} MB)",
                budget.cpu_used, budget.memory_used, budget.cpu_budget, budget.memory_budget
            );
        }
    }

    let estimate = cost::estimate(config);
    for entry in &estimate.breakdown {
        println!("{} {}: ${}/month", entry.flag, entry.region, entry.display());
    }
    println!(
        "Estimated total: ${}/month{}",
        estimate.total_display(),
        if validation.is_valid() { "" } else { " (not deployable)" }
    );
}

/// Validate, submit, and watch a deployment to completion
async fn deploy(state: &AppState, options: &AppOptions) -> Result<(), ClientError> {
    let config = state.store.config();

    let validation = validate::validate(config);
    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }
    if !validation.is_valid() {
        for error in &validation.errors {
            println!("error: {}", error);
        }
        return Err(ClientError::ValidationError(
            "The configuration is not deployable".to_string(),
        ));
    }

    let request = build_request(config);
    info!("Submitting {} deployment", config.service.wire_id());
    let response = state.client.create_deployment(&request).await?;

    if !response.success {
        return Err(ClientError::DeployError(response.message));
    }
    println!("Deployment {} created", response.deployment_id);

    watch(state, options, &response.deployment_id).await
}

/// Watch a deployment until a terminal state or the poll ceiling
async fn watch(state: &AppState, options: &AppOptions, deployment_id: &str) -> Result<(), ClientError> {
    let outcome = poller::watch(&state.client, deployment_id, &options.poller, |status| {
        println!("{} ({:.0}%) - {}", status.status, status.progress, status.current_step);
    })
    .await?;

    match outcome {
        poller::WatchOutcome::Terminal(status) => match status.status {
            DeploymentState::Completed => {
                println!("Deployment {} completed", deployment_id);
                Ok(())
            }
            DeploymentState::Stopped => {
                println!("Deployment {} stopped", deployment_id);
                Ok(())
            }
            _ => Err(ClientError::DeployError(format!(
                "Deployment {} failed; check the logs for details",
                deployment_id
            ))),
        },
        poller::WatchOutcome::TimedOut(_) => {
            println!(
                "Stopped watching deployment {} after {:?}; it may still be running",
                deployment_id, options.poller.ceiling
            );
            Ok(())
        }
    }
}
