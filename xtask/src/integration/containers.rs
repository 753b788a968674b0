//! DynamoDB Local container management.

use std::time::Duration;

use tokio::process::Command;

use super::error::{IntegrationError, Result};

/// Container runtime used to run DynamoDB Local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContainerRuntime {
    Docker,
    Podman,
}

impl ContainerRuntime {
    /// Name of the runtime binary.
    pub fn command(self) -> &'static str {
        match self {
            ContainerRuntime::Docker => "docker",
            ContainerRuntime::Podman => "podman",
        }
    }
}

/// Container specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
    /// Status DynamoDB Local answers an unsigned `GET /` with.
    pub healthy_status: u16,
}

/// DynamoDB Local, in memory so every run starts from an empty database.
pub const DYNAMODB_SPEC: ContainerSpec = ContainerSpec {
    name: "todos-dynamodb",
    image: "amazon/dynamodb-local:latest",
    port: 8000,
    healthy_status: 400,
};

impl ContainerSpec {
    /// Endpoint the SDK should talk to.
    pub fn endpoint_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// Arguments of the `run` invocation.
    pub fn run_args(&self) -> Vec<String> {
        vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            self.name.to_string(),
            "-p".to_string(),
            format!("{}:{}", self.port, self.port),
            self.image.to_string(),
            "-jar".to_string(),
            "DynamoDBLocal.jar".to_string(),
            "-inMemory".to_string(),
            "-sharedDb".to_string(),
        ]
    }
}

/// Returns true if a container with the spec's name is running.
pub async fn is_running(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<bool> {
    let output = Command::new(runtime.command())
        .args(["ps", "-q", "-f", &format!("name={}", spec.name)])
        .output()
        .await?;

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

/// Starts a container, replacing a stopped one with the same name.
pub async fn start_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    stop_container(runtime, spec).await?;

    let output = Command::new(runtime.command())
        .args(spec.run_args())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IntegrationError::ContainerFailed(format!(
            "Failed to start container '{}': {}",
            spec.name, stderr
        )));
    }

    tracing::debug!(container = spec.name, image = spec.image, "started container");
    Ok(())
}

/// Stops and removes a container.
pub async fn stop_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    // Either may fail when the container is not there.
    let _ = Command::new(runtime.command())
        .args(["stop", spec.name])
        .output()
        .await;
    let _ = Command::new(runtime.command())
        .args(["rm", spec.name])
        .output()
        .await;

    Ok(())
}

/// Polls the container's endpoint until it answers or `timeout` passes.
pub async fn wait_for_health(spec: &ContainerSpec, timeout: Duration) -> Result<()> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(500);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| IntegrationError::ContainerFailed(e.to_string()))?;

    while start.elapsed() < timeout {
        let healthy = match client.get(spec.endpoint_url()).send().await {
            Ok(response) => response.status().as_u16() == spec.healthy_status,
            Err(_) => false,
        };

        if healthy {
            return Ok(());
        }

        tokio::time::sleep(poll_interval).await;
    }

    Err(IntegrationError::ContainerNotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}
