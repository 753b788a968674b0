//! Integration tests against DynamoDB Local.
//!
//! # Usage
//!
//! ```bash
//! # Start DynamoDB Local, deploy the table, run the suite, stop the container
//! cargo xtask integration
//!
//! # Against an already running DynamoDB Local
//! cargo xtask integration --no-docker
//! ```

mod containers;
mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use containers::{ContainerRuntime, DYNAMODB_SPEC};

use crate::prelude::*;

/// Table the suite writes to, kept apart from a developer's own table.
const TEST_TABLE_NAME: &str = "Todos-integration";
const TEST_INDEX_NAME: &str = "CreatedAtIndex";

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run the DynamoDB integration suite of the todos crate.

This command starts a DynamoDB Local container, deploys the todos table with
`cargo xtask dynamodb deploy --force`, and runs the ignored tests of the
todos crate with the dynamodb feature enabled. The container is stopped
afterwards.

Environment variables:
  AWS_ENDPOINT_URL    - Override DynamoDB endpoint (default: http://localhost:8000)")]
pub struct IntegrationCommand {
    /// Skip container management (assume DynamoDB Local is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep the container running after the tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Container runtime to use.
    #[arg(long, value_enum, default_value_t = ContainerRuntime::Docker)]
    pub runtime: ContainerRuntime,

    /// Timeout in seconds for the container health check.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    let endpoint =
        std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| DYNAMODB_SPEC.endpoint_url());

    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!("{} {}", p_b("Endpoint:"), endpoint);
        aprintln!();
    }

    let started = if command.no_docker {
        if !global.is_silent() {
            aprintln!("{}", p_y("Skipping container management (--no-docker)"));
        }
        false
    } else {
        start_dynamodb(&command, &global).await?
    };

    let outcome = match setup_test_table(&endpoint, &global).await {
        Ok(()) => run_suite(&endpoint, &global).await,
        Err(err) => Err(err),
    };

    if started && !command.keep_containers {
        if !global.is_silent() {
            aprintln!("{}", p_b("Stopping DynamoDB Local container..."));
        }
        containers::stop_container(command.runtime, &DYNAMODB_SPEC).await?;
    } else if started && !global.is_silent() {
        aprintln!("{}", p_y("Container left running (--keep-containers)"));
    }

    aprintln!();
    match outcome {
        Ok(true) => {
            aprintln!("{}", p_g("All integration tests passed!"));
            Ok(())
        }
        Ok(false) => {
            aprintln!("{}", p_r("Some integration tests failed"));
            Err(IntegrationError::TestFailed(
                "DynamoDB suite failed".to_string(),
            ))
        }
        Err(err) => Err(err),
    }
}

/// Starts DynamoDB Local. Returns false if it was already running.
async fn start_dynamodb(command: &IntegrationCommand, global: &crate::Global) -> Result<bool> {
    if containers::is_running(command.runtime, &DYNAMODB_SPEC).await? {
        if !global.is_silent() {
            aprintln!("{}", p_y("DynamoDB Local container already running"));
        }
        return Ok(false);
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Starting DynamoDB Local container..."));
    }
    containers::start_container(command.runtime, &DYNAMODB_SPEC).await?;

    if !global.is_silent() {
        aprintln!(
            "{}",
            p_b(&format!(
                "Waiting for container health (max {}s)...",
                command.health_timeout
            ))
        );
    }
    containers::wait_for_health(&DYNAMODB_SPEC, Duration::from_secs(command.health_timeout))
        .await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("DynamoDB Local is ready"));
    }
    Ok(true)
}

/// Environment shared by the deploy step and the test run.
fn local_env(endpoint: &str) -> Vec<(&'static str, String)> {
    vec![
        ("AWS_ENDPOINT_URL", endpoint.to_string()),
        ("AWS_REGION", "us-east-1".to_string()),
        ("AWS_ACCESS_KEY_ID", "test".to_string()),
        ("AWS_SECRET_ACCESS_KEY", "test".to_string()),
        ("TODOS_TABLE", TEST_TABLE_NAME.to_string()),
        ("TODOS_CREATED_AT_INDEX", TEST_INDEX_NAME.to_string()),
    ]
}

/// Deploys the todos table with `cargo xtask dynamodb deploy --force`.
async fn setup_test_table(endpoint: &str, global: &crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{}", p_b("Setting up test table..."));
    }

    let status = tokio::process::Command::new("cargo")
        .args(["xtask", "--silent", "dynamodb", "deploy", "--force"])
        .envs(local_env(endpoint))
        .status()
        .await?;

    if !status.success() {
        return Err(IntegrationError::TableSetupFailed(format!(
            "Failed to deploy table '{}'",
            TEST_TABLE_NAME
        )));
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Test table ready"));
    }
    Ok(())
}

/// Arguments of the `cargo test` invocation running the DynamoDB suite.
fn test_args() -> Vec<&'static str> {
    vec![
        "test",
        "-p",
        "todos",
        "--features",
        "dynamodb,inmemory",
        "--",
        "--ignored",
    ]
}

/// Runs the suite. Returns whether it passed.
async fn run_suite(endpoint: &str, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!(
            "{} cargo {}",
            p_b("Running:"),
            p_y(&test_args().join(" "))
        );
    }

    let status = tokio::process::Command::new("cargo")
        .args(test_args())
        .envs(local_env(endpoint))
        .status()
        .await?;

    Ok(status.success())
}
