use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use georef::domain::{catalog::ResourceCatalog, error::DomainError, planner::Planner};
use georef::model::Resource;
use georef_params::RawParams;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Exit code for requests rejected by parameter validation.
const EXIT_INVALID_PARAMS: u8 = 2;

/// Georef CLI - validate georef requests and print their backend queries
#[derive(Parser)]
#[command(name = "georef-cli")]
#[command(about = "Georef CLI - validate georef requests and print their backend queries")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request and print the planned queries
    Plan {
        /// Resource name (provincias, departamentos, calles, ...)
        #[arg(short, long)]
        resource: Resource,

        /// Querystring of the request, e.g. "nombre=cordoba&max=5"
        #[arg(short, long, default_value = "")]
        query: String,

        /// JSON file with a bulk body; switches to bulk mode
        #[arg(short, long)]
        body: Option<PathBuf>,
    },
    /// Check configuration
    Check,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::debug!("Georef CLI starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Plan {
            resource,
            query,
            body,
        } => plan_request(resource, &query, body.as_deref()),
        Commands::Check => check_config(config),
    }
}

fn plan_request(resource: Resource, query: &str, body: Option<&Path>) -> Result<ExitCode> {
    let catalog = ResourceCatalog::build().context("Invalid parameter catalog")?;
    let planner = Planner::new(Arc::new(catalog));
    let params = RawParams::from_querystring(query);

    let outcome = match body {
        Some(path) => {
            let body = read_body(path)?;
            planner
                .plan_bulk(resource, &params, Some(&body))
                .map(serde_json::to_value)
        }
        None => planner
            .plan_single(resource, &params)
            .map(serde_json::to_value),
    };

    match outcome {
        Ok(plans) => {
            println!("{}", serde_json::to_string_pretty(&plans?)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(DomainError::InvalidParams(errors)) => {
            tracing::info!(resource = %resource, "Request rejected: {}", errors);
            let report = json!({ "errores": errors });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::from(EXIT_INVALID_PARAMS))
        }
        Err(other) => Err(other.into()),
    }
}

fn read_body(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read body file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Body file {} is not valid JSON", path.display()))
}

fn check_config(config: AppConfig) -> Result<ExitCode> {
    tracing::info!("Checking configuration...");

    config.validate()?;
    ResourceCatalog::build().context("Invalid parameter catalog")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(ExitCode::SUCCESS)
}
