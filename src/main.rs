#![allow(non_snake_case)]

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use notionCalSync::cli::{Cli, Commands};
use notionCalSync::config::{AppConfig, SyncConfig};
use notionCalSync::runtime;
use notionCalSync::tasks::daily_loop;

const DEFAULT_LOG_FILTER: &str = "notionCalSync=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let app_config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };
    let config = match SyncConfig::from_app_config(&app_config) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    let command = cli.command.unwrap_or(Commands::Run);
    let Some(job) = command.job() else {
        daily_loop::run_daily_loop(&config).await;
        return ExitCode::SUCCESS;
    };

    match runtime::run_once(&config, job).await {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("Failed to start run: {}", e);
            ExitCode::FAILURE
        }
    }
}
