//! Custodia - Backup compliance audit entry point

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use custodia::application::{AuditOptions, AuditRunner, ConsoleSink};
use custodia::cli::{exit_codes, Cli};
use custodia::config::Validate;
use custodia::infrastructure::{AzureResourceClient, ClientCredentialsProvider};
use custodia::{init_tracing, workers, Config};

#[tokio::main]
async fn main() {
    std::process::exit(run().await);
}

async fn run() -> i32 {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration. Check config files and CUSTODIA__* env vars: {}", e);
            return exit_codes::CONFIG_ERROR;
        }
    };
    cli.apply_to(&mut config);

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation failed: {}", e);
        return exit_codes::CONFIG_ERROR;
    }

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::CONFIG_ERROR;
    }

    info!(
        subscriptions = config.audit.subscriptions.len(),
        stale_after_days = config.audit.stale_after_days,
        "Starting backup compliance audit"
    );

    let runner = match build_runner(&config) {
        Ok(runner) => runner,
        Err(e) => {
            error!(error = %e, "Failed to initialize the audit");
            return exit_codes::AUDIT_FAILED;
        }
    };
    let sink = ConsoleSink;

    match config.audit.interval_hours {
        Some(hours) => {
            let shutdown = CancellationToken::new();
            let canceller = shutdown.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                canceller.cancel();
            });

            workers::run_periodic(&runner, &sink, hours, shutdown).await;
            exit_codes::SUCCESS
        }
        None => match runner.run(&sink).await {
            Ok(outcome) => {
                if cli.fail_on_issues && outcome.summary.total_issues() > 0 {
                    exit_codes::ISSUES_FOUND
                } else {
                    exit_codes::SUCCESS
                }
            }
            Err(e) => {
                error!(error = %e, "Audit run failed");
                exit_codes::AUDIT_FAILED
            }
        },
    }
}

fn build_runner(
    config: &Config,
) -> anyhow::Result<AuditRunner<AzureResourceClient, AzureResourceClient>> {
    let tokens = ClientCredentialsProvider::new(&config.azure)
        .context("Failed to create the token provider")?;
    let client = Arc::new(
        AzureResourceClient::new(&config.azure, Arc::new(tokens))
            .context("Failed to create the Resource Manager client")?,
    );

    let options = AuditOptions {
        subscriptions: config.audit.subscriptions.clone(),
        stale_after_days: config.audit.stale_after_days,
        continue_on_missing_subscription: config.audit.continue_on_missing_subscription,
    };

    // The one client serves as both the subscription directory and the
    // backup provider.
    Ok(AuditRunner::new(client.clone(), client, options))
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
