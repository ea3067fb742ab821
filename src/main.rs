// Vital Feed daemon entry point
// Dispatches CLI commands and owns the feed orchestration

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vital_feed::cli::{self, Commands};
use vital_feed::{config, credentials, feed, observability, signals, sink, vitals};

/// How a feed invocation terminates
enum RunMode {
    /// Loop until a shutdown signal arrives
    Continuous,
    /// Publish a single reading and exit
    Once,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    match cli_args.command {
        Commands::Run { config, verbose } => {
            observability::init(verbose)?;
            cli::print_banner();
            run_feed(config, RunMode::Continuous).await
        }
        Commands::Once { config, verbose } => {
            observability::init(verbose)?;
            run_feed(config, RunMode::Once).await
        }
        Commands::Validate { config } => cli::commands::validate(config).await,
    }
}

/// Bring up the sink and drive the generator
async fn run_feed(config_path: String, mode: RunMode) -> Result<()> {
    let config = config::VitalsConfig::load(&config_path)?;
    info!(device_id = %config.device.id, "Configuration loaded and validated");

    // Fatal before any reading exists: the feed never runs without a sink
    let bundle_path = credentials::resolve_path(&config.sink.credentials)?;
    let key = credentials::ServiceAccountKey::load(&bundle_path)
        .context("Credential bundle failed validation")?;
    info!(project_id = %key.project_id, "Credential bundle loaded");

    let database_url = if config.sink.database_url.is_empty() {
        key.default_database_url()
    } else {
        config.sink.database_url.clone()
    };

    let sink = sink::FirebaseSink::new(
        database_url.clone(),
        config.sink.auth_token.clone(),
        Duration::from_secs(config.sink.request_timeout_secs),
    )?;
    info!(database_url = %database_url, "Telemetry sink initialized");

    let mut generator = vitals::VitalSignsGenerator::new();
    let path = config.device.readings_path();

    match mode {
        RunMode::Once => {
            let reading = feed::publish_once(&mut generator, &sink, &path).await?;

            cli::success(&format!("Published one reading to {}", path));
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        RunMode::Continuous => {
            let coordinator = signals::ShutdownCoordinator::new();
            coordinator.trigger_on_signal()?;
            info!("Signal handlers installed (SIGTERM, SIGINT)");

            cli::info(&format!(
                "Feeding {} every {}s",
                path, config.feed.interval_secs
            ));
            cli::info("Press Ctrl+C for graceful shutdown");

            let mut shutdown = coordinator.subscribe();
            let stats = feed::run(
                &mut generator,
                &sink,
                &path,
                Duration::from_secs(config.feed.interval_secs),
                &mut shutdown,
            )
            .await;

            cli::success(&format!(
                "Graceful shutdown complete - {} readings published, {} failed",
                stats.published, stats.failed
            ));
        }
    }

    Ok(())
}
