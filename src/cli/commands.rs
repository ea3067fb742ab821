// CLI Command Implementations
// Startup validation with colored output

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use super::{error, info, success, warning};
use crate::config::VitalsConfig;
use crate::credentials::{self, ServiceAccountKey};

/// Validate the configuration and the credential bundle
/// Prints a summary of what a feed run would use; exits non-zero on failure
pub async fn validate(config_path: String) -> anyhow::Result<()> {
    info(&format!(
        "Validating configuration from {}",
        config_path.bright_white()
    ));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner.set_message("Loading configuration...");
    let config = match VitalsConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            spinner.finish_and_clear();
            error(&format!("Configuration invalid: {:#}", e));
            std::process::exit(1);
        }
    };

    spinner.set_message("Resolving credential bundle...");
    let bundle_path = match credentials::resolve_path(&config.sink.credentials) {
        Ok(path) => path,
        Err(e) => {
            spinner.finish_and_clear();
            error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    spinner.set_message("Parsing credential bundle...");
    let key = match ServiceAccountKey::load(&bundle_path) {
        Ok(key) => key,
        Err(e) => {
            spinner.finish_and_clear();
            error(&format!("Credential bundle invalid: {:#}", e));
            std::process::exit(1);
        }
    };

    spinner.finish_and_clear();

    let database_url = if config.sink.database_url.is_empty() {
        key.default_database_url()
    } else {
        config.sink.database_url.clone()
    };

    success("Configuration and credential bundle are valid");
    println!();
    println!("  {} {}", "Device:".bright_white(), config.device.id.cyan());
    println!(
        "  {} {}",
        "Readings path:".bright_white(),
        config.device.readings_path().cyan()
    );
    println!("  {} {}", "Project:".bright_white(), key.project_id.cyan());
    println!(
        "  {} {}",
        "Service account:".bright_white(),
        key.client_email.cyan()
    );
    println!(
        "  {} {}",
        "Database:".bright_white(),
        database_url.cyan().underline()
    );
    println!(
        "  {} every {}",
        "Cadence:".bright_white(),
        format!("{}s", config.feed.interval_secs).yellow()
    );
    println!();

    if config.sink.auth_token.is_none() {
        warning("No auth token configured - the database must allow unauthenticated writes");
    }

    info("Run 'vitalfeed once' to publish a single reading");

    Ok(())
}
