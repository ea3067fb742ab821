// Command Line Interface Module
// CLI using clap for driving the vital-signs feed

pub mod commands;

use clap::{Parser, Subcommand};
use colored::*;

/// Vital Feed - simulated vital-signs telemetry for device displays
#[derive(Parser)]
#[command(name = "vitalfeed")]
#[command(author = "Vital Feed Team")]
#[command(version = "0.2.0")]
#[command(about = "Feeds physiologically plausible vital-sign readings to a realtime device store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the feed until interrupted
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "vitals.toml")]
        config: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate and publish exactly one reading
    Once {
        /// Configuration file path
        #[arg(short, long, default_value = "vitals.toml")]
        config: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate the configuration and credential bundle without publishing
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "vitals.toml")]
        config: String,
    },
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print the Vital Feed banner
pub fn print_banner() {
    println!("{}", r#"
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║   VITAL FEED  v0.2.0                                      ║
║                                                           ║
║   Simulated Vital-Signs Telemetry                         ║
║   for Realtime Health-Monitoring Displays                 ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝
    "#.bright_cyan().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["vitalfeed", "run", "--verbose"]);
        assert!(matches!(
            cli.command,
            Commands::Run { verbose: true, .. }
        ));
    }

    #[test]
    fn test_config_flag_default() {
        let cli = Cli::parse_from(["vitalfeed", "validate"]);
        match cli.command {
            Commands::Validate { config } => assert_eq!(config, "vitals.toml"),
            _ => panic!("expected validate command"),
        }
    }
}
