//! Command-line console for the academic ERP billing backend
//!
//! Signs finance staff in through the backend's Google login and drives the
//! bill and student bill views from the terminal.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

use app::App;
use commands::{bills::BillsCommand, student_bills::StudentBillsCommand};
use common::config::ClientConfig;

#[derive(Parser)]
#[command(name = "erp-console")]
#[command(about = "Finance console for the academic ERP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, or show where a signed-in session lands
    Login,

    /// Finish signing in with what the provider redirect returned
    Callback {
        /// Callback URL, its query string, or the bare token
        input: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Sign out locally
    Logout,

    /// Bill management
    #[command(subcommand)]
    Bills(BillsCommand),

    /// Bills assigned to students
    #[command(subcommand)]
    StudentBills(StudentBillsCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flag
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::load(cli.config.as_deref())?;
    debug!("Using backend {}", config.api_base_url);

    let app = App::new(config)?;
    info!("Console initialized");

    match cli.command {
        Commands::Login => commands::account::login(&app).await,
        Commands::Callback { input } => commands::account::callback(&app, &input).await,
        Commands::Whoami => commands::account::whoami(&app).await,
        Commands::Logout => commands::account::logout(&app),
        Commands::Bills(cmd) => commands::bills::handle_bills_command(cmd, &app).await,
        Commands::StudentBills(cmd) => {
            commands::student_bills::handle_student_bills_command(cmd, &app).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete_with_yes() {
        let cli = Cli::try_parse_from(["erp-console", "-v", "bills", "delete", "7", "--yes"])
            .expect("valid arguments");

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Bills(BillsCommand::Delete { ref id, yes: true }) if id == "7"
        ));
    }
}
