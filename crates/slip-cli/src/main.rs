use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slip_application::SlipContext;
use slip_core::action::ActionKind;
use slip_core::config::ClientConfig;
use slip_infrastructure::ConfigLoader;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod navigator;

use navigator::TerminalNavigator;

#[derive(Parser)]
#[command(name = "slip")]
#[command(version, about = "Slip - payroll document client", long_about = None)]
struct Cli {
    /// Backend base URL (overrides SLIP_API_URL and config.toml)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to an alternative config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,
    /// Sign in and store the session token.
    ///
    /// The password is read from SLIP_PASSWORD, or from the first line of stdin.
    Login {
        #[arg(long)]
        email: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in identity
    Me,
    /// List archived CSV and PDF files (managers only)
    Archives {
        /// Print the raw listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run manager actions in order, one at a time
    Run {
        /// Actions by endpoint name, e.g. createAggregatedEmployeeData
        #[arg(required = true, value_parser = parse_action)]
        actions: Vec<ActionKind>,
        /// Print the run log as JSON when done
        #[arg(long)]
        json: bool,
    },
    /// List the available manager actions
    Actions,
}

fn parse_action(raw: &str) -> std::result::Result<ActionKind, String> {
    ActionKind::from_str(raw).map_err(|_| {
        let known: Vec<&str> = commands::run::catalog().map(|a| a.name()).collect();
        format!("unknown action '{}' (expected one of: {})", raw, known.join(", "))
    })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load().context("Failed to load configuration")?;
    Ok(match &cli.api_url {
        Some(url) => config.with_api_url(url),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let context = SlipContext::from_config(&config, Arc::new(TerminalNavigator))
        .context("Failed to initialize client")?;

    match cli.command {
        Commands::Health => commands::health::check(&context).await?,
        Commands::Login { email } => commands::session::login(&context, &email).await?,
        Commands::Logout => commands::session::logout(&context)?,
        Commands::Me => commands::session::me(&context).await?,
        Commands::Archives { json } => commands::archives::list(&context, json).await?,
        Commands::Run { actions, json } => commands::run::run(&context, &actions, json).await?,
        Commands::Actions => commands::run::list_actions(),
    }

    Ok(())
}
