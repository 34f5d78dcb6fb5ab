//! bolt-events - check and fire namespaced event names

use anyhow::Result;
use bolt_events::{commands, init_logging, BUILD_DATE, VERSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bolt-events",
    version,
    about = "Namespaced event broker tools for the Bolt admin interface"
)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse event names and report their segments
    Check {
        /// Event names such as bolt>content>save>done
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List the events fired by the admin interface
    Events,
    /// Fire events on a fresh broker and print what a handler receives
    Fire {
        /// Event names, fired in order
        #[arg(required = true)]
        names: Vec<String>,
        /// JSON parameter passed along with the event
        #[arg(long)]
        param: Option<String>,
    },
    /// Print the effective configuration
    Config,
    /// Print version and build date
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config_path, config) = commands::resolve_config(cli.config.as_deref())?;

    init_logging(&config.logging)?;
    match &config_path {
        Some(path) => tracing::debug!("Using configuration {}", path.display()),
        None => tracing::debug!("No configuration directory, using defaults"),
    }

    match cli.command {
        Commands::Check { names } => {
            let report = commands::check(&names);
            for line in &report.lines {
                println!("{}", line);
            }
            if report.invalid > 0 {
                anyhow::bail!("{} of {} event name(s) invalid", report.invalid, names.len());
            }
        }
        Commands::Events => {
            for line in commands::events() {
                println!("{}", line);
            }
        }
        Commands::Fire { names, param } => {
            let parameter: Option<serde_json::Value> = param
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;
            let report = commands::fire(&config, &names, parameter);
            if report.received.len() < names.len() {
                tracing::info!(
                    "{} of {} event name(s) malformed, not dispatched",
                    names.len() - report.received.len(),
                    names.len()
                );
            }
            for line in &report.received {
                println!("{}", line);
            }
            if config.broker.enable_history {
                println!("history:");
                for name in &report.history {
                    println!("  {}", name);
                }
            }
        }
        Commands::Config => {
            print!("{}", commands::show_config(&config)?);
        }
        Commands::Info => {
            println!("bolt-events {} (built {})", VERSION, BUILD_DATE);
            match &config_path {
                Some(path) => println!("config: {}", path.display()),
                None => println!("config: (defaults, no configuration directory)"),
            }
        }
    }

    Ok(())
}
