use anyhow::{Context, Result};
use auto_drive_sim::adapters::inbound::ConsoleDialogue;
use auto_drive_sim::adapters::outbound::{init_combined_logger, init_console_logger, FilesystemScenarioSource};
use auto_drive_sim::application::SimulationService;
use auto_drive_sim::config::OutputFormat;
use auto_drive_sim::Config;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "auto-drive-sim", version, about = "Simulate autonomous cars on a grid")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write domain log messages to this file
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a field and its cars step by step on the terminal (default)
    Interactive,
    /// Simulate a TOML scenario and print one result line per car
    Run {
        scenario: String,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    // fast_log owns the `log` facade, so tracing is installed without the log bridge
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing subscriber")?;

    let logger = match cli.log_file.or_else(|| config.logging.file.clone()) {
        Some(path) => init_combined_logger(&path, &config.logging.level),
        None => init_console_logger(),
    };

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            logger.info("Starting interactive session");
            let mut dialogue = ConsoleDialogue::new(io::stdin().lock(), io::stdout().lock());
            dialogue.run().context("console session failed")?;
        }
        Commands::Run { scenario, format } => {
            let source = Arc::new(FilesystemScenarioSource::new(config.simulation.scenario_dir.clone()));
            let service = SimulationService::new(logger, source);
            let outcome = service.run_named(&scenario)?;
            info!(field = %outcome.field_id, events = outcome.events.len(), "scenario finished");
            println!("{}", outcome.render(format.unwrap_or(config.simulation.output_format))?);
        }
    }

    Ok(())
}
