//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{demo, task};
use crate::loader::{self, Config, Loaded};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(author, version, about = "In-memory task list with status filters")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Task records to load (JSON or YAML list, `-` for stdin)
    #[arg(long, short = 'i', global = true)]
    pub input: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Task(task::TaskCommands),

    /// Check input records against the task shape
    Check,

    /// Run a guided walkthrough on a fresh list
    Demo,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("tasklist starting");

    match cli.command {
        Commands::Demo => demo::run(&output)?,

        Commands::Check => {
            let loaded = load(&output, cli.input.as_deref())?;
            task::check(&output, &loaded)?
        }

        Commands::Task(cmd) => {
            let mut loaded = load(&output, cli.input.as_deref())?;
            for entry in &loaded.rejected {
                output.warn(&format!(
                    "skipped record #{}: {}",
                    entry.index,
                    entry.violations.join(", ")
                ));
            }
            task::run(cmd, &mut loaded.store, &config, &output)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Loads the input records, or an empty store when there is no input
fn load(output: &Output, input: Option<&str>) -> Result<Loaded> {
    let Some(source) = input else {
        output.verbose_ctx("load", "No input given, starting with an empty list");
        return Ok(Loaded::default());
    };

    let records = loader::read_records(source)?;
    output.verbose_ctx("load", &format!("Read {} records from {}", records.len(), source));

    let loaded = loader::load_store(records);
    output.verbose_ctx(
        "load",
        &format!("{} tasks loaded, {} rejected", loaded.store.len(), loaded.rejected.len()),
    );

    Ok(loaded)
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
