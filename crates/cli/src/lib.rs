//! Command-line front end for `shadowpath`.
//!
//! Commands load a document from XML, pick elements by id and print the
//! `@FindByJS` locators that reach them.

mod commands;
mod util;

use clap::{Parser, Subcommand, ValueEnum};
use util::CliResult;

#[derive(Parser, Debug)]
#[command(name = "shadowpath", version, about = "Locate elements behind shadow roots")]
pub struct Cli {
    /// Log level used when `RUST_LOG` is not set.
    #[arg(long = "log-level", global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the `@FindByJS` locator of an element.
    Locate(commands::locate::LocateArgs),
    /// Show the shadow path recorded for an element and how it resolves.
    Path(commands::path::PathArgs),
    /// Write a locator dictionary for several elements.
    Record(commands::record::RecordArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Parses the command line, runs the selected command and prints its output.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let output = execute(&cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

pub fn execute(command: &Commands) -> CliResult<String> {
    match command {
        Commands::Locate(args) => commands::locate::run(args),
        Commands::Path(args) => commands::path::run(args),
        Commands::Record(args) => commands::record::run(args),
    }
}

fn init_tracing(level: LogLevel) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_filter()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
