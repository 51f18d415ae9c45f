//! svcreg CLI
//!
//! Validates service definition records and builds the catalogue bundle.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use svcreg_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "svcreg")]
#[command(about = "svcreg - Service registry validation and bundling", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct GlobalArgs {
    /// Registry root directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Explicit registry.toml (default: <root>/registry.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate record files against the schema and check for conflicts
    Validate(commands::validate::ValidateArgs),
    /// Build the catalogue bundle from the entire record set
    Build(commands::build::BuildArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.global.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, &cli.global),
        Commands::Build(args) => commands::build::execute(args, &cli.global),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(failure) => {
            eprintln!("Error: {}", failure.error);
            std::process::exit(failure.exit_code);
        }
    }
}
