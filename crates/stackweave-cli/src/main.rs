//! stackweave CLI
//!
//! Renders toggle-region templates and composes addon deployment descriptors

use clap::{Parser, Subcommand, ValueEnum};
use stackweave_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable logs
    Pretty,
    /// JSON lines
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "stackweave")]
#[command(about = "stackweave - Template toggling and addon composition", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a template with the plan's directives and parameters
    Render(commands::render::RenderArgs),
    /// Render, compose with the plan's addons and emit the deployment descriptor
    Compose(commands::compose::ComposeArgs),
    /// Report the regions each plan directive finds in a template
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args),
        Commands::Compose(args) => commands::compose::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
