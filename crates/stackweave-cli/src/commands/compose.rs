//! Compose command
//!
//! Usage: stackweave compose --template <FILE> --plan <FILE>
//!        [--account <ID>] [--region <REGION>] [--format json|yaml] [--output <FILE>]
//!
//! Account and region resolve in order: flag, plan, `COA_ACCOUNT_ID` /
//! `COA_AWS_REGION`, then `CDK_DEFAULT_ACCOUNT` / `CDK_DEFAULT_REGION`.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use stackweave_core::pipeline::{build_descriptor, PipelineRequest};
use stackweave_core::plan::SettingsSource;

use super::InputArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Target account (overrides plan and environment)
    #[arg(long)]
    pub account: Option<String>,

    /// Target region (overrides plan and environment)
    #[arg(long)]
    pub region: Option<String>,

    /// Descriptor format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute compose command
pub fn execute(args: ComposeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (document, plan) = args.input.load()?;

    let overrides = SettingsSource {
        account: args.account,
        region: args.region,
    };
    let settings = plan.settings.resolve(&overrides, &super::env_settings())?;

    let request = PipelineRequest::from_plan(&plan, document, settings)?;
    let descriptor = build_descriptor(request)?;

    let mut content = match args.format {
        OutputFormat::Json => descriptor.to_json_pretty()?,
        OutputFormat::Yaml => descriptor.to_yaml()?,
    };
    if !content.ends_with('\n') {
        content.push('\n');
    }

    super::emit(args.output.as_deref(), &content)
}
