//! Render command
//!
//! Usage: stackweave render --template <FILE> --plan <FILE> [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

use stackweave_core::pipeline::render_template;

use super::InputArgs;

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute render command
pub fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (document, plan) = args.input.load()?;
    let template = plan
        .template
        .as_ref()
        .ok_or("plan has no template section")?;

    let rendered = render_template(
        &document,
        &template.directives,
        &template.params,
        template.syntax,
    )?;

    super::emit(args.output.as_deref(), rendered.as_str())
}
