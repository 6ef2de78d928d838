pub mod compose;
pub mod inspect;
pub mod render;

use std::path::{Path, PathBuf};

use clap::Args;
use stackweave_core::plan::SettingsSource;
use stackweave_core::{parse_plan_str, Document, Plan, StackError};

/// Template and plan locations shared by every subcommand
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Template file
    #[arg(short, long)]
    pub template: PathBuf,

    /// Plan file (YAML)
    #[arg(short, long)]
    pub plan: PathBuf,
}

impl InputArgs {
    /// Read both files and parse the plan
    pub fn load(&self) -> Result<(Document, Plan), Box<dyn std::error::Error>> {
        let document = Document::new(read(&self.template)?);
        let plan = parse_plan_str(&read(&self.plan)?)?;
        Ok((document, plan))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StackError {
    StackError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn read(path: &Path) -> Result<String, StackError> {
    std::fs::read_to_string(path).map_err(|e| io_error(path, e))
}

/// First non-empty value among the named environment variables
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// Account and region from the environment, used when neither the command
/// line nor the plan sets them
pub fn env_settings() -> SettingsSource {
    SettingsSource {
        account: first_env(&["COA_ACCOUNT_ID", "CDK_DEFAULT_ACCOUNT"]),
        region: first_env(&["COA_AWS_REGION", "CDK_DEFAULT_REGION"]),
    }
}

/// Write to a file, or to stdout when no path is given
pub fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| io_error(path, e))?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
