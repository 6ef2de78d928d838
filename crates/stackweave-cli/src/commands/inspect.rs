//! Inspect command
//!
//! Usage: stackweave inspect --template <FILE> --plan <FILE>
//!
//! Prints one line per plan directive with the number of regions its marker
//! pair delimits in the template. Fails on the first malformed marker.

use clap::Args;

use stackweave_core::template::find_regions;

use super::InputArgs;

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute inspect command
pub fn execute(args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (document, plan) = args.input.load()?;

    for directive in plan.directives() {
        let regions = find_regions(&document, &directive.marker)?;
        let action = if directive.keep_interior { "keep" } else { "remove" };
        println!(
            "{}\t{}\t{} region(s)",
            directive.marker.name,
            action,
            regions.len()
        );
    }

    Ok(())
}
