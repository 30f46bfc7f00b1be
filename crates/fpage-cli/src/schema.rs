//! # Schema Subcommand
//!
//! Prints the form declaration.

use clap::Args;
use fpage_core::FormSchema;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Render the form declaration as JSON.
pub fn render(args: &SchemaArgs) -> anyhow::Result<String> {
    let schema = FormSchema::form_page();
    let json = if args.compact {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    Ok(json)
}

pub fn run(args: &SchemaArgs) -> anyhow::Result<()> {
    println!("{}", render(args)?);
    Ok(())
}
