//! # fpage CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.
//!
//! Exit status: 0 when the submission is accepted (or the command has
//! nothing to accept), 1 when it is rejected with field errors, 2 on any
//! other failure.

use std::process::ExitCode;

use clap::Parser;

/// Form page toolchain.
///
/// Validates submissions against the form rules and prints the form
/// declaration and validation policy.
#[derive(Parser, Debug)]
#[command(name = "fpage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a submission.
    Validate(fpage_cli::validate::ValidateArgs),
    /// Print the form declaration.
    Schema(fpage_cli::schema::SchemaArgs),
    /// Print the effective validation policy.
    Policy(fpage_cli::policy::PolicyArgs),
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate(args) => fpage_cli::validate::run(&args).map(|accepted| {
            if accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }),
        Commands::Schema(args) => fpage_cli::schema::run(&args).map(|()| ExitCode::SUCCESS),
        Commands::Policy(args) => fpage_cli::policy::run(&args).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
