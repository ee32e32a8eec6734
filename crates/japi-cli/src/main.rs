//! # japi CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use japi_cli::status::{run_status, StatusArgs};
use japi_cli::validate::{run_validate, ValidateArgs};

/// JSON:API document verification tool.
///
/// Checks documents against the JSON:API document grammar and reports how
/// the gateway would answer with them.
#[derive(Parser, Debug)]
#[command(name = "japi", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify documents and list their structural violations.
    Validate(ValidateArgs),

    /// Show the HTTP status the gateway would derive for a document.
    Status(StatusArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Status(args) => run_status(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use japi_schema::DocumentKind;

    #[test]
    fn parse_validate_with_expectation() {
        let cli = Cli::try_parse_from(["japi", "validate", "a.json", "b.json", "--expect", "data"])
            .unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.expect, Some(DocumentKind::Data));
    }

    #[test]
    fn validate_requires_a_file() {
        assert!(Cli::try_parse_from(["japi", "validate"]).is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["japi", "validate", "a.json", "--expect", "widget"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["japi", "-v", "status", "doc.json"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Status(_)));
    }
}
