//! CLI module for convgen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `generate <manifest>` - Generate and write the server types file of every service
//! - `paths <manifest>` - Print the artifact path of every service
//! - `emit <manifest> --service <name>` - Print one service's generated file
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::GeneratorConfig;
use crate::render::RenderConfig;
use crate::version::CONVGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate wire-to-domain type conversion code for API services
#[derive(Parser, Debug)]
#[command(name = "convgen")]
#[command(version = CONVGEN_VERSION)]
#[command(about = "Generate wire-to-domain type conversion code for API services", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate and write the server types file of every service
    Generate {
        /// Service manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
        /// Output directory (default: current directory)
        #[arg(short = 'o', long = "out", value_name = "OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,
        /// Print the paths that would be written without writing them
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        options: GenerateOptions,
    },

    /// Print the artifact path of every service
    Paths {
        /// Service manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
        #[command(flatten)]
        options: GenerateOptions,
    },

    /// Print one service's generated file to stdout
    Emit {
        /// Service manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
        /// Service display name
        #[arg(short, long, value_name = "NAME")]
        service: String,
        #[command(flatten)]
        options: GenerateOptions,
    },
}

/// Options shared by every command that lays out or renders artifacts.
#[derive(Args, Debug, Clone)]
pub struct GenerateOptions {
    /// Wire protocol name (path segment and header title)
    #[arg(long, default_value = "grpc")]
    pub protocol: String,
    /// Rust path of the generated package
    #[arg(long = "gen-pkg", value_name = "PATH", default_value = "crate::generated")]
    pub gen_pkg: String,
    /// Root directory of generated code, relative to the output directory
    #[arg(long = "gen-dir", value_name = "DIR", default_value = "gen")]
    pub gen_dir: PathBuf,
    /// Error type returned by generated validation functions
    #[arg(long = "validation-error", value_name = "TYPE", default_value = "ValidationError")]
    pub validation_error: String,
    /// Do not emit lint allows in generated files
    #[arg(long)]
    pub strict: bool,
}

impl GenerateOptions {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_protocol(&self.protocol)
            .with_gen_pkg(&self.gen_pkg)
            .with_gen_dir(&self.gen_dir)
    }

    pub fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::new().with_validation_error(&self.validation_error);
        if self.strict {
            config.without_lint_allows()
        } else {
            config
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            manifest,
            output_dir,
            dry_run,
            options,
        } => commands::generate(&manifest, &output_dir, dry_run, &options),
        Command::Paths { manifest, options } => commands::print_paths(&manifest, &options),
        Command::Emit {
            manifest,
            service,
            options,
        } => commands::emit_service(&manifest, &service, &options),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["convgen", "generate", "api.json", "-o", "out", "--dry-run"]).unwrap();
        if let Command::Generate {
            manifest,
            output_dir,
            dry_run,
            options,
        } = cli.command
        {
            assert_eq!(manifest, PathBuf::from("api.json"));
            assert_eq!(output_dir, PathBuf::from("out"));
            assert!(dry_run);
            assert_eq!(options.protocol, "grpc");
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["convgen", "generate", "api.json"]).unwrap();
        if let Command::Generate {
            output_dir, options, ..
        } = cli.command
        {
            assert_eq!(output_dir, PathBuf::from("."));
            assert_eq!(options.generator_config(), GeneratorConfig::default());
            assert_eq!(options.render_config(), RenderConfig::default());
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_paths_with_options() {
        let cli = Cli::try_parse_from([
            "convgen",
            "paths",
            "api.json",
            "--protocol",
            "connect",
            "--gen-pkg",
            "api::generated",
            "--gen-dir",
            "src/gen",
        ])
        .unwrap();
        if let Command::Paths { options, .. } = cli.command {
            let config = options.generator_config();
            assert_eq!(config.protocol, "connect");
            assert_eq!(config.gen_pkg, "api::generated");
            assert_eq!(config.gen_dir, PathBuf::from("src/gen"));
        } else {
            panic!("Expected Paths command");
        }
    }

    #[test]
    fn test_cli_parse_emit() {
        let cli = Cli::try_parse_from(["convgen", "emit", "api.json", "--service", "Adder", "--strict"]).unwrap();
        if let Command::Emit { service, options, .. } = cli.command {
            assert_eq!(service, "Adder");
            assert!(!options.render_config().allow_lints);
        } else {
            panic!("Expected Emit command");
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["convgen"]).is_err());
    }
}
