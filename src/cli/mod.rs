//! CLI module for the glint builtin environment tools
//!
//! ## Commands
//!
//! - `dump --stage S` - Print every builtin symbol of a stage/profile
//! - `extensions` - Print the extension table seeded from host resources
//! - `lookup --stage S NAME [ARG_TYPES...]` - Resolve a builtin call
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

use clap::{Parser, Subcommand};

use crate::frontend::resources::{ShaderStage, SpecProfile};

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

    /// Render a library diagnostic through miette's report handler.
    pub fn from_diagnostic<E>(err: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(err)))
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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Builtin symbol environment for GLSL ES 1.00 style shaders
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(version = VERSION)]
#[command(about = "Inspect the builtin environment of a shader stage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every builtin symbol visible to a stage
    Dump {
        #[arg(long, value_enum)]
        stage: ShaderStage,
        #[arg(long, value_enum, default_value_t = SpecProfile::Standard)]
        profile: SpecProfile,
        /// JSON file with host resources (defaults apply when omitted)
        #[arg(long, value_name = "FILE")]
        resources: Option<PathBuf>,
        /// Emit JSON instead of one symbol per line
        #[arg(long)]
        json: bool,
    },

    /// Print the initial extension behavior table
    Extensions {
        #[arg(long, value_name = "FILE")]
        resources: Option<PathBuf>,
    },

    /// Resolve a builtin call against the environment
    Lookup {
        #[arg(long, value_enum)]
        stage: ShaderStage,
        #[arg(long, value_enum, default_value_t = SpecProfile::Standard)]
        profile: SpecProfile,
        #[arg(long, value_name = "FILE")]
        resources: Option<PathBuf>,
        /// Function name, e.g. `texture2D`
        #[arg(value_name = "NAME")]
        name: String,
        /// Argument type spellings, e.g. `sampler2D` `vec2` or `"highp vec3"`
        #[arg(value_name = "ARG_TYPES")]
        args: Vec<String>,
    },
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
        Some(Command::Dump {
            stage,
            profile,
            resources,
            json,
        }) => commands::dump(stage, profile, resources.as_deref(), json),
        Some(Command::Extensions { resources }) => commands::print_extensions(resources.as_deref()),
        Some(Command::Lookup {
            stage,
            profile,
            resources,
            name,
            args,
        }) => commands::lookup(stage, profile, resources.as_deref(), &name, &args),
        None => Err(CliError::failure("Error: no command given (try `glint --help`)")),
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
    fn test_cli_parse_dump() {
        let cli = Cli::try_parse_from(["glint", "dump", "--stage", "fragment", "--json"]).unwrap();
        if let Some(Command::Dump {
            stage, profile, json, ..
        }) = cli.command
        {
            assert_eq!(stage, ShaderStage::Fragment);
            assert_eq!(profile, SpecProfile::Standard);
            assert!(json);
        } else {
            panic!("Expected Dump command");
        }
    }

    #[test]
    fn test_cli_parse_profile() {
        let cli = Cli::try_parse_from(["glint", "dump", "--stage", "vertex", "--profile", "css-shaders"]).unwrap();
        if let Some(Command::Dump { profile, .. }) = cli.command {
            assert_eq!(profile, SpecProfile::CssShaders);
        } else {
            panic!("Expected Dump command");
        }
    }

    #[test]
    fn test_cli_parse_lookup() {
        let cli = Cli::try_parse_from(["glint", "lookup", "--stage", "vertex", "texture2DLod", "sampler2D", "vec2", "float"])
            .unwrap();
        if let Some(Command::Lookup { name, args, .. }) = cli.command {
            assert_eq!(name, "texture2DLod");
            assert_eq!(args, ["sampler2D", "vec2", "float"]);
        } else {
            panic!("Expected Lookup command");
        }
    }

    #[test]
    fn test_cli_parse_extensions() {
        let cli = Cli::try_parse_from(["glint", "extensions", "--resources", "host.json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Extensions { resources: Some(_) })));
    }

    #[test]
    fn test_cli_rejects_unknown_stage() {
        assert!(Cli::try_parse_from(["glint", "dump", "--stage", "tessellation"]).is_err());
    }

    #[test]
    fn unsupported_stage_is_a_cli_failure() {
        let err = commands::dump(ShaderStage::Compute, SpecProfile::Standard, None, false).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("compute"));
    }

    #[test]
    fn missing_command_is_a_failure() {
        let err = execute(Cli { command: None }).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
