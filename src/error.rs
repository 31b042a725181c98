//! Error types for the command line front end.
//!
//! Library failures arrive as [`crate::bundler::Error`] and are wrapped here
//! together with argument, descriptor and report errors.

use crate::bundler::AssemblyStep;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Project descriptor could not be read
    #[error("Failed to read descriptor {path}: {reason}")]
    Descriptor {
        /// Descriptor path
        path: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Bundler(e) if e.is_invalid_input() => vec![
                "Run the compile phase first so the compiled output directory exists".to_string(),
                "Check that every --dependency path points at an existing file".to_string(),
            ],
            Self::Bundler(e) => match e.step() {
                Some(AssemblyStep::Pack | AssemblyStep::Zip | AssemblyStep::Finalize) => vec![
                    "Check free disk space and write permissions on the output directory"
                        .to_string(),
                ],
                Some(AssemblyStep::Stage | AssemblyStep::Verify) => vec![
                    "Check that the dependency files are readable".to_string(),
                    "Check write permissions on the output directory".to_string(),
                ],
                _ => vec!["Check the error message above for specific details".to_string()],
            },
            Self::Cli(CliError::MissingArgument { argument }) => vec![format!(
                "Pass --{argument} or set it in the project descriptor"
            )],
            Self::Toml(_) | Self::Cli(CliError::Descriptor { .. }) => {
                vec!["Fix the project descriptor and run again".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cli(_) => 2,
            _ => 1,
        }
    }
}
