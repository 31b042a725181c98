//! Error types for bundle assembly.
//!
//! Every failure inside the pipeline is an [`Error`]. The orchestrator wraps
//! the first failure it hits into [`Error::Assembly`], tagged with the
//! [`AssemblyStep`] that produced it, so callers see exactly one error that
//! names the failing step.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline step that an [`Error::Assembly`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStep {
    /// Checking the build inputs before anything is written.
    Validate,
    /// Preparing the output and staging directories.
    Prepare,
    /// Packing the compiled output into the executable archive.
    Pack,
    /// Copying dependency files into the staging lib directory.
    Stage,
    /// Checking that every class-path entry resolves inside the staging tree.
    Verify,
    /// Zipping the staging tree into the distributable archive.
    Zip,
    /// Measuring and hashing the finished archive.
    Finalize,
}

impl Display for AssemblyStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validate => "input validation",
            Self::Prepare => "staging preparation",
            Self::Pack => "executable archive packing",
            Self::Stage => "dependency staging",
            Self::Verify => "class-path verification",
            Self::Zip => "distributable archive zipping",
            Self::Finalize => "artifact finalization",
        };
        f.write_str(name)
    }
}

/// Errors produced while assembling a bundle.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// A required input is missing, unreadable or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem operation failed on a known path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What the bundler was doing.
        context: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: io::Error,
    },

    /// Bare I/O error without path information.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Archive writer or reader failed.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failed.
    #[error("directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// A traversed path was not under its traversal root.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Free-form failure.
    #[error("{0}")]
    GenericError(String),

    /// A pipeline step failed; the whole assembly is aborted.
    #[error("bundle assembly failed during {step}: {source}")]
    Assembly {
        /// Step that failed.
        step: AssemblyStep,
        /// What went wrong in that step.
        #[source]
        source: Box<Self>,
    },
}

impl Error {
    /// Wraps `self` as the failure of `step`.
    ///
    /// An error that already carries a step is returned unchanged.
    pub fn in_step(self, step: AssemblyStep) -> Self {
        match self {
            Self::Assembly { .. } => self,
            other => Self::Assembly {
                step,
                source: Box::new(other),
            },
        }
    }

    /// Step that failed, if this error came out of the orchestrator.
    pub fn step(&self) -> Option<AssemblyStep> {
        match self {
            Self::Assembly { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Innermost error with the assembly layer peeled away.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Assembly { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// `true` when the root cause is a rejected input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.root_cause(), Self::InvalidInput(_))
    }
}

/// Attaches a path to raw I/O failures.
pub trait ErrorExt<T> {
    /// Converts an I/O failure into [`Error::Fs`] naming `path`.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
