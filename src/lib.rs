//! Launchable jar bundler library.
//!
//! Turns a build's compiled output and its resolved dependency files into one
//! distributable zip:
//! - `<base>.jar` with a manifest naming the entry point and a `lib/` class path
//! - `lib/` holding a copy of every dependency
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
