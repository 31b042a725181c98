//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with consistency
//! checks and the runtime configuration derived from the flags.

use clap::Parser;
use std::path::PathBuf;

/// Launchable jar bundler
#[derive(Parser, Debug)]
#[command(
    name = "bootjar",
    version,
    about = "Bundle compiled classes and their dependencies into a launchable zip",
    long_about = "Packs the compiled output into an executable jar whose manifest lists every
dependency under lib/, stages the dependencies next to it and zips both into
<output>/<artifact>-<version>.zip. Transient build output and the staging
directory are removed afterwards.

Usage:
  bootjar --main-class com.example.App --artifact-id demo --version-string 1.0.0 \\
          --base-dir . --dependency libs/a-1.0.jar --dependency libs/b-2.0.jar
  bootjar --config bootjar.toml
  bootjar --config bootjar.toml --classpath \"$(cat target/classpath.txt)\"

Exit code 0 = distributable archive guaranteed to exist."
)]
pub struct Args {
    /// Project descriptor (TOML); flags override its values
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fully qualified entry point class
    #[arg(short = 'm', long, env = "BOOTJAR_MAIN_CLASS", value_name = "CLASS")]
    pub main_class: Option<String>,

    /// Artifact identifier, first half of the bundle name
    #[arg(short = 'a', long, value_name = "ID")]
    pub artifact_id: Option<String>,

    /// Project version, second half of the bundle name
    #[arg(long = "version-string", value_name = "VERSION")]
    pub version_string: Option<String>,

    /// Project base directory; output defaults to <BASE>/target
    #[arg(short = 'b', long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output directory receiving the distributable archive
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compiled-output directory; defaults to <OUTPUT>/classes
    #[arg(long, value_name = "DIR")]
    pub classes_dir: Option<PathBuf>,

    /// Dependency file, repeatable; order is class-path order
    #[arg(short = 'd', long = "dependency", value_name = "FILE")]
    pub dependencies: Vec<PathBuf>,

    /// Dependency files as one platform path list (':' on Unix, ';' on Windows)
    #[arg(long, value_name = "PATHS")]
    pub classpath: Option<String>,

    /// Bundle base name; defaults to <ARTIFACT>-<VERSION>
    #[arg(long, value_name = "NAME")]
    pub bundle_name: Option<String>,

    /// Also delete the compiled-output directory after bundling
    #[arg(long)]
    pub remove_classes: bool,

    /// Write a JSON report of the created bundle
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print per-step detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("--verbose and --quiet cannot be used together".to_string());
        }

        if self
            .main_class
            .as_deref()
            .is_some_and(|class| class.trim().is_empty())
        {
            return Err("Main class cannot be empty".to_string());
        }

        if let Some(name) = &self.bundle_name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(format!("Invalid bundle name: {:?}", name));
            }
        }

        Ok(())
    }

    /// Dependency files from `--dependency` followed by `--classpath`.
    pub fn dependency_files(&self) -> Vec<PathBuf> {
        let mut files = self.dependencies.clone();
        if let Some(list) = &self.classpath {
            files.extend(
                std::env::split_paths(list).filter(|p| !p.as_os_str().is_empty()),
            );
        }
        files
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
