//! Project descriptor loading.
//!
//! A descriptor is an optional TOML file (conventionally `bootjar.toml`) that
//! carries the values a build tool would otherwise pass on the command line:
//!
//! ```toml
//! [project]
//! artifact_id = "demo"
//! version = "1.0.0"
//! main_class = "com.example.App"
//!
//! [bundle]
//! base_dir = "."
//! dependencies = ["libs/a-1.0.jar", "libs/b-2.0.jar"]
//! keep_compiled_output = true
//!
//! [bundle.layout]
//! lib_dir = "lib"
//! ```
//!
//! Relative paths are resolved against the directory holding the descriptor.

use crate::bundler::BundleLayout;
use crate::error::{BundlerError, CliError, Result};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// `[project]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Artifact identifier.
    pub artifact_id: Option<String>,

    /// Version string.
    pub version: Option<String>,

    /// Fully qualified entry point class.
    pub main_class: Option<String>,
}

/// `[bundle]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleSection {
    /// Project base directory; `target` and `target/classes` are derived from it.
    pub base_dir: Option<PathBuf>,

    /// Output directory, overrides `<base_dir>/target`.
    pub output_dir: Option<PathBuf>,

    /// Compiled-output directory, overrides `<output_dir>/classes`.
    pub classes_dir: Option<PathBuf>,

    /// Dependency files in class-path order.
    #[serde(default)]
    pub dependencies: Vec<PathBuf>,

    /// Bundle base name, overrides `<artifact_id>-<version>`.
    pub bundle_name: Option<String>,

    /// Keep the compiled-output directory after bundling.
    pub keep_compiled_output: Option<bool>,

    /// Naming of the staging tree and cleanup targets.
    pub layout: Option<BundleLayout>,
}

/// Parsed descriptor file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDescriptor {
    /// `[project]` section.
    #[serde(default)]
    pub project: ProjectSection,

    /// `[bundle]` section.
    #[serde(default)]
    pub bundle: BundleSection,
}

impl ProjectDescriptor {
    /// Parses descriptor text without touching paths.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads `path`, parses it and resolves every relative path against the
    /// descriptor's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BundlerError::Cli(CliError::Descriptor {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;

        let mut descriptor = Self::parse(&text)?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let base = absolute(base, &std::env::current_dir()?)?;
        descriptor.resolve_paths(&base)?;

        log::debug!("Loaded project descriptor {}", path.display());
        Ok(descriptor)
    }

    /// Makes every relative path absolute with respect to `base`.
    ///
    /// A descriptor without `base_dir` gets `base` itself, so the
    /// conventional `target` directory sits next to the descriptor.
    pub fn resolve_paths(&mut self, base: &Path) -> Result<()> {
        let bundle = &mut self.bundle;
        if bundle.base_dir.is_none() {
            bundle.base_dir = Some(base.to_path_buf());
        }
        for slot in [
            &mut bundle.base_dir,
            &mut bundle.output_dir,
            &mut bundle.classes_dir,
        ] {
            if let Some(path) = slot.as_mut() {
                let resolved = absolute(path.as_path(), base)?;
                *path = resolved;
            }
        }
        for dependency in &mut bundle.dependencies {
            let resolved = absolute(dependency.as_path(), base)?;
            *dependency = resolved;
        }
        Ok(())
    }
}

/// Resolves `path` against `base`, normalizing `.` and `..` components.
pub fn absolute(path: &Path, base: &Path) -> Result<PathBuf> {
    Ok(path.absolutize_from(base)?.into_owned())
}
