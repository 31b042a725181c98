//! Core Settings struct and implementations.

use super::{BundleLayout, PackageSettings};
use std::path::{Path, PathBuf};

/// Build inputs for one bundle assembly.
///
/// Immutable once built, constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use bootjar_bundler::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> bootjar_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .package_settings(PackageSettings {
///         artifact_id: "demo".into(),
///         version: "1.0.0".into(),
///         main_class: "com.example.App".into(),
///     })
///     .compiled_output_dir("target/classes")
///     .output_dir("target")
///     .dependency("libs/a-1.0.jar")
///     .build()?;
///
/// assert_eq!(settings.bundle_base_name(), "demo-1.0.0");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Project identity and entry point.
    package: PackageSettings,

    /// Directory of already-compiled output, e.g. `target/classes`.
    compiled_output_dir: PathBuf,

    /// Resolved dependency files in class-path order.
    dependency_files: Vec<PathBuf>,

    /// Directory receiving the distributable archive, e.g. `target`.
    output_dir: PathBuf,

    /// Base name of both archives.
    bundle_base_name: String,

    /// Naming of the staging tree and cleanup targets.
    layout: BundleLayout,

    /// Leave the compiled-output directory in place after bundling.
    keep_compiled_output: bool,
}

impl Settings {
    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the entry point class name.
    pub fn main_class(&self) -> &str {
        &self.package.main_class
    }

    /// Returns the compiled-output directory.
    pub fn compiled_output_dir(&self) -> &Path {
        &self.compiled_output_dir
    }

    /// Returns the dependency files in class-path order.
    pub fn dependency_files(&self) -> &[PathBuf] {
        &self.dependency_files
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the bundle base name.
    pub fn bundle_base_name(&self) -> &str {
        &self.bundle_base_name
    }

    /// Returns the bundle layout.
    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    /// Whether the compiled-output directory survives cleanup.
    pub fn keep_compiled_output(&self) -> bool {
        self.keep_compiled_output
    }

    /// `<output_dir>/<staging_dir>`
    pub fn staging_root(&self) -> PathBuf {
        self.layout.staging_root(&self.output_dir)
    }

    /// Path of the executable archive inside the staging tree.
    pub fn staged_executable_path(&self) -> PathBuf {
        self.staging_root()
            .join(self.layout.executable_file_name(&self.bundle_base_name))
    }

    /// Path of the distributable archive.
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir
            .join(self.layout.archive_file_name(&self.bundle_base_name))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        compiled_output_dir: PathBuf,
        dependency_files: Vec<PathBuf>,
        output_dir: PathBuf,
        bundle_base_name: String,
        layout: BundleLayout,
        keep_compiled_output: bool,
    ) -> Self {
        Self {
            package,
            compiled_output_dir,
            dependency_files,
            output_dir,
            bundle_base_name,
            layout,
            keep_compiled_output,
        }
    }
}
