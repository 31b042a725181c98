//! Builder for constructing Settings.

use super::{BundleLayout, PackageSettings, Settings};
use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// `package_settings`, `compiled_output_dir` and `output_dir` are required.
/// Existence of the paths is checked later, when the bundle is assembled.
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
///     .dependency_files(vec!["libs/a-1.0.jar".into(), "libs/b-2.0.jar".into()])
///     .keep_compiled_output(false)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    compiled_output_dir: Option<PathBuf>,
    dependency_files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    bundle_base_name: Option<String>,
    layout: BundleLayout,
    keep_compiled_output: bool,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            package_settings: None,
            compiled_output_dir: None,
            dependency_files: Vec::new(),
            output_dir: None,
            bundle_base_name: None,
            layout: BundleLayout::default(),
            keep_compiled_output: true,
        }
    }
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets package metadata.
    ///
    /// # Required
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the compiled-output directory, typically `target/classes`.
    ///
    /// # Required
    pub fn compiled_output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.compiled_output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the dependency list. Order becomes class-path order.
    pub fn dependency_files(mut self, files: Vec<PathBuf>) -> Self {
        self.dependency_files = files;
        self
    }

    /// Appends one dependency file.
    pub fn dependency<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dependency_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory, typically `target`.
    ///
    /// # Required
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the bundle base name.
    ///
    /// Default: `<artifact_id>-<version>`
    pub fn bundle_base_name(mut self, name: impl Into<String>) -> Self {
        self.bundle_base_name = Some(name.into());
        self
    }

    /// Sets the staging and cleanup naming.
    ///
    /// Default: [`BundleLayout::default`]
    pub fn layout(mut self, layout: BundleLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Keeps or removes the compiled-output directory during cleanup.
    ///
    /// Default: `true`
    pub fn keep_compiled_output(mut self, keep: bool) -> Self {
        self.keep_compiled_output = keep;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a required field is missing, or if
    /// the bundle base name or a layout name could escape or collide inside
    /// the output directory. Every such name ends up in a path that is
    /// erased or deleted.
    pub fn build(self) -> Result<Settings> {
        let package = self
            .package_settings
            .ok_or_else(|| missing("package_settings"))?;
        let compiled_output_dir = self
            .compiled_output_dir
            .ok_or_else(|| missing("compiled_output_dir"))?;
        let output_dir = self.output_dir.ok_or_else(|| missing("output_dir"))?;

        let bundle_base_name = self
            .bundle_base_name
            .unwrap_or_else(|| package.bundle_base_name());
        if bundle_base_name.trim().is_empty() {
            return Err(Error::InvalidInput("bundle base name is empty".into()));
        }
        path_component("bundle base name", &bundle_base_name)?;
        check_layout(&self.layout, &output_dir, &compiled_output_dir)?;

        Ok(Settings::new(
            package,
            compiled_output_dir,
            self.dependency_files,
            output_dir,
            bundle_base_name,
            self.layout,
            self.keep_compiled_output,
        ))
    }
}

fn missing(field: &str) -> Error {
    Error::InvalidInput(format!("{field} is required"))
}

/// Rejects names that are empty, `.`, `..` or contain a path separator.
fn path_component(what: &str, name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::InvalidInput(format!(
            "{what} must be a single path component, got {name:?}"
        )));
    }
    Ok(())
}

fn check_layout(layout: &BundleLayout, output_dir: &Path, compiled_output_dir: &Path) -> Result<()> {
    path_component("lib directory name", &layout.lib_dir)?;
    path_component("staging directory name", &layout.staging_dir)?;
    path_component("executable archive extension", &layout.executable_extension)?;
    path_component("distributable archive extension", &layout.archive_extension)?;
    for name in &layout.transient_dirs {
        path_component("transient build directory name", name)?;
        if output_dir.join(name) == compiled_output_dir {
            return Err(Error::InvalidInput(format!(
                "transient build directory {name:?} is the compiled-output directory"
            )));
        }
        if *name == layout.staging_dir {
            return Err(Error::InvalidInput(format!(
                "transient build directory {name:?} is the staging directory"
            )));
        }
    }

    if layout
        .executable_extension
        .eq_ignore_ascii_case(&layout.archive_extension)
    {
        return Err(Error::InvalidInput(format!(
            "executable and distributable archives share the extension {:?}",
            layout.archive_extension
        )));
    }
    if layout.staging_dir == layout.lib_dir {
        return Err(Error::InvalidInput(format!(
            "staging and lib directories share the name {:?}",
            layout.lib_dir
        )));
    }
    if output_dir.join(&layout.staging_dir) == compiled_output_dir {
        return Err(Error::InvalidInput(format!(
            "staging directory {:?} is the compiled-output directory",
            layout.staging_dir
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> PackageSettings {
        PackageSettings {
            artifact_id: "demo".into(),
            version: "1.0".into(),
            main_class: "com.example.App".into(),
        }
    }

    #[test]
    fn derives_base_name_and_paths() {
        let settings = SettingsBuilder::new()
            .package_settings(package())
            .compiled_output_dir("/p/target/classes")
            .output_dir("/p/target")
            .build()
            .unwrap();

        assert_eq!(settings.bundle_base_name(), "demo-1.0");
        assert_eq!(settings.archive_path(), Path::new("/p/target/demo-1.0.zip"));
        assert_eq!(
            settings.staged_executable_path(),
            Path::new("/p/target/temp/demo-1.0.jar")
        );
        assert!(settings.keep_compiled_output());
    }

    #[test]
    fn missing_output_dir_is_invalid_input() {
        let err = SettingsBuilder::new()
            .package_settings(package())
            .compiled_output_dir("classes")
            .build()
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("output_dir"));
    }

    fn build_with(layout: BundleLayout) -> Result<Settings> {
        SettingsBuilder::new()
            .package_settings(package())
            .compiled_output_dir("/p/target/classes")
            .output_dir("/p/target")
            .layout(layout)
            .build()
    }

    #[test]
    fn nested_lib_dir_is_rejected() {
        let err = build_with(BundleLayout {
            lib_dir: "a/b".into(),
            ..Default::default()
        })
        .unwrap_err();

        assert!(err.is_invalid_input());
    }

    #[test]
    fn empty_staging_dir_is_rejected() {
        let err = build_with(BundleLayout {
            staging_dir: String::new(),
            ..Default::default()
        })
        .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("staging directory"));
    }

    #[test]
    fn escaping_names_are_rejected() {
        for name in [".", "..", "a/b", "a\\b"] {
            let transient = build_with(BundleLayout {
                transient_dirs: vec![name.into()],
                ..Default::default()
            });
            assert!(transient.unwrap_err().is_invalid_input(), "transient {name:?}");

            let staging = build_with(BundleLayout {
                staging_dir: name.into(),
                ..Default::default()
            });
            assert!(staging.unwrap_err().is_invalid_input(), "staging {name:?}");
        }

        let err = SettingsBuilder::new()
            .package_settings(package())
            .compiled_output_dir("/p/target/classes")
            .output_dir("/p/target")
            .bundle_base_name("../escape")
            .build()
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn shared_archive_extension_is_rejected() {
        let err = build_with(BundleLayout {
            archive_extension: "JAR".into(),
            ..Default::default()
        })
        .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("share the extension"));
    }

    #[test]
    fn staging_dir_named_like_lib_dir_is_rejected() {
        let err = build_with(BundleLayout {
            staging_dir: "lib".into(),
            ..Default::default()
        })
        .unwrap_err();

        assert!(err.is_invalid_input());
    }

    #[test]
    fn compiled_output_is_never_a_cleanup_target() {
        let transient = build_with(BundleLayout {
            transient_dirs: vec!["classes".into()],
            ..Default::default()
        });
        assert!(transient.unwrap_err().is_invalid_input());

        let staging = build_with(BundleLayout {
            staging_dir: "classes".into(),
            ..Default::default()
        });
        assert!(staging.unwrap_err().is_invalid_input());
    }
}
