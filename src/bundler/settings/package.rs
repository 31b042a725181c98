//! Project identity and launch metadata.

/// Project identity and launch metadata.
///
/// Maps from the build tool's project model: the artifact id and version name
/// the bundle, the main class becomes the manifest's entry point.
///
/// # Examples
///
/// ```no_run
/// use bootjar_bundler::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     artifact_id: "demo".into(),
///     version: "1.0.0".into(),
///     main_class: "com.example.App".into(),
/// };
/// assert_eq!(package.bundle_base_name(), "demo-1.0.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Artifact identifier, e.g. `demo-service`.
    pub artifact_id: String,

    /// Version string, e.g. `1.0.0` or `2.3.1-SNAPSHOT`.
    pub version: String,

    /// Fully qualified entry point class, e.g. `com.example.App`.
    ///
    /// Passed through to the manifest uninterpreted.
    pub main_class: String,
}

impl PackageSettings {
    /// Default bundle base name, `<artifact_id>-<version>`.
    pub fn bundle_base_name(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }
}
