//! On-disk naming shared by the manifest builder, the stager and cleanup.

use std::path::{Path, PathBuf};

/// Directory inside the staging tree that holds dependency copies.
pub const LIB_DIR_NAME: &str = "lib";

/// Extension of the executable archive.
pub const EXECUTABLE_EXTENSION: &str = "jar";

/// Extension of the distributable archive.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Staging directory created under the output directory.
pub const STAGING_DIR_NAME: &str = "temp";

/// Build-output directories left behind by earlier build phases.
pub const TRANSIENT_BUILD_DIRS: [&str; 6] = [
    "generated-sources",
    "maven-archiver",
    "maven-status",
    "surefire-reports",
    "test-classes",
    "generated-test-sources",
];

/// Names of everything the bundler reads, writes or removes.
///
/// The manifest's class-path prefix and the staged dependency directory both
/// come from [`BundleLayout::lib_dir`], so they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct BundleLayout {
    /// Dependency directory name, also the class-path token prefix.
    pub lib_dir: String,

    /// Executable archive extension, without the dot.
    pub executable_extension: String,

    /// Distributable archive extension, without the dot.
    pub archive_extension: String,

    /// Staging directory name under the output directory.
    pub staging_dir: String,

    /// Transient build directories removed during cleanup.
    pub transient_dirs: Vec<String>,
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self {
            lib_dir: LIB_DIR_NAME.to_string(),
            executable_extension: EXECUTABLE_EXTENSION.to_string(),
            archive_extension: ARCHIVE_EXTENSION.to_string(),
            staging_dir: STAGING_DIR_NAME.to_string(),
            transient_dirs: TRANSIENT_BUILD_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BundleLayout {
    /// `<output_dir>/<staging_dir>`
    pub fn staging_root(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.staging_dir)
    }

    /// `<staging_root>/<lib_dir>`
    pub fn lib_root(&self, staging_root: &Path) -> PathBuf {
        staging_root.join(&self.lib_dir)
    }

    /// File name of the executable archive, e.g. `app-1.0.jar`.
    pub fn executable_file_name(&self, base_name: &str) -> String {
        format!("{}.{}", base_name, self.executable_extension)
    }

    /// File name of the distributable archive, e.g. `app-1.0.zip`.
    pub fn archive_file_name(&self, base_name: &str) -> String {
        format!("{}.{}", base_name, self.archive_extension)
    }

    /// Class-path token for a staged dependency, e.g. `lib/a-1.0.jar`.
    pub fn class_path_token(&self, file_name: &str) -> String {
        format!("{}/{}", self.lib_dir, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_path_tokens_and_staging_use_the_same_lib_dir() {
        let layout = BundleLayout {
            lib_dir: "deps".into(),
            ..Default::default()
        };
        let staging = layout.staging_root(Path::new("/out"));

        assert_eq!(staging, Path::new("/out/temp"));
        assert_eq!(layout.lib_root(&staging), Path::new("/out/temp/deps"));
        assert_eq!(layout.class_path_token("a.jar"), "deps/a.jar");
    }

    #[test]
    fn default_file_names() {
        let layout = BundleLayout::default();

        assert_eq!(layout.executable_file_name("app-1.0"), "app-1.0.jar");
        assert_eq!(layout.archive_file_name("app-1.0"), "app-1.0.zip");
        assert_eq!(layout.transient_dirs.len(), 6);
    }
}
