//! JSON report of a finished bundle.

use crate::bundler::{BundledArtifact, CleanupReport};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Serializable summary of a [`BundledArtifact`].
#[derive(Debug, Serialize)]
pub struct BundleReport {
    /// Distributable archive path.
    pub archive: PathBuf,
    /// Archive size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive.
    pub sha256: String,
    /// When the report was produced.
    pub created_at: DateTime<Utc>,
    /// Entry point written to the manifest.
    pub main_class: String,
    /// Class-path tokens written to the manifest.
    pub class_path: Vec<String>,
    /// Cleanup outcome.
    pub cleanup: CleanupReport,
}

impl From<&BundledArtifact> for BundleReport {
    fn from(artifact: &BundledArtifact) -> Self {
        Self {
            archive: artifact.path.clone(),
            size: artifact.size,
            sha256: artifact.checksum.clone(),
            created_at: Utc::now(),
            main_class: artifact.manifest.main_class.clone(),
            class_path: artifact.manifest.class_path.clone(),
            cleanup: artifact.cleanup.clone(),
        }
    }
}

/// Writes the report for `artifact` to `path` as pretty-printed JSON.
pub fn write_report(artifact: &BundledArtifact, path: &Path) -> anyhow::Result<()> {
    let report = BundleReport::from(artifact);
    let json = serde_json::to_string_pretty(&report).context("serializing bundle report")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("writing bundle report {}", path.display()))?;

    log::debug!("Wrote bundle report {}", path.display());
    Ok(())
}
