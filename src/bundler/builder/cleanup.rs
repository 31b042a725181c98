//! Best-effort removal of the staging tree and transient build output.
//!
//! Each [`CleanupTask`] is attempted on its own. A missing target is fine; a
//! failure to remove a present target is logged and recorded in the
//! [`CleanupReport`] without stopping the remaining tasks.

use crate::bundler::{Settings, utils::fs};
use std::path::{Path, PathBuf};

/// What kind of filesystem object a task removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupKind {
    /// A directory and everything below it.
    Directory,
    /// A single file.
    File,
}

/// One path to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupTask {
    /// Target path.
    pub path: PathBuf,
    /// Directory or file.
    pub kind: CleanupKind,
    /// The bundler created this path itself, so it is expected to exist.
    pub required: bool,
}

impl CleanupTask {
    /// Removal of a directory the bundler created.
    pub fn owned_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: CleanupKind::Directory,
            required: true,
        }
    }

    /// Removal of a file the bundler created.
    pub fn owned_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: CleanupKind::File,
            required: true,
        }
    }

    /// Removal of a directory an earlier build phase may have left.
    pub fn stray_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: CleanupKind::Directory,
            required: false,
        }
    }

    /// Removal of a file an earlier build phase may have left.
    pub fn stray_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: CleanupKind::File,
            required: false,
        }
    }
}

/// A removal that failed on a present target.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CleanupFailure {
    /// Target path.
    pub path: PathBuf,
    /// Rendered error.
    pub error: String,
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CleanupReport {
    /// Paths that existed and were removed.
    pub removed: Vec<PathBuf>,
    /// Paths that were already absent.
    pub absent: Vec<PathBuf>,
    /// Paths that could not be removed.
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    /// `true` when every task either removed its target or found it absent.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Cleanup tasks for a finished bundle, in execution order.
///
/// Transient build directories and the stray top-level executable archive
/// come first, then the staged executable archive, the staged lib directory
/// and the staging root. The compiled-output directory is included only when
/// the settings do not keep it.
pub fn cleanup_tasks(settings: &Settings) -> Vec<CleanupTask> {
    let layout = settings.layout();
    let output_dir = settings.output_dir();
    let staging_root = settings.staging_root();

    let mut tasks: Vec<CleanupTask> = layout
        .transient_dirs
        .iter()
        .map(|name| CleanupTask::stray_dir(output_dir.join(name)))
        .collect();

    tasks.push(CleanupTask::stray_file(output_dir.join(
        layout.executable_file_name(settings.bundle_base_name()),
    )));
    tasks.push(CleanupTask::owned_file(settings.staged_executable_path()));
    tasks.push(CleanupTask::owned_dir(layout.lib_root(&staging_root)));
    tasks.push(CleanupTask::owned_dir(staging_root));

    if !settings.keep_compiled_output() {
        tasks.push(CleanupTask::stray_dir(settings.compiled_output_dir()));
    }

    tasks
}

/// Runs every task, never failing.
pub async fn run_cleanup(tasks: &[CleanupTask]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for task in tasks {
        match remove(&task.path, task.kind).await {
            Ok(true) => {
                log::debug!("Removed {}", task.path.display());
                report.removed.push(task.path.clone());
            }
            Ok(false) => {
                if task.required {
                    log::debug!("Expected {} to exist during cleanup", task.path.display());
                }
                report.absent.push(task.path.clone());
            }
            Err(e) => {
                log::warn!("Failed to clean up {}: {}", task.path.display(), e);
                report.failures.push(CleanupFailure {
                    path: task.path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

async fn remove(path: &Path, kind: CleanupKind) -> crate::bundler::Result<bool> {
    match kind {
        CleanupKind::Directory => fs::remove_dir_all(path).await,
        CleanupKind::File => fs::remove_file(path).await,
    }
}
