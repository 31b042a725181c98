//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the assembly
//! pipeline step by step and reports the finished [`BundledArtifact`].

use super::{
    BundledArtifact,
    checksum::calculate_sha256,
    cleanup::{cleanup_tasks, run_cleanup},
};
use crate::{
    bail,
    bundler::{
        Settings, archive,
        error::{AssemblyStep, Error, ErrorExt, Result},
        manifest::{LaunchManifest, build_manifest},
        stage::stage_dependencies,
        utils::fs,
    },
};
use std::{io, path::Path};

/// Main bundler orchestrator.
///
/// Runs the pipeline in a fixed order:
///
/// 1. Validate inputs (nothing is written before this passes)
/// 2. Build the launch manifest
/// 3. Pack the compiled output into `<temp>/<base>.jar`
/// 4. Stage dependencies into `<temp>/lib`
/// 5. Verify every class-path entry resolves
/// 6. Zip the staging tree into `<output>/<base>.zip`
/// 7. Measure and hash the archive
/// 8. Clean up (best-effort, never fails the run)
///
/// The first failing step aborts the run with an [`Error::Assembly`] naming
/// that step. A running bundle must not share its output directory with
/// another run.
///
/// # Examples
///
/// ```no_run
/// use bootjar_bundler::bundler::{Bundler, PackageSettings, SettingsBuilder};
///
/// # async fn example() -> bootjar_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .package_settings(PackageSettings {
///         artifact_id: "demo".into(),
///         version: "1.0.0".into(),
///         main_class: "com.example.App".into(),
///     })
///     .compiled_output_dir("target/classes")
///     .output_dir("target")
///     .build()?;
///
/// let artifact = Bundler::new(settings).bundle().await?;
/// println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Assembles the distributable archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Assembly`] wrapping the cause of the first failed
    /// step. Cleanup problems are reported in
    /// [`BundledArtifact::cleanup`] instead.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let settings = &self.settings;
        let layout = settings.layout();

        log::info!(
            "Assembling {} (main class {})",
            settings.bundle_base_name(),
            settings.main_class()
        );

        self.validate()
            .await
            .map_err(|e| e.in_step(AssemblyStep::Validate))?;

        let manifest = build_manifest(settings.main_class(), settings.dependency_files(), layout);
        log::debug!("Class-Path: {}", manifest.class_path_value());

        let staging_root = settings.staging_root();
        self.prepare(&staging_root)
            .await
            .map_err(|e| e.in_step(AssemblyStep::Prepare))?;

        // Executable archive
        let jar_path = settings.staged_executable_path();
        let packed = {
            let target = jar_path.clone();
            let source = settings.compiled_output_dir().to_path_buf();
            let manifest = manifest.clone();
            run_blocking(move || archive::pack_executable(&target, &source, &manifest)).await
        };
        let packed = match packed {
            Ok(count) => count,
            Err(e) => {
                discard_partial(&jar_path).await;
                return Err(e.in_step(AssemblyStep::Pack));
            }
        };
        log::info!("Packed {} file(s) into {}", packed, jar_path.display());

        // Dependencies
        let lib_root = layout.lib_root(&staging_root);
        let staged = stage_dependencies(&lib_root, settings.dependency_files())
            .await
            .map_err(|e| e.in_step(AssemblyStep::Stage))?;
        log::info!("Staged {} dependency file(s) into {}", staged.len(), lib_root.display());

        verify_class_path(&staging_root, &manifest)
            .map_err(|e| e.in_step(AssemblyStep::Verify))?;

        // Distributable archive
        let archive_path = settings.archive_path();
        let zipped = {
            let target = archive_path.clone();
            let source = staging_root.clone();
            run_blocking(move || archive::zip_directory(&target, &source)).await
        };
        if let Err(e) = zipped {
            discard_partial(&archive_path).await;
            return Err(e.in_step(AssemblyStep::Zip));
        }

        let (size, checksum) = finalize(&archive_path)
            .await
            .map_err(|e| e.in_step(AssemblyStep::Finalize))?;

        let cleanup = run_cleanup(&cleanup_tasks(settings)).await;
        if !cleanup.is_clean() {
            log::warn!(
                "{} path(s) could not be cleaned up; the bundle itself is complete",
                cleanup.failures.len()
            );
        }

        log::info!("✓ Created bundle: {}", archive_path.display());

        Ok(BundledArtifact {
            path: archive_path,
            size,
            checksum,
            manifest,
            cleanup,
        })
    }

    /// Checks every input path before anything is written.
    async fn validate(&self) -> Result<()> {
        let settings = &self.settings;

        if settings.main_class().trim().is_empty() {
            return Err(Error::InvalidInput("main class is empty".into()));
        }

        let classes = settings.compiled_output_dir();
        match tokio::fs::metadata(classes).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(Error::InvalidInput(format!(
                    "compiled output {} is not a directory",
                    classes.display()
                )));
            }
            Err(e) => return Err(unreadable("compiled output directory", classes, e)),
        }

        for dependency in settings.dependency_files() {
            match tokio::fs::metadata(dependency).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    return Err(Error::InvalidInput(format!(
                        "dependency {} is not a regular file",
                        dependency.display()
                    )));
                }
                Err(e) => return Err(unreadable("dependency file", dependency, e)),
            }
        }

        let output_dir = settings.output_dir();
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(Error::InvalidInput(format!(
                "output directory {} is not a directory",
                output_dir.display()
            )));
        }

        Ok(())
    }

    /// Creates the output directory and a fresh staging root.
    async fn prepare(&self, staging_root: &Path) -> Result<()> {
        fs::create_dir_all(self.settings.output_dir(), false).await?;
        if staging_root.exists() {
            log::debug!("Clearing stale staging tree {}", staging_root.display());
        }
        fs::create_dir_all(staging_root, true).await
    }
}

/// Assembles the bundle described by `settings`.
///
/// Shorthand for `Bundler::new(settings).bundle()`.
pub async fn assemble_bundle(settings: Settings) -> Result<BundledArtifact> {
    Bundler::new(settings).bundle().await
}

/// Fails unless every class-path token names a file under `staging_root`.
fn verify_class_path(staging_root: &Path, manifest: &LaunchManifest) -> Result<()> {
    for token in &manifest.class_path {
        let staged = staging_root.join(token);
        if !staged.is_file() {
            bail!(
                "class-path entry {} does not resolve to {}",
                token,
                staged.display()
            );
        }
    }
    Ok(())
}

/// Size in bytes and SHA-256 of the finished archive.
async fn finalize(archive_path: &Path) -> Result<(u64, String)> {
    let metadata = tokio::fs::metadata(archive_path)
        .await
        .fs_context("reading artifact metadata", archive_path)?;
    let checksum = calculate_sha256(archive_path).await?;
    Ok((metadata.len(), checksum))
}

/// Removes a partially written archive, logging instead of failing.
async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        log::warn!("Failed to remove partial archive {}: {}", path.display(), e);
    }
}

fn unreadable(what: &str, path: &Path, error: io::Error) -> Error {
    if error.kind() == io::ErrorKind::NotFound {
        Error::InvalidInput(format!("{what} {} does not exist", path.display()))
    } else {
        Error::InvalidInput(format!("{what} {} is unreadable: {error}", path.display()))
    }
}

/// Runs blocking archive work on the blocking pool and waits for it.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
}
