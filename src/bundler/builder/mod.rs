//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns a
//! compiled-output directory and its dependency files into one distributable
//! archive.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads its inputs from [`Settings`](crate::bundler::Settings)
//! 2. Packs an executable archive with an embedded launch manifest
//! 3. Stages the dependencies next to it
//! 4. Zips the staging tree and checksums the result
//! 5. Cleans up intermediate and transient build output
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`cleanup`] - Best-effort removal of staging and transient paths
//! - [`orchestrator`] - Main [`Bundler`] struct and the assembly pipeline

mod checksum;
mod cleanup;
mod orchestrator;

pub use checksum::calculate_sha256;
pub use cleanup::{
    CleanupFailure, CleanupKind, CleanupReport, CleanupTask, cleanup_tasks, run_cleanup,
};
pub use orchestrator::{Bundler, assemble_bundle};

use crate::bundler::manifest::LaunchManifest;
use std::path::PathBuf;

/// The distributable archive produced by a successful run.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Path of the distributable archive.
    pub path: PathBuf,
    /// Archive size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive.
    pub checksum: String,
    /// Manifest embedded in the executable archive.
    pub manifest: LaunchManifest,
    /// What cleanup removed, found absent, or failed to remove.
    pub cleanup: CleanupReport,
}
