//! File system utilities for bundling.
//!
//! Idempotent create/remove helpers and a validating file copy.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
///
/// Returns `true` when something was removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
///
/// Returns `true` when something was removed.
pub async fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Overwrites the destination. Fails if the source path is a directory or
/// doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    if !from.exists() {
        return Err(Error::InvalidInput(format!("{} does not exist", from.display())));
    }
    if !from.is_file() {
        return Err(Error::InvalidInput(format!("{} is not a file", from.display())));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removals_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        create_dir_all(&sub.join("deep"), false).await.unwrap();
        let file = dir.path().join("f.txt");
        tokio::fs::write(&file, b"x").await.unwrap();

        assert!(remove_dir_all(&sub).await.unwrap());
        assert!(!remove_dir_all(&sub).await.unwrap());
        assert!(remove_file(&file).await.unwrap());
        assert!(!remove_file(&file).await.unwrap());
    }

    #[tokio::test]
    async fn erase_clears_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let stage = dir.path().join("stage");
        create_dir_all(&stage, false).await.unwrap();
        tokio::fs::write(stage.join("stale.jar"), b"old").await.unwrap();

        create_dir_all(&stage, true).await.unwrap();

        assert!(stage.is_dir());
        assert!(!stage.join("stale.jar").exists());
    }

    #[tokio::test]
    async fn copy_file_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(dir.path(), &dir.path().join("out")).await.unwrap_err();

        assert!(err.is_invalid_input());
    }
}
