//! Dependency staging.
//!
//! Copies every dependency file into the staging tree's lib directory under
//! its own file name. Copies happen in input order, so when two dependencies
//! share a file name the later one wins.

use crate::bundler::{
    error::{Error, Result},
    utils::fs,
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// Copies `dependency_files` into `lib_dir`, creating it if needed.
///
/// Returns the staged paths in input order (duplicated names appear twice).
/// A missing source aborts staging; files copied before it stay on disk.
pub async fn stage_dependencies(lib_dir: &Path, dependency_files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(lib_dir, false).await?;

    let mut seen = HashSet::new();
    let mut staged = Vec::with_capacity(dependency_files.len());
    for source in dependency_files {
        let file_name = source.file_name().ok_or_else(|| {
            Error::InvalidInput(format!(
                "dependency path has no file name: {}",
                source.display()
            ))
        })?;
        let target = lib_dir.join(file_name);

        if !seen.insert(file_name.to_os_string()) {
            log::debug!(
                "{} overwrites an earlier dependency with the same name",
                source.display()
            );
        }

        let bytes = fs::copy_file(source, &target).await?;
        log::debug!("  staged {} ({} bytes)", target.display(), bytes);
        staged.push(target);
    }

    Ok(staged)
}
