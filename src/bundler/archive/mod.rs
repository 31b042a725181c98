//! Directory-to-archive packing.
//!
//! Both archives the bundler produces come out of the same primitive: walk a
//! [`SourceTree`] and store every regular file under its root-relative,
//! forward-slash name. The executable archive additionally gets the launch
//! manifest as its first entry.
//!
//! Entries are deflated and stamped with a fixed modification time, so two
//! runs over identical trees produce identical archives.
//!
//! These functions block; async callers run them on the blocking pool.

mod walk;

pub use walk::{SourceTree, TreeEntry, TreeFiles, archive_name};

use crate::bundler::{
    error::{ErrorExt, Result},
    manifest::{LaunchManifest, MANIFEST_ENTRY_NAME},
};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Incremental archive writer with deterministic entry options.
pub struct ArchiveWriter {
    inner: ZipWriter<BufWriter<File>>,
    options: SimpleFileOptions,
    path: PathBuf,
}

impl ArchiveWriter {
    /// Creates (or truncates) the archive at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).fs_context("creating archive", path)?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        Ok(Self {
            inner: ZipWriter::new(BufWriter::new(file)),
            options,
            path: path.to_path_buf(),
        })
    }

    /// Stores `bytes` as the entry `name`.
    pub fn add_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.inner.start_file(name, self.options)?;
        self.inner
            .write_all(bytes)
            .fs_context("writing archive entry", &self.path)?;
        Ok(())
    }

    /// Stores the content of a walked file under its archive name.
    pub fn add_file(&mut self, entry: &TreeEntry) -> Result<()> {
        let name = entry.archive_name()?;
        let mut source = File::open(&entry.absolute).fs_context("opening file", &entry.absolute)?;

        self.inner.start_file(name.as_str(), self.options)?;
        io::copy(&mut source, &mut self.inner).fs_context("archiving file", &entry.absolute)?;

        log::debug!("  + {}", name);
        Ok(())
    }

    /// Stores a directory entry `name/`.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        self.inner.add_directory(format!("{name}/"), self.options)?;
        log::debug!("  + {}/", name);
        Ok(())
    }

    /// Stores every regular file of `tree`, skipping names in `reserved`.
    ///
    /// Returns the number of files stored.
    pub fn add_tree(&mut self, tree: &SourceTree, reserved: &[&str]) -> Result<usize> {
        let mut added = 0;
        for entry in tree.files() {
            let entry = entry?;
            let name = entry.archive_name()?;
            if reserved.contains(&name.as_str()) {
                log::warn!(
                    "Skipping {} from {}: entry name is reserved",
                    name,
                    tree.root().display()
                );
                continue;
            }
            self.add_file(&entry)?;
            added += 1;
        }
        Ok(added)
    }

    /// Writes the central directory and flushes the file.
    pub fn finish(self) -> Result<PathBuf> {
        let mut writer = self.inner.finish()?;
        writer.flush().fs_context("flushing archive", &self.path)?;
        Ok(self.path)
    }
}

/// Packs `source_root` into an executable archive at `target`.
///
/// The manifest is stored first as `META-INF/MANIFEST.MF`; a file with that
/// name in the source tree is skipped. Overwrites `target`. On failure the
/// partially written file is left for the caller to discard.
pub fn pack_executable(target: &Path, source_root: &Path, manifest: &LaunchManifest) -> Result<usize> {
    let mut writer = ArchiveWriter::create(target)?;
    writer.add_bytes(MANIFEST_ENTRY_NAME, &manifest.to_bytes())?;
    let files = writer.add_tree(&SourceTree::new(source_root), &[MANIFEST_ENTRY_NAME])?;
    writer.finish()?;

    log::debug!(
        "Packed {} file(s) from {} into {}",
        files,
        source_root.display(),
        target.display()
    );
    Ok(files)
}

/// Zips every regular file under `source_root` into `target`.
///
/// Directories without children get a `name/` entry so they survive
/// extraction. Returns the number of files stored; directory entries are not
/// counted. Overwrites `target`. On failure the partially written file is
/// left for the caller to discard.
pub fn zip_directory(target: &Path, source_root: &Path) -> Result<usize> {
    let tree = SourceTree::new(source_root);
    let mut writer = ArchiveWriter::create(target)?;
    let files = writer.add_tree(&tree, &[])?;
    for dir in tree.empty_dirs()? {
        writer.add_directory(&archive_name(&dir)?)?;
    }
    writer.finish()?;

    log::debug!(
        "Zipped {} file(s) from {} into {}",
        files,
        source_root.display(),
        target.display()
    );
    Ok(files)
}
