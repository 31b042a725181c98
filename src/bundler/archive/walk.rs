//! Regular-file enumeration under a root directory.

use crate::bundler::{Error, Result, error::ErrorExt};
use std::path::{Component, Path, PathBuf};

/// A directory whose regular files are about to be archived.
///
/// [`SourceTree::files`] can be called any number of times; each call starts a
/// fresh traversal.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
}

/// One regular file found under a [`SourceTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path on disk.
    pub absolute: PathBuf,
    /// Path relative to the tree root.
    pub relative: PathBuf,
}

impl TreeEntry {
    /// Archive entry name: the relative path joined with forward slashes.
    ///
    /// # Errors
    ///
    /// Fails for paths that are not valid UTF-8.
    pub fn archive_name(&self) -> Result<String> {
        archive_name(&self.relative)
    }
}

impl SourceTree {
    /// Creates a tree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walks the tree depth-first, yielding every regular file.
    ///
    /// Siblings are visited in file-name order so repeated walks over the same
    /// tree yield the same sequence. Directories are not yielded. Symbolic
    /// links are yielded when they point at a regular file and are never
    /// descended into.
    pub fn files(&self) -> TreeFiles {
        TreeFiles {
            root: self.root.clone(),
            inner: walkdir::WalkDir::new(&self.root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
        }
    }

    /// Relative paths of the directories below the root that have no
    /// children at all, in walk order.
    ///
    /// Symbolic links to directories are not counted as directories.
    pub fn empty_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut empty = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let mut children =
                std::fs::read_dir(entry.path()).fs_context("reading directory", entry.path())?;
            if children.next().is_none() {
                empty.push(entry.path().strip_prefix(&self.root)?.to_path_buf());
            }
        }
        Ok(empty)
    }
}

/// Iterator returned by [`SourceTree::files`].
pub struct TreeFiles {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Iterator for TreeFiles {
    type Item = Result<TreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(Error::Walkdir(e))),
            };

            let file_type = entry.file_type();
            let is_file = file_type.is_file()
                || (file_type.is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(rel) => rel.to_path_buf(),
                Err(e) => return Some(Err(Error::StripPrefix(e))),
            };
            return Some(Ok(TreeEntry {
                absolute: entry.into_path(),
                relative,
            }));
        }
    }
}

/// Joins the components of a relative path with `/`.
///
/// Host separators never leak into archive entry names.
pub fn archive_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                Error::GenericError(format!(
                    "path is not valid UTF-8: {}",
                    relative.display()
                ))
            })?),
            Component::CurDir => {}
            other => {
                return Err(Error::GenericError(format!(
                    "unexpected path component {other:?} in {}",
                    relative.display()
                )));
            }
        }
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel.as_bytes()).unwrap();
    }

    #[test]
    fn yields_only_files_with_forward_slash_names() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "com/example/App.class");
        touch(dir.path(), "com/example/util/Helper.class");
        touch(dir.path(), "application.properties");
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

        let names: Vec<String> = SourceTree::new(dir.path())
            .files()
            .map(|e| e.unwrap().archive_name().unwrap())
            .collect();

        assert_eq!(
            names,
            vec![
                "application.properties",
                "com/example/App.class",
                "com/example/util/Helper.class",
            ]
        );
    }

    #[test]
    fn empty_dirs_lists_only_childless_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app.jar");
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::create_dir_all(dir.path().join("outer/inner")).unwrap();

        let empty = SourceTree::new(dir.path()).empty_dirs().unwrap();

        assert_eq!(empty, vec![PathBuf::from("lib"), PathBuf::from("outer/inner")]);
    }

    #[test]
    fn walks_are_restartable() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.txt");
        touch(dir.path(), "a/c.txt");

        let tree = SourceTree::new(dir.path());
        let first: Vec<_> = tree.files().map(|e| e.unwrap()).collect();
        let second: Vec<_> = tree.files().map(|e| e.unwrap()).collect();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert!(first[0].absolute.starts_with(dir.path()));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = SourceTree::new(dir.path().join("absent")).files();

        assert!(matches!(files.next(), Some(Err(Error::Walkdir(_)))));
    }

    #[test]
    fn archive_name_rejects_parent_components() {
        assert!(archive_name(Path::new("../escape.class")).is_err());
        assert_eq!(archive_name(Path::new("./a/b.class")).unwrap(), "a/b.class");
    }
}
