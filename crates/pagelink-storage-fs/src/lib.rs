//! Filesystem storage implementation for pagelink.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](pagelink_storage::Storage) trait. Every page lives in its own
//! directory, named after its URL, as a single file:
//!
//! | URL | File |
//! |---|---|
//! | `/` | `{source_dir}/index.md` |
//! | `/guide/` | `{source_dir}/guide/index.md` |
//! | `/guide/install/` | `{source_dir}/guide/install/index.md` |
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use pagelink_storage::Storage;
//! use pagelink_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let content = storage.read("/guide/")?;
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use pagelink_storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default page filename inside each page directory.
const DEFAULT_PAGE_FILENAME: &str = "index.md";

/// Filesystem storage implementation.
///
/// Maps page URLs to `{source_dir}/{url}/{page_filename}`.
#[derive(Debug)]
pub struct FsStorage {
    /// Documentation root directory.
    source_dir: PathBuf,
    /// Page filename (e.g., "index.md").
    page_filename: String,
}

impl FsStorage {
    /// Create a new filesystem storage using `index.md` page files.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Documentation root directory
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_page_filename(source_dir, DEFAULT_PAGE_FILENAME)
    }

    /// Create a new filesystem storage with a custom page filename.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Documentation root directory
    /// * `page_filename` - Filename of each page inside its directory
    #[must_use]
    pub fn with_page_filename(source_dir: PathBuf, page_filename: &str) -> Self {
        Self {
            source_dir,
            page_filename: page_filename.to_owned(),
        }
    }

    /// Documentation root directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve a page URL to the file holding its source.
    ///
    /// Rejects URLs with `..` segments so pages can't escape the source
    /// directory.
    fn page_path(&self, url: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.source_dir.clone();
        for segment in url.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if segment == ".." {
                return Err(StorageError::new(StorageErrorKind::InvalidPath)
                    .with_path(url)
                    .with_backend(BACKEND));
            }
            path.push(segment);
        }
        path.push(&self.page_filename);
        Ok(path)
    }

    /// Resolve a path relative to the source directory.
    ///
    /// Only plain relative paths are accepted.
    fn file_path(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(relative);
        let is_plain = !relative.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_plain {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(relative)
                .with_backend(BACKEND));
        }
        Ok(self.source_dir.join(rel))
    }
}

impl Storage for FsStorage {
    fn read(&self, url: &str) -> Result<String, StorageError> {
        let path = self.page_path(url)?;
        if !path.is_file() {
            return Err(StorageError::not_found(path).with_backend(BACKEND));
        }
        tracing::debug!(url, path = %path.display(), "Reading page");
        fs::read_to_string(&path).map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn write(&self, url: &str, content: &str) -> Result<(), StorageError> {
        let path = self.page_path(url)?;
        tracing::debug!(url, path = %path.display(), "Writing page");
        fs::write(&path, content).map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn read_file(&self, path: &str) -> Result<String, StorageError> {
        let full_path = self.file_path(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let full_path = self.file_path(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND)
            })?;
        }
        tracing::debug!(path = %full_path.display(), "Writing file");
        fs::write(&full_path, content)
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }
}
