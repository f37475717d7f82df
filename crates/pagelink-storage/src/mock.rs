//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};
use crate::url::url_key;

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores page sources and auxiliary files in memory, keyed by
/// [`url_key`] (`"/guide"`, `"/guide/"` and `"//guide/./"` are the same page).
/// Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use pagelink_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_page("/", "---\ntitle: Home\nnext: /guide/\n---\n")
///     .with_page("/guide/", "---\ntitle: Guide\n---\n");
///
/// let content = storage.read("/guide/").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: RwLock<HashMap<String, String>>,
    files: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<String>>,
    read_only: RwLock<bool>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an auxiliary file at the given path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: &str, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.to_owned(), content.into());
        self
    }

    /// Add a page source at the given URL.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, url: &str, content: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url_key(url), content.into());
        self
    }

    /// Make every write fail with [`StorageErrorKind::PermissionDenied`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn read_only(self) -> Self {
        *self.read_only.write().unwrap() = true;
        self
    }

    /// Current source of the page at `url`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn page(&self, url: &str) -> Option<String> {
        self.pages.read().unwrap().get(&url_key(url)).cloned()
    }

    /// Contents of an auxiliary file written with [`Storage::write_file`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// URLs and file paths written so far, in write order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.read().unwrap().clone()
    }

    fn check_writable(&self, target: &str) -> Result<(), StorageError> {
        if *self.read_only.read().unwrap() {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(target)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for MockStorage {
    fn read(&self, url: &str) -> Result<String, StorageError> {
        self.pages
            .read()
            .unwrap()
            .get(&url_key(url))
            .cloned()
            .ok_or_else(|| StorageError::not_found(url).with_backend(BACKEND))
    }

    fn write(&self, url: &str, content: &str) -> Result<(), StorageError> {
        self.check_writable(url)?;
        self.pages
            .write()
            .unwrap()
            .insert(url_key(url), content.to_owned());
        self.writes.write().unwrap().push(url.to_owned());
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), StorageError> {
        self.check_writable(path)?;
        self.files
            .write()
            .unwrap()
            .insert(path.to_owned(), content.to_owned());
        self.writes.write().unwrap().push(path.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_read_ignores_trailing_slash() {
        let storage = MockStorage::new().with_page("/guide/", "---\ntitle: Guide\n---\n");

        assert_eq!(storage.read("/guide").unwrap(), "---\ntitle: Guide\n---\n");
        assert!(storage.read("/other/").unwrap_err().is_not_found());
    }

    #[test]
    fn test_page_lookup_collapses_empty_and_dot_segments() {
        let storage = MockStorage::new().with_page("/guide/install/", "install");

        assert_eq!(storage.read("//guide/./install").unwrap(), "install");
        storage.write("/guide//install/", "updated").unwrap();
        assert_eq!(storage.page("/guide/install").as_deref(), Some("updated"));
    }

    #[test]
    fn test_read_missing_page() {
        let storage = MockStorage::new();

        let err = storage.read("/missing/").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_write_records_and_replaces() {
        let storage = MockStorage::new().with_page("/", "old");

        storage.write("/", "new").unwrap();
        storage.write_file("_includes/toc.html", "<ul>").unwrap();

        assert_eq!(storage.page("/").as_deref(), Some("new"));
        assert_eq!(storage.file("_includes/toc.html").as_deref(), Some("<ul>"));
        assert_eq!(storage.read_file("_includes/toc.html").unwrap(), "<ul>");
        assert!(storage.read_file("other.html").unwrap_err().is_not_found());
        assert_eq!(storage.writes(), vec!["/", "_includes/toc.html"]);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let storage = MockStorage::new().with_page("/", "old").read_only();

        let err = storage.write("/", "new").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert!(storage.write_file("toc.html", "").is_err());
        assert_eq!(storage.page("/").as_deref(), Some("old"));
        assert!(storage.writes().is_empty());
    }
}
