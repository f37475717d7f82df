//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for reading and rewriting pages,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # URL Convention
//!
//! Page parameters in Storage methods are **page URLs**, not file paths:
//! - `"/"` - root page
//! - `"/guide/"` - top-level page
//! - `"/guide/install/"` - nested page
//!
//! A trailing slash is optional, as are empty and `.` segments; see
//! [`url_key`](crate::url_key). Storage implementations handle the mapping
//! from URLs to their internal storage format.

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or URL.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Whether this error means the page does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for page retrieval and persistence.
///
/// # URLs
///
/// Page parameters are **page URLs** (`"/"`, `"/guide/"`). Implementations map
/// them to their own layout, e.g. a directory with an `index.md` file.
pub trait Storage: Send + Sync {
    /// Read the full source of the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if no page
    /// exists at the URL, or another kind if it can't be read.
    fn read(&self, url: &str) -> Result<String, StorageError>;

    /// Replace the full source of the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page can't be written.
    fn write(&self, url: &str, content: &str) -> Result<(), StorageError>;

    /// Read an auxiliary file (e.g. the table of contents).
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the storage root (e.g., `"_includes/toc.html"`)
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if the file
    /// doesn't exist, or another kind if it can't be read.
    fn read_file(&self, path: &str) -> Result<String, StorageError>;

    /// Write an auxiliary file (e.g. the table of contents).
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the storage root (e.g., `"_includes/toc.html"`)
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file can't be written.
    fn write_file(&self, path: &str, content: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.as_deref().is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_with_path() {
        let err = StorageError::new(StorageErrorKind::NotFound).with_path("/docs/guide/index.md");

        assert_eq!(err.path.as_deref(), Some(Path::new("/docs/guide/index.md")));
    }

    #[test]
    fn test_storage_error_with_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound).with_source(io_err);

        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("file not found"));
    }

    #[test]
    fn test_storage_error_not_found() {
        let err = StorageError::not_found("/guide/");

        assert!(err.is_not_found());
        assert_eq!(err.path.as_deref(), Some(Path::new("/guide/")));
    }

    #[test]
    fn test_storage_error_io_kinds() {
        let not_found = StorageError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            Some(PathBuf::from("/a")),
        );
        let denied = StorageError::io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            None,
        );
        let other = StorageError::io(std::io::Error::other("disk full"), None);

        assert_eq!(not_found.kind, StorageErrorKind::NotFound);
        assert_eq!(not_found.path.as_deref(), Some(Path::new("/a")));
        assert_eq!(denied.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(other.kind, StorageErrorKind::Other);
        assert!(!other.is_not_found());
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::InvalidPath);

        assert_eq!(err.to_string(), "Invalid path");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/docs/index.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: /docs/index.md)"
        );
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
