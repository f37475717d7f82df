//! Storage abstraction for the pagelink documentation linker.
//!
//! This crate provides a [`Storage`] trait for abstracting page reads and writes
//! from the underlying storage backend, and the page source format shared by
//! every backend:
//!
//! - [`Storage`] trait for pages (`read()`, `write()`) and auxiliary
//!   files (`read_file()`, `write_file()`)
//! - [`PageSource`] and [`Header`] for the `---` delimited key/value header
//! - [`url_key`] and [`url_segments`] for comparing page URLs
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use pagelink_storage::{PageSource, Storage};
//!
//! let content = storage.read("/guide/")?;
//! let source = PageSource::parse(&content)?;
//! println!("{}", source.header.get("title").unwrap_or_default());
//! ```

#[cfg(feature = "mock")]
mod mock;
mod source;
mod storage;
mod url;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use source::{DELIMITER, Header, HeaderError, PageSource};
pub use storage::{Storage, StorageError, StorageErrorKind};
pub use url::{url_key, url_segments};
