//! Page chain linking and table of contents rendering for pagelink.
//!
//! This crate provides:
//! - [`Linker`]: walks the authored `next` chain through a [`Storage`] backend,
//!   derives `prev`/`up` relations and rewrites every page header
//! - [`Chain`]: the linked pages with index-based relations
//! - [`render_toc`]: nested list markup for the page hierarchy
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use pagelink_site::{Linker, LinkerConfig, RunMode};
//! use pagelink_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let linker = Linker::new(storage, LinkerConfig::default());
//!
//! let summary = linker.run(RunMode::Write, |_| {})?;
//! println!("{} pages linked", summary.pages);
//! # Ok(())
//! # }
//! ```
//!
//! [`Storage`]: pagelink_storage::Storage

mod chain;
mod error;
mod linker;
mod page;
mod toc;
mod url;

pub use chain::Chain;
pub use error::LinkError;
pub use linker::{Linker, LinkerConfig, PersistOutcome, RunMode, RunSummary, Stage};
pub use page::Page;
pub use toc::{TocEntry, escape_html, render_toc};
pub use url::level;
