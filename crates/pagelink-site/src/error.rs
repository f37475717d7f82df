//! Linking error types.

use pagelink_storage::{HeaderError, StorageError};

/// Error returned when the page chain can't be loaded, linked or saved.
///
/// Every variant is fatal to a run and names the page (or file) at fault.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// A URL in the chain has no backing page.
    #[error("Page not found: {url}{}", linked_from(.from.as_deref()))]
    NotFound {
        /// URL that failed to resolve.
        url: String,
        /// Page whose `next` field referenced the URL (`None` for the root).
        from: Option<String>,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
    /// A page header can't be parsed.
    #[error("Malformed header in {url}: {source}")]
    MalformedHeader {
        /// Page with the bad header.
        url: String,
        /// Parse failure.
        #[source]
        source: HeaderError,
    },
    /// The `next` chain visits a page twice.
    #[error("Cycle in next chain: {url} is reached again from {from}")]
    Cycle {
        /// Page reached a second time.
        url: String,
        /// Page whose `next` field closes the cycle.
        from: String,
    },
    /// A page's structural parent is not part of the chain.
    #[error("Parent page {parent} of {url} is not in the next chain")]
    DanglingParent {
        /// Page without a parent.
        url: String,
        /// Expected parent URL.
        parent: String,
    },
    /// Writing a page or the table of contents failed.
    #[error("Failed to write {target}: {source}")]
    Persistence {
        /// Page URL or file path being written.
        target: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
    /// Reading from storage failed for a reason other than a missing page.
    #[error("Failed to read {target}: {source}")]
    Storage {
        /// Page URL or file path being read.
        target: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}

fn linked_from(from: Option<&str>) -> String {
    from.map(|from| format!(" (linked from {from})"))
        .unwrap_or_default()
}
