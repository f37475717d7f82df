//! Page URL helpers.
//!
//! Page URLs are absolute, slash-separated paths (`/`, `/guide/`,
//! `/guide/install`). Lookups go through [`url_key`], so `/guide` and
//! `/guide/` are interchangeable.

use pagelink_storage::url_segments;

pub(crate) use pagelink_storage::url_key;

/// Canonical key of the structural parent (`url` joined with `..`).
///
/// Returns `None` for the root page.
pub(crate) fn parent_key(url: &str) -> Option<String> {
    let segments = url_segments(url);
    let (_, parent) = segments.split_last()?;
    Some(format!("/{}", parent.join("/")))
}

/// Nesting level of `url` below the chain root `root` (the root is 1).
///
/// Counts normalized segments, so `/a/./b/` and `/a/b/` share a level.
///
/// # Examples
///
/// ```
/// use pagelink_site::level;
///
/// assert_eq!(level("/", "/"), 1);
/// assert_eq!(level("/guide/install", "/"), 3);
/// assert_eq!(level("/docs/", "/docs/"), 1);
/// assert_eq!(level("/docs/intro/", "/docs/"), 2);
/// ```
#[must_use]
pub fn level(url: &str, root: &str) -> usize {
    url_segments(url)
        .len()
        .saturating_sub(url_segments(root).len())
        + 1
}
