//! Documentation page loaded from storage.

use pagelink_storage::{Header, HeaderError, PageSource};

use crate::url::level;

/// A documentation page: URL, ordered header and untouched body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// URL as authored in the `next` field that led here (`/` for the root).
    pub url: String,
    /// Nesting depth derived from the URL, counted from `/` until the page is
    /// linked into a [`Chain`](crate::Chain), then from the chain root (root is 1).
    pub level: usize,
    /// Header fields in file order.
    pub header: Header,
    /// Body after the header, passed through unchanged.
    pub body: String,
    /// Source as it was read, to detect pages that need no rewrite.
    original: String,
}

impl Page {
    /// Parse a page from its source text.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError`] if the header is malformed or has no `title`.
    pub fn parse(url: impl Into<String>, content: impl Into<String>) -> Result<Self, HeaderError> {
        let url = url.into();
        let original = content.into();
        let source = PageSource::parse(&original)?;
        source.title()?;

        Ok(Self {
            level: level(&url, "/"),
            url,
            header: source.header,
            body: source.body,
            original,
        })
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.header.get("title").unwrap_or_default()
    }

    /// URL of the next page in reading order, as authored.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.header.get("next")
    }

    /// Render the page back to source text.
    #[must_use]
    pub fn render(&self) -> String {
        PageSource {
            header: self.header.clone(),
            body: self.body.clone(),
        }
        .render()
    }

    /// Whether the rendered source differs from what was read.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.render() != self.original
    }
}
