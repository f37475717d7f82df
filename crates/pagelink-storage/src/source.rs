//! Page source format.
//!
//! Every page is a text file that starts with a delimited header of
//! `key: value` lines, followed by an opaque body:
//!
//! ```text
//! ---
//! title: Getting Started
//! next: /guide/install/
//! ---
//! Body text, passed through unchanged.
//! ```
//!
//! The header keeps its key order so that rewriting a page only touches the
//! fields that actually changed.

use std::sync::LazyLock;

use regex::Regex;

/// Line that opens and closes the header block.
pub const DELIMITER: &str = "---";

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+): (.*)$").unwrap());

/// Error returned when a page source can't be parsed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    /// First line is not the header delimiter.
    #[error("missing opening `---` delimiter")]
    MissingOpeningDelimiter,
    /// No line closes the header block.
    #[error("missing closing `---` delimiter")]
    MissingClosingDelimiter,
    /// A header line is not a `key: value` pair.
    #[error("line {line} is not a `key: value` pair: {content:?}")]
    InvalidLine {
        /// 1-based line number in the page source.
        line: usize,
        /// Offending line without its line ending.
        content: String,
    },
    /// Header has no `title` field.
    #[error("missing `title` field")]
    MissingTitle,
}

/// Ordered key/value header.
///
/// Updating an existing key keeps its position; new keys are appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, String)>,
}

impl Header {
    /// Create an empty header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, in place if present, appended otherwise.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate over entries in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the header has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Self::new();
        for (key, value) in iter {
            header.set(key, value);
        }
        header
    }
}

/// Parsed page source: header plus untouched body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSource {
    /// Header fields in file order.
    pub header: Header,
    /// Everything after the closing delimiter, byte for byte.
    pub body: String,
}

/// Strip a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

impl PageSource {
    /// Parse a page source.
    ///
    /// Repeated keys keep the position of their first occurrence and the
    /// value of the last one.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError`] if a delimiter is missing or a header line
    /// is not a `key: value` pair.
    pub fn parse(content: &str) -> Result<Self, HeaderError> {
        let mut lines = content.split_inclusive('\n');

        let mut consumed = match lines.next() {
            Some(first) if strip_line_ending(first) == DELIMITER => first.len(),
            _ => return Err(HeaderError::MissingOpeningDelimiter),
        };

        let mut header = Header::new();
        for (idx, raw) in lines.enumerate() {
            consumed += raw.len();
            let line = strip_line_ending(raw);
            if line == DELIMITER {
                return Ok(Self {
                    header,
                    body: content[consumed..].to_owned(),
                });
            }
            let Some(caps) = HEADER_LINE.captures(line) else {
                return Err(HeaderError::InvalidLine {
                    line: idx + 2,
                    content: line.to_owned(),
                });
            };
            header.set(&caps[1], &caps[2]);
        }

        Err(HeaderError::MissingClosingDelimiter)
    }

    /// Page title from the header.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::MissingTitle`] if the header has no `title`.
    pub fn title(&self) -> Result<&str, HeaderError> {
        self.header.get("title").ok_or(HeaderError::MissingTitle)
    }

    /// Render the page source back to text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 32 * (self.header.len() + 2));
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in self.header.iter() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}
