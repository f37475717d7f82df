//! Nested table of contents markup.
//!
//! Renders the chain as nested `<ul>`/`<li>` lists in a single forward pass,
//! tracking the current nesting depth instead of recursing over a tree:
//!
//! ```text
//! <ul>
//!   <li>
//!     <a href="/">Home</a>
//!     <ul>
//!       <li>
//!         <a href="/guide/">Guide</a>
//!       </li>
//!     </ul>
//!   </li>
//! </ul>
//! ```

/// Spaces per nesting level.
const INDENT: &str = "    ";

/// One table of contents item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TocEntry<'a> {
    /// Nesting level (root is 1).
    pub level: usize,
    /// Link target, written as-is.
    pub url: &'a str,
    /// Display title (unescaped).
    pub title: &'a str,
}

/// Escape text for embedding in HTML element content.
///
/// Only `&`, `<` and `>` are replaced; quotes are left as written.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Close the innermost open item and its list.
fn close_level(out: &mut String, depth: &mut usize) {
    *depth -= 1;
    push_line(out, *depth, "  </li>");
    push_line(out, *depth, "</ul>");
}

/// Render entries, in reading order, as nested list markup.
///
/// A deeper entry opens a new list inside the previous item; an entry at
/// the same or a shallower level closes lists until its level is reached
/// and starts a sibling item. Jumps of more than one level open one list
/// per level so the output stays balanced.
#[must_use]
pub fn render_toc(entries: &[TocEntry<'_>]) -> String {
    let mut out = String::new();
    let mut depth = 0;

    for entry in entries {
        if depth >= entry.level {
            while depth > entry.level {
                close_level(&mut out, &mut depth);
            }
            push_line(&mut out, depth.saturating_sub(1), "  </li><li>");
        } else {
            if entry.level > depth + 1 {
                tracing::warn!(
                    url = entry.url,
                    from = depth,
                    to = entry.level,
                    "Page is nested more than one level below the previous page"
                );
            }
            while depth < entry.level {
                push_line(&mut out, depth, "<ul>");
                push_line(&mut out, depth, "  <li>");
                depth += 1;
            }
        }
        push_line(
            &mut out,
            depth,
            &format!("<a href=\"{}\">{}</a>", entry.url, escape_html(entry.title)),
        );
    }

    while depth > 0 {
        close_level(&mut out, &mut depth);
    }

    out
}
