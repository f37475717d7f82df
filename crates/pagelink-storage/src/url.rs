//! Page URL normalization shared by storage backends and the linker.
//!
//! Two URLs name the same page when their normalized segments match, so
//! `/guide`, `/guide/` and `//guide/./` are interchangeable.

/// Normalized path segments of a URL.
///
/// Empty and `.` segments are dropped. `..` removes the previous segment
/// and stays at the root when there is none.
#[must_use]
pub fn url_segments(url: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in url.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments
}

/// Canonical key for a URL (`/` for the root, `/a/b` otherwise).
#[must_use]
pub fn url_key(url: &str) -> String {
    format!("/{}", url_segments(url).join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_ignores_empty_and_dot() {
        assert_eq!(url_segments("/a//b/./c/"), vec!["a", "b", "c"]);
        assert!(url_segments("/").is_empty());
    }

    #[test]
    fn test_segments_resolves_parent() {
        assert_eq!(url_segments("/a/b/../c"), vec!["a", "c"]);
        assert!(url_segments("/../..").is_empty());
    }

    #[test]
    fn test_url_key() {
        assert_eq!(url_key("/guide/"), "/guide");
        assert_eq!(url_key("/guide"), "/guide");
        assert_eq!(url_key("//guide/./"), "/guide");
        assert_eq!(url_key("/"), "/");
        assert_eq!(url_key(""), "/");
    }
}
