//! Doubly-linked page chain.
//!
//! Pages are stored in a flat `Vec<Page>` in reading order. Relations are
//! tracked by indices:
//! - `prev`/`next` are the neighbouring positions
//! - `up` is kept in a parent side table resolved through a URL index
//!
//! This keeps the chain free of cross references and gives O(1) lookups
//! by URL.

use std::collections::HashMap;

use crate::error::LinkError;
use crate::page::Page;
use crate::toc::{TocEntry, render_toc};
use crate::url::{level, parent_key, url_key};

/// Header relations maintained on every page, in the order they are written.
const RELATIONS: [&str; 3] = ["prev", "up", "next"];

/// Ordered page chain with derived `prev`, `up` and `next` relations.
#[derive(Debug)]
pub struct Chain {
    pages: Vec<Page>,
    parents: Vec<Option<usize>>,
    url_index: HashMap<String, usize>,
}

impl Chain {
    /// Link pages given in reading order, root first.
    ///
    /// Builds the URL index, resolves each non-root page's structural
    /// parent (its URL joined with `..`) and sets every page's level relative
    /// to the first page.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Cycle`] if two pages share a URL
    /// - [`LinkError::DanglingParent`] if a structural parent is missing
    pub fn from_pages(mut pages: Vec<Page>) -> Result<Self, LinkError> {
        let mut url_index = HashMap::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            if url_index.insert(url_key(&page.url), idx).is_some() {
                let from = idx.checked_sub(1).map_or_else(String::new, |i| pages[i].url.clone());
                return Err(LinkError::Cycle {
                    url: page.url.clone(),
                    from,
                });
            }
        }

        let mut parents = Vec::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            if idx == 0 {
                parents.push(None);
                continue;
            }
            // A non-root page reached through `next` always has a parent key;
            // only a second root URL would not, and that is caught above.
            let Some(parent) = parent_key(&page.url) else {
                parents.push(None);
                continue;
            };
            let Some(&parent_idx) = url_index.get(&parent) else {
                return Err(LinkError::DanglingParent {
                    url: page.url.clone(),
                    parent,
                });
            };
            parents.push(Some(parent_idx));
        }

        if let Some(root_url) = pages.first().map(|root| root.url.clone()) {
            for page in &mut pages {
                page.level = level(&page.url, &root_url);
            }
        }

        Ok(Self {
            pages,
            parents,
            url_index,
        })
    }

    /// Number of pages in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the chain has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages in reading order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get page by URL (trailing slash optional).
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.position(url).map(|i| &self.pages[i])
    }

    /// Position of the page with the given URL.
    #[must_use]
    pub fn position(&self, url: &str) -> Option<usize> {
        self.url_index.get(&url_key(url)).copied()
    }

    /// Previous page in reading order.
    #[must_use]
    pub fn prev(&self, idx: usize) -> Option<&Page> {
        idx.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// Next page in reading order.
    #[must_use]
    pub fn next(&self, idx: usize) -> Option<&Page> {
        if idx >= self.pages.len() {
            return None;
        }
        self.pages.get(idx + 1)
    }

    /// Structural parent page.
    #[must_use]
    pub fn up(&self, idx: usize) -> Option<&Page> {
        self.parents.get(idx).copied().flatten().map(|i| &self.pages[i])
    }

    fn related(&self, idx: usize, relation: &str) -> Option<&Page> {
        match relation {
            "prev" => self.prev(idx),
            "up" => self.up(idx),
            "next" => self.next(idx),
            _ => None,
        }
    }

    /// Rewrite the managed header fields of one page.
    ///
    /// For `prev`, `up` and `next`, in that order: when the relation exists,
    /// set `{rel}` to its URL and `{rel}_title` to its title; otherwise
    /// remove both keys. Existing keys are updated in place, new keys are
    /// appended, and unrelated keys keep their order.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn reconcile_header(&mut self, idx: usize) {
        let updates: Vec<(&str, Option<(String, String)>)> = RELATIONS
            .iter()
            .map(|&relation| {
                let target = self
                    .related(idx, relation)
                    .map(|page| (page.url.clone(), page.title().to_owned()));
                (relation, target)
            })
            .collect();

        let header = &mut self.pages[idx].header;
        for (relation, target) in updates {
            let title_key = format!("{relation}_title");
            match target {
                Some((url, title)) => {
                    header.set(relation, url);
                    header.set(title_key, title);
                }
                None => {
                    header.remove(relation);
                    header.remove(&title_key);
                }
            }
        }
    }

    /// Rewrite the managed header fields of every page.
    pub fn reconcile_all(&mut self) {
        for idx in 0..self.pages.len() {
            self.reconcile_header(idx);
        }
    }

    /// Table of contents entries in reading order.
    #[must_use]
    pub fn toc_entries(&self) -> Vec<TocEntry<'_>> {
        self.pages
            .iter()
            .map(|page| TocEntry {
                level: page.level,
                url: &page.url,
                title: page.title(),
            })
            .collect()
    }

    /// Render the nested table of contents markup.
    #[must_use]
    pub fn render_toc(&self) -> String {
        render_toc(&self.toc_entries())
    }
}

#[cfg(test)]
mod tests {
    use pagelink_storage::Header;
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(url: &str, header: &str) -> Page {
        Page::parse(url, format!("---\n{header}---\n")).unwrap()
    }

    /// `/` -> `/a/` -> `/a/b/` -> `/c/`
    fn sample_chain() -> Chain {
        Chain::from_pages(vec![
            page("/", "title: Home\nnext: /a/\n"),
            page("/a/", "title: A\nnext: /a/b/\n"),
            page("/a/b/", "title: A & B\nnext: /c/\n"),
            page("/c/", "title: C\n"),
        ])
        .unwrap()
    }

    fn keys(header: &Header) -> Vec<&str> {
        header.keys().collect()
    }

    #[test]
    fn test_from_pages_links_neighbours() {
        let chain = sample_chain();

        assert_eq!(chain.len(), 4);
        assert!(chain.prev(0).is_none());
        assert_eq!(chain.next(0).unwrap().url, "/a/");
        assert_eq!(chain.prev(3).unwrap().url, "/a/b/");
        assert!(chain.next(3).is_none());
        assert!(chain.next(10).is_none());
    }

    #[test]
    fn test_up_is_structural_parent() {
        let chain = sample_chain();

        assert!(chain.up(0).is_none());
        assert_eq!(chain.up(1).unwrap().url, "/");
        assert_eq!(chain.up(2).unwrap().url, "/a/");
        assert_eq!(chain.up(3).unwrap().url, "/");
    }

    #[test]
    fn test_up_ignores_trailing_slash_style() {
        let chain = Chain::from_pages(vec![
            page("/", "title: Home\nnext: /a\n"),
            page("/a", "title: A\nnext: /a/b/\n"),
            page("/a/b/", "title: B\n"),
        ])
        .unwrap();

        assert_eq!(chain.up(2).unwrap().url, "/a");
        assert_eq!(chain.get("/a/").unwrap().title(), "A");
        assert_eq!(chain.position("/a/b"), Some(2));
    }

    #[test]
    fn test_dangling_parent() {
        let err = Chain::from_pages(vec![
            page("/", "title: Home\nnext: /x/y/\n"),
            page("/x/y/", "title: Y\n"),
        ])
        .unwrap_err();

        match err {
            LinkError::DanglingParent { url, parent } => {
                assert_eq!(url, "/x/y/");
                assert_eq!(parent, "/x");
            }
            other => panic!("Expected DanglingParent, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_url_is_cycle() {
        let err = Chain::from_pages(vec![
            page("/", "title: Home\nnext: /a/\n"),
            page("/a/", "title: A\nnext: /a\n"),
            page("/a", "title: A\n"),
        ])
        .unwrap_err();

        assert!(
            matches!(&err, LinkError::Cycle { url, from } if url == "/a" && from == "/a/"),
            "Expected Cycle, got {err:?}"
        );
    }

    #[test]
    fn test_reconcile_header_appends_in_fixed_order() {
        let mut chain = sample_chain();

        chain.reconcile_header(2);

        let header = &chain.pages()[2].header;
        assert_eq!(
            keys(header),
            vec!["title", "next", "prev", "prev_title", "up", "up_title", "next_title"]
        );
        assert_eq!(header.get("prev"), Some("/a/"));
        assert_eq!(header.get("prev_title"), Some("A"));
        assert_eq!(header.get("up"), Some("/a/"));
        assert_eq!(header.get("up_title"), Some("A"));
        assert_eq!(header.get("next"), Some("/c/"));
        assert_eq!(header.get("next_title"), Some("C"));
    }

    #[test]
    fn test_reconcile_header_root_has_no_prev_or_up() {
        let mut chain = Chain::from_pages(vec![
            page("/", "title: Home\nprev: /stale/\nprev_title: Stale\nup: /\nnext: /a/\n"),
            page("/a/", "title: A\n"),
        ])
        .unwrap();

        chain.reconcile_header(0);

        let header = &chain.pages()[0].header;
        assert_eq!(keys(header), vec!["title", "next", "next_title"]);
        assert_eq!(header.get("next_title"), Some("A"));
    }

    #[test]
    fn test_reconcile_header_last_page_has_no_next() {
        let mut chain = Chain::from_pages(vec![
            page("/", "title: Home\nnext: /a/\n"),
            page("/a/", "title: A\nnext_title: Stale\nlayout: page\n"),
        ])
        .unwrap();

        chain.reconcile_header(1);

        let header = &chain.pages()[1].header;
        assert!(!header.contains_key("next"));
        assert!(!header.contains_key("next_title"));
        assert_eq!(
            keys(header),
            vec!["title", "layout", "prev", "prev_title", "up", "up_title"]
        );
    }

    #[test]
    fn test_reconcile_header_updates_in_place() {
        let mut chain = Chain::from_pages(vec![
            page("/", "title: Home\nnext: /a/\n"),
            page("/a/", "title: A\nup: /old/\nup_title: Old\nlayout: page\nprev: /old/\n"),
        ])
        .unwrap();

        chain.reconcile_header(1);

        let header = &chain.pages()[1].header;
        assert_eq!(
            keys(header),
            vec!["title", "up", "up_title", "layout", "prev", "prev_title"]
        );
        assert_eq!(header.get("up"), Some("/"));
        assert_eq!(header.get("up_title"), Some("Home"));
        assert_eq!(header.get("prev"), Some("/"));
    }

    #[test]
    fn test_reconcile_all_is_idempotent() {
        let mut chain = sample_chain();
        chain.reconcile_all();
        let first: Vec<String> = chain.pages().iter().map(Page::render).collect();

        chain.reconcile_all();
        let second: Vec<String> = chain.pages().iter().map(Page::render).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reconciled_headers_round_trip_relations() {
        let mut chain = sample_chain();
        chain.reconcile_all();

        for (idx, page) in chain.pages().iter().enumerate() {
            let header = &page.header;
            assert_eq!(header.get("prev"), chain.prev(idx).map(|p| p.url.as_str()));
            assert_eq!(header.get("up"), chain.up(idx).map(|p| p.url.as_str()));
            assert_eq!(header.get("next"), chain.next(idx).map(|p| p.url.as_str()));
        }
    }

    #[test]
    fn test_title_propagation() {
        let mut chain = Chain::from_pages(vec![
            page("/", "title: Home\nnext: /intro/\n"),
            page("/intro/", "title: Intro\n"),
        ])
        .unwrap();

        chain.reconcile_all();

        assert_eq!(chain.pages()[0].header.get("next_title"), Some("Intro"));
    }

    #[test]
    fn test_toc_entries() {
        let chain = sample_chain();

        let levels: Vec<usize> = chain.toc_entries().iter().map(|e| e.level).collect();

        assert_eq!(levels, vec![1, 2, 3, 2]);
        assert_eq!(chain.toc_entries()[2].title, "A & B");
    }

    #[test]
    fn test_levels_count_from_nested_root() {
        let chain = Chain::from_pages(vec![
            page("/docs/", "title: Docs\nnext: /docs/intro/\n"),
            page("/docs/intro/", "title: Intro\nnext: /docs/intro/setup/\n"),
            page("/docs/intro/setup/", "title: Setup\n"),
        ])
        .unwrap();

        let levels: Vec<usize> = chain.pages().iter().map(|p| p.level).collect();

        assert_eq!(levels, vec![1, 2, 3]);
    }
}
