//! Storage-backed chain loading and persistence.
//!
//! [`Linker`] walks the `next` chain from the root page, links it into a
//! [`Chain`], rewrites every page header and regenerates the table of
//! contents. Stages can be driven one by one or through [`Linker::run`].

use std::collections::HashSet;
use std::sync::Arc;

use pagelink_storage::Storage;

use crate::chain::Chain;
use crate::error::LinkError;
use crate::page::Page;
use crate::url::url_key;

/// Configuration for [`Linker`].
#[derive(Clone, Debug)]
pub struct LinkerConfig {
    /// URL of the first page in the chain.
    pub root_url: String,
    /// Table of contents path, relative to the storage root.
    pub toc_path: String,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            root_url: "/".to_owned(),
            toc_path: "_includes/toc.html".to_owned(),
        }
    }
}

/// Whether a run writes its results or only reports them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Rewrite stale pages and the table of contents.
    Write,
    /// Report stale pages and table of contents without writing.
    Check,
}

/// Run stage, reported before each stage starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage<'a> {
    /// Walking the `next` chain.
    Reading,
    /// Chain loaded, deriving relations.
    Linking {
        /// Number of pages found.
        pages: usize,
    },
    /// Rewriting page headers.
    Saving,
    /// Rendering the table of contents.
    GeneratingToc {
        /// Output path.
        path: &'a str,
    },
}

/// Result of persisting a single page or file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Content changed and was written (or would be, in check mode).
    Written,
    /// Content already up to date.
    Unchanged,
}

/// Summary of a full run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of pages in the chain.
    pub pages: usize,
    /// URLs of pages whose header changed.
    pub changed_pages: Vec<String>,
    /// Whether the table of contents changed.
    pub toc_changed: bool,
}

impl RunSummary {
    /// Whether nothing needed rewriting.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.changed_pages.is_empty() && !self.toc_changed
    }
}

/// Loads, links and persists the page chain through a [`Storage`] backend.
pub struct Linker {
    storage: Arc<dyn Storage>,
    config: LinkerConfig,
}

impl Linker {
    /// Create a new linker over a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: LinkerConfig) -> Self {
        Self { storage, config }
    }

    /// Linker configuration.
    #[must_use]
    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Load and parse the page at `url`.
    ///
    /// `from` names the page that linked here, for diagnostics.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] if no page exists at `url`
    /// - [`LinkError::MalformedHeader`] if the header can't be parsed or has no title
    /// - [`LinkError::Storage`] for other read failures
    pub fn load(&self, url: &str, from: Option<&str>) -> Result<Page, LinkError> {
        let content = self.storage.read(url).map_err(|source| {
            if source.is_not_found() {
                LinkError::NotFound {
                    url: url.to_owned(),
                    from: from.map(ToOwned::to_owned),
                    source,
                }
            } else {
                LinkError::Storage {
                    target: url.to_owned(),
                    source,
                }
            }
        })?;

        Page::parse(url, content).map_err(|source| LinkError::MalformedHeader {
            url: url.to_owned(),
            source,
        })
    }

    /// Walk the `next` chain from the root page and link it.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Cycle`] if a page is reached twice
    /// - any error from [`Linker::load`] or [`Chain::from_pages`]
    pub fn build_chain(&self) -> Result<Chain, LinkError> {
        let root = self.load(&self.config.root_url, None)?;
        let mut visited = HashSet::from([url_key(&root.url)]);
        let mut pages = vec![root];

        while let Some(next_url) = pages.last().and_then(Page::next_url) {
            let next_url = next_url.to_owned();
            let from = pages.last().map(|p| p.url.clone()).unwrap_or_default();
            if !visited.insert(url_key(&next_url)) {
                return Err(LinkError::Cycle {
                    url: next_url,
                    from,
                });
            }
            let page = self.load(&next_url, Some(&from))?;
            tracing::debug!(url = %page.url, title = page.title(), "Loaded page");
            pages.push(page);
        }

        tracing::info!(pages = pages.len(), "Loaded page chain");
        Chain::from_pages(pages)
    }

    /// Write a page back to storage if its source changed.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] if the write fails.
    pub fn persist(&self, page: &Page) -> Result<PersistOutcome, LinkError> {
        if !page.is_modified() {
            tracing::debug!(url = %page.url, "Page unchanged");
            return Ok(PersistOutcome::Unchanged);
        }
        self.storage
            .write(&page.url, &page.render())
            .map_err(|source| LinkError::Persistence {
                target: page.url.clone(),
                source,
            })?;
        tracing::info!(url = %page.url, "Updated page");
        Ok(PersistOutcome::Written)
    }

    /// Render the table of contents and write it if it changed.
    ///
    /// In [`RunMode::Check`] nothing is written.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Storage`] if the existing file can't be read
    /// - [`LinkError::Persistence`] if the write fails
    pub fn write_toc(&self, chain: &Chain, mode: RunMode) -> Result<PersistOutcome, LinkError> {
        let path = &self.config.toc_path;
        let toc = chain.render_toc();

        let current = match self.storage.read_file(path) {
            Ok(content) => Some(content),
            Err(e) if e.is_not_found() => None,
            Err(source) => {
                return Err(LinkError::Storage {
                    target: path.clone(),
                    source,
                });
            }
        };
        if current.as_deref() == Some(toc.as_str()) {
            return Ok(PersistOutcome::Unchanged);
        }

        if mode == RunMode::Write {
            self.storage
                .write_file(path, &toc)
                .map_err(|source| LinkError::Persistence {
                    target: path.clone(),
                    source,
                })?;
            tracing::info!(path = %path, "Updated table of contents");
        }
        Ok(PersistOutcome::Written)
    }

    /// Run every stage: load, link, rewrite headers, regenerate the table of contents.
    ///
    /// `on_stage` is called before each stage starts.
    ///
    /// # Errors
    ///
    /// Returns the first [`LinkError`] encountered; earlier writes are kept.
    pub fn run(
        &self,
        mode: RunMode,
        mut on_stage: impl FnMut(Stage<'_>),
    ) -> Result<RunSummary, LinkError> {
        on_stage(Stage::Reading);
        let mut chain = self.build_chain()?;

        on_stage(Stage::Linking { pages: chain.len() });
        chain.reconcile_all();

        on_stage(Stage::Saving);
        let mut changed_pages = Vec::new();
        for page in chain.pages() {
            let changed = match mode {
                RunMode::Write => self.persist(page)? == PersistOutcome::Written,
                RunMode::Check => page.is_modified(),
            };
            if changed {
                changed_pages.push(page.url.clone());
            }
        }

        on_stage(Stage::GeneratingToc {
            path: &self.config.toc_path,
        });
        let toc_changed = self.write_toc(&chain, mode)? == PersistOutcome::Written;

        Ok(RunSummary {
            pages: chain.len(),
            changed_pages,
            toc_changed,
        })
    }
}
