//! Colored terminal output for link runs.

use console::{Style, Term};
use pagelink_site::{RunMode, RunSummary, Stage};

/// Progress line shown before a stage starts.
pub(crate) fn stage_message(stage: Stage<'_>) -> String {
    match stage {
        Stage::Reading => "Reading pages...".to_owned(),
        Stage::Linking { pages } => format!("{pages} pages found. Fixing links..."),
        Stage::Saving => "Resaving...".to_owned(),
        Stage::GeneratingToc { path } => format!("Generating {path}..."),
    }
}

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }

    /// Print the progress line for a stage.
    pub(crate) fn stage(&self, stage: Stage<'_>) {
        self.line(None, &stage_message(stage));
    }

    /// Print the outcome of a run.
    ///
    /// In check mode every stale page is listed (yellow).
    pub(crate) fn summary(&self, summary: &RunSummary, mode: RunMode, toc_path: &str) {
        match mode {
            RunMode::Write => {
                self.line(
                    Some(&self.green),
                    &format!(
                        "Linked {} pages ({} updated)",
                        summary.pages,
                        summary.changed_pages.len()
                    ),
                );
            }
            RunMode::Check if summary.is_clean() => {
                self.line(
                    Some(&self.green),
                    &format!("All {} pages up to date", summary.pages),
                );
            }
            RunMode::Check => {
                for url in &summary.changed_pages {
                    self.line(Some(&self.yellow), &format!("  stale: {url}"));
                }
                if summary.toc_changed {
                    self.line(Some(&self.yellow), &format!("  stale: {toc_path}"));
                }
            }
        }
    }

    /// Print the documentation root being processed (cyan bold).
    pub(crate) fn source(&self, source: &str) {
        self.line(Some(&self.cyan_bold), &format!("Source: {source}"));
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.red), msg);
    }
}
