//! pagelink CLI - documentation page linker.
//!
//! Walks the `next` chain starting at the root page, rewrites `prev`/`up`
//! header fields on every page and regenerates the table of contents.

mod error;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pagelink_config::{CliSettings, Config};
use pagelink_site::{Linker, LinkerConfig, RunMode};
use pagelink_storage::Storage;
use pagelink_storage_fs::FsStorage;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// pagelink - link documentation pages and build the table of contents.
#[derive(Parser)]
#[command(name = "pagelink", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover pagelink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation root directory (overrides config).
    #[arg(short, long, env = "PAGELINK_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Report stale pages without writing; exits non-zero if any.
    #[arg(long)]
    check: bool,

    /// Enable verbose output (shows link diagnostics).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        output.source(&docs.source_dir.display().to_string());

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_page_filename(
            docs.source_dir.clone(),
            &docs.page_filename,
        ));
        let linker = Linker::new(
            storage,
            LinkerConfig {
                root_url: docs.root_url.clone(),
                toc_path: config.toc_resolved.path.clone(),
            },
        );

        let mode = if self.check {
            RunMode::Check
        } else {
            RunMode::Write
        };
        let summary = linker.run(mode, |stage| output.stage(stage))?;
        output.summary(&summary, mode, &config.toc_resolved.path);

        if mode == RunMode::Check && !summary.is_clean() {
            let mut stale = summary.changed_pages.len();
            if summary.toc_changed {
                stale += 1;
            }
            let noun = if stale == 1 { "file" } else { "files" };
            return Err(CliError::Stale(format!("{stale} {noun}")));
        }

        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
