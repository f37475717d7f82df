//! Configuration management for pagelink.
//!
//! Parses `pagelink.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `toc.path`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override documentation root directory.
    pub source_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagelink.toml";

const DEFAULT_PAGE_FILENAME: &str = "index.md";
const DEFAULT_ROOT_URL: &str = "/";
const DEFAULT_TOC_PATH: &str = "_includes/toc.html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Table of contents configuration.
    toc: TocConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved table of contents configuration (set after loading).
    #[serde(skip)]
    pub toc_resolved: TocConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    page_filename: Option<String>,
    root_url: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Documentation root directory.
    pub source_dir: PathBuf,
    /// Filename of each page inside its directory.
    pub page_filename: String,
    /// URL of the first page in the chain.
    pub root_url: String,
}

/// Raw table of contents configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TocConfigRaw {
    path: Option<String>,
}

/// Resolved table of contents configuration.
#[derive(Debug, Default)]
pub struct TocConfig {
    /// Output path relative to the documentation root.
    pub path: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pagelink.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            toc: TocConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.to_path_buf(),
                page_filename: DEFAULT_PAGE_FILENAME.to_owned(),
                root_url: DEFAULT_ROOT_URL.to_owned(),
            },
            toc_resolved: TocConfig {
                path: DEFAULT_TOC_PATH.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_toc()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;

        require_non_empty(&docs.page_filename, "docs.page_filename")?;
        if docs.page_filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.page_filename must be a file name, not a path".to_owned(),
            ));
        }

        if !docs.root_url.starts_with('/') {
            return Err(ConfigError::Validation(
                "docs.root_url must start with /".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate table of contents configuration.
    fn validate_toc(&self) -> Result<(), ConfigError> {
        let path = &self.toc_resolved.path;
        require_non_empty(path, "toc.path")?;

        let is_relative = Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_relative {
            return Err(ConfigError::Validation(
                "toc.path must be relative to docs.source_dir without `..`".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref path) = self.toc.path {
            self.toc.path = Some(expand::expand_env(path, "toc.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = match self.docs.source_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => config_dir.to_path_buf(),
        };

        self.docs_resolved = DocsConfig {
            source_dir,
            page_filename: self
                .docs
                .page_filename
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_FILENAME.to_owned()),
            root_url: self
                .docs
                .root_url
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_URL.to_owned()),
        };

        self.toc_resolved = TocConfig {
            path: self
                .toc
                .path
                .clone()
                .unwrap_or_else(|| DEFAULT_TOC_PATH.to_owned()),
        };
    }
}
