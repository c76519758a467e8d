//! Configuration management for strapdoc.
//!
//! Parses `strapdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [html]
//! table_style = "responsive, compact"
//! initial_header_level = 2
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use strapdoc_renderer::RenderSettings;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override extra table classes.
    pub table_style: Option<String>,
    /// Override heading level of top-level section titles.
    pub initial_header_level: Option<u8>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "strapdoc.toml";

/// Highest heading level HTML provides.
const MAX_HEADER_LEVEL: u8 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML output configuration.
    pub html: HtmlConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Comma-separated classes added to every table.
    pub table_style: String,
    /// Heading level used for top-level section titles.
    pub initial_header_level: u8,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            table_style: String::new(),
            initial_header_level: 1,
        }
    }
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `strapdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is out of range.
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
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Render settings derived from the `[html]` section.
    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            table_style: self.html.table_style.clone(),
            initial_header_level: self.html.initial_header_level,
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.html.initial_header_level;
        if !(1..=MAX_HEADER_LEVEL).contains(&level) {
            return Err(ConfigError::Validation(format!(
                "html.initial_header_level must be between 1 and {MAX_HEADER_LEVEL}, got {level}"
            )));
        }

        for class in self.html.table_style.split(',').map(str::trim) {
            if class.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
                return Err(ConfigError::Validation(format!(
                    "html.table_style entry {class:?} is not a valid class name"
                )));
            }
        }

        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(table_style) = &settings.table_style {
            self.html.table_style.clone_from(table_style);
        }
        if let Some(level) = settings.initial_header_level {
            self.html.initial_header_level = level;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
