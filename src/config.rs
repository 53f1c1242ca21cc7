//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::filters::FilterState;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Products per page when listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet window before a search-text change is applied, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Default listing filters
    #[serde(default)]
    pub filters: FilterState,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    20
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            format: OutputFormat::Table,
            filters: FilterState::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("tiyara.toml");
        if local_config.exists() {
            debug!("Found tiyara.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("tiyara").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("TIYARA_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }

        if let Ok(timeout) = std::env::var("TIYARA_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(size) = std::env::var("TIYARA_PAGE_SIZE") {
            if let Ok(s) = size.parse::<usize>() {
                if s > 0 {
                    self.page_size = s;
                }
            }
        }

        self
    }

    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.filters.is_empty());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            api_url = "https://api.tiyara.example"
            page_size = 12
            format = "json"

            [filters]
            search = "kurta"
            min_price = 500.0
            brands = ["Biba", "W"]
            min_discount = 20.0
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api_url, "https://api.tiyara.example");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.filters.search, "kurta");
        assert_eq!(config.filters.min_price, Some(500.0));
        assert!(config.filters.brands.contains("Biba"));
        assert_eq!(config.filters.min_discount, Some(20.0));
        assert!(config.filters.max_price.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            api_url = "http://10.0.0.5:8000"
            debounce_ms = 150
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:8000");
        assert_eq!(config.debounce(), std::time::Duration::from_millis(150));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let err = Config::from_file("/nonexistent/tiyara.toml").unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "page_size = [[[").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 8").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.page_size, 8);
    }

    #[test]
    fn test_config_with_env() {
        let orig_url = std::env::var("TIYARA_API_URL").ok();
        let orig_timeout = std::env::var("TIYARA_TIMEOUT").ok();
        let orig_size = std::env::var("TIYARA_PAGE_SIZE").ok();

        std::env::set_var("TIYARA_API_URL", "http://backend:9000");
        std::env::set_var("TIYARA_TIMEOUT", "not_a_number");
        std::env::set_var("TIYARA_PAGE_SIZE", "0");

        let config = Config::new().with_env();
        assert_eq!(config.api_url, "http://backend:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 20);

        for (key, value) in [
            ("TIYARA_API_URL", orig_url),
            ("TIYARA_TIMEOUT", orig_timeout),
            ("TIYARA_PAGE_SIZE", orig_size),
        ] {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
