//! Configuration management for Makor.
//!
//! Settings come from three layers, lowest priority first: built-in
//! defaults, an optional `makor.toml` next to the catalog (or passed with
//! `--config`), and `MAKOR_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default catalog filename inside the data directory.
pub const DEFAULT_CATALOG_FILENAME: &str = "catalog.json";

/// Config filename looked up next to the data directory.
const CONFIG_FILENAME: &str = "makor.toml";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Catalog filename inside the data directory.
    pub catalog_filename: String,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/Documents/makor/ for user data
        // Falls back gracefully: Documents dir -> Home dir -> Current dir
        let data_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("makor");

        Self {
            data_dir,
            catalog_filename: DEFAULT_CATALOG_FILENAME.to_string(),
            user_agent: format!("Makor/{} (source catalog)", env!("CARGO_PKG_VERSION")),
            request_timeout: 30,
        }
    }
}

impl Settings {
    /// Create settings rooted at a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Full path to the catalog file.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Build the HTTP client used for platform sync requests.
    ///
    /// Timeout and cancellation live here; the importer itself issues one
    /// request and has no retry or backpressure of its own.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(Duration::from_secs(self.request_timeout))
            .gzip(true)
            .brotli(true)
            .build()
    }
}

/// Configuration file structure (`makor.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Catalog filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
}

impl Config {
    /// Load configuration from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = PathBuf::from(data_dir);
        }
        if let Some(ref catalog) = self.catalog {
            settings.catalog_filename = catalog.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data directory override (`--data` flag).
    pub data: Option<PathBuf>,
}

/// Look for a config file in the working directory, then the data dir.
fn find_config(data_dir: &Path) -> Option<PathBuf> {
    let cwd_config = PathBuf::from(CONFIG_FILENAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    let data_config = data_dir.join(CONFIG_FILENAME);
    if data_config.exists() {
        return Some(data_config);
    }
    None
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Load settings: defaults, then config file, then env, then CLI flags.
pub fn load_settings(options: &LoadOptions) -> Settings {
    let mut settings = Settings::default();

    let config_path = options
        .config_path
        .clone()
        .or_else(|| find_config(&settings.data_dir));
    if let Some(path) = config_path {
        match Config::load_from_path(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config.apply_to_settings(&mut settings);
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }

    if let Some(data_dir) = env_var("MAKOR_DATA_DIR") {
        settings.data_dir = PathBuf::from(data_dir);
    }
    if let Some(catalog) = env_var("MAKOR_CATALOG") {
        settings.catalog_filename = catalog;
    }
    if let Some(user_agent) = env_var("MAKOR_USER_AGENT") {
        settings.user_agent = user_agent;
    }
    if let Some(timeout) = env_var("MAKOR_REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
        settings.request_timeout = timeout;
    }

    // --data override takes precedence over everything
    if let Some(ref data) = options.data {
        settings.data_dir = data.clone();
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_path_joins_data_dir() {
        let settings = Settings::with_data_dir(PathBuf::from("/tmp/makor-test"));
        assert_eq!(
            settings.catalog_path(),
            PathBuf::from("/tmp/makor-test/catalog.json")
        );
    }

    #[test]
    fn test_config_applies_only_present_fields() {
        let config: Config = toml::from_str(r#"user_agent = "test-agent""#).unwrap();
        let mut settings = Settings::with_data_dir(PathBuf::from("/tmp/x"));
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.user_agent, "test-agent");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(settings.request_timeout, 30);
    }

    #[test]
    fn test_data_flag_wins() {
        let options = LoadOptions {
            config_path: None,
            data: Some(PathBuf::from("/tmp/override")),
        };
        let settings = load_settings(&options);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/override"));
    }
}
