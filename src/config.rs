//! Configuration management for quatrains using the prefer crate.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::SearchOptions;
use crate::source::{CenturySource, FsSource, HttpSource};

/// Data directory beneath the site root.
pub const DEFAULT_DATA_SUBDIR: &str = "js/data";

/// Build output directory beneath the site root.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "_site";

/// Base URL used when neither config nor `URL` provide one.
pub const DEFAULT_BASE_URL: &str = "https://example.com";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "URL";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Site root holding `index.html`, `js/`, `images/` and `style.css`.
    pub site_dir: PathBuf,
    /// Directory of `century{N}.json` files.
    pub data_dir: PathBuf,
    /// Where the static site is written.
    pub output_dir: PathBuf,
    /// Prefix for image file names.
    pub image_base: String,
    /// Absolute base URL for canonical links.
    pub base_url: String,
    /// Read data from this deployed site instead of `data_dir`.
    pub remote_url: Option<String>,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    pub search: SearchOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_site_dir(PathBuf::from("."))
    }
}

impl Settings {
    /// Create settings rooted at a site directory.
    pub fn with_site_dir(site_dir: PathBuf) -> Self {
        Self {
            data_dir: site_dir.join(DEFAULT_DATA_SUBDIR),
            output_dir: site_dir.join(DEFAULT_OUTPUT_SUBDIR),
            site_dir,
            image_base: crate::viewer::DEFAULT_IMAGE_BASE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            remote_url: None,
            user_agent: crate::source::USER_AGENT.to_string(),
            request_timeout: 30,
            search: SearchOptions::default(),
        }
    }

    /// Century source for these settings: the remote site if one is set,
    /// otherwise the local data directory.
    pub fn source(&self) -> Result<Arc<dyn CenturySource>> {
        match self.remote_url {
            Some(ref url) => {
                let source = HttpSource::new(
                    url,
                    DEFAULT_DATA_SUBDIR,
                    Duration::from_secs(self.request_timeout),
                    Some(&self.user_agent),
                )?;
                Ok(Arc::new(source))
            }
            None => Ok(Arc::new(FsSource::new(&self.data_dir))),
        }
    }

    /// Local data source, ignoring any remote URL.
    pub fn local_source(&self) -> FsSource {
        FsSource::new(&self.data_dir)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Site root directory.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "site")]
    pub site_dir: Option<String>,
    /// Data directory (default: `{site_dir}/js/data`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Build output directory (default: `{site_dir}/_site`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    /// Image path prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base: Option<String>,
    /// Absolute base URL of the deployed site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Deployed site to read data from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Search settings.
    #[serde(default, skip_serializing_if = "SearchConfig::is_default")]
    #[prefer(default)]
    pub search: SearchConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

/// Search section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct SearchConfig {
    /// Fuzziness tolerance; 0.0 matches whole terms only, no typos or prefixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Maximum results shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Shortest query that runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_query_len: Option<usize>,
    /// Quiet period before a query runs, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

impl SearchConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, options: &mut SearchOptions) {
        if let Some(threshold) = self.threshold {
            options.threshold = threshold.clamp(0.0, 1.0);
        }
        if let Some(limit) = self.limit {
            options.limit = limit;
        }
        if let Some(len) = self.min_query_len {
            options.min_query_len = len;
        }
        if let Some(ms) = self.debounce_ms {
            options.debounce = Duration::from_millis(ms);
        }
    }
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers quatrains config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("quatrains").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> std::result::Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref site_dir) = self.site_dir {
            let resolved = self.resolve_path(site_dir, base_dir);
            *settings = Settings {
                search: settings.search.clone(),
                ..Settings::with_site_dir(resolved)
            };
        }
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref output_dir) = self.output_dir {
            settings.output_dir = self.resolve_path(output_dir, base_dir);
        }
        if let Some(ref image_base) = self.image_base {
            settings.image_base = image_base.clone();
        }
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(ref remote_url) = self.remote_url {
            settings.remote_url = Some(remote_url.clone());
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        self.search.apply(&mut settings.search);
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Site root (--site flag).
    pub site: Option<PathBuf>,
    /// Deployed site to read data from (--remote flag).
    pub remote: Option<String>,
}

/// Look for a config file in the site root.
fn find_config_in_site(site_dir: &Path) -> Option<PathBuf> {
    let extensions = ["json", "yaml", "yml", "toml"];

    for ext in extensions {
        let path = site_dir.join(format!("quatrains.{}", ext));
        if path.exists() {
            return Some(path);
        }
    }
    None
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

/// Load config from file sources.
async fn load_file_config(options: &LoadOptions, site_override: Option<&PathBuf>) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        };
    }

    // Priority 2: Config in the site root
    if let Some(site_dir) = site_override {
        if let Some(config_path) = find_config_in_site(site_dir) {
            tracing::debug!("Found config in site dir: {}", config_path.display());
            return Config::load_from_path(&config_path)
                .await
                .unwrap_or_default();
        }
    }

    // Priority 3: Auto-discover via prefer
    Config::load().await
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let site_override = options.site.as_deref().map(absolute);

    let config = load_file_config(&options, site_override.as_ref()).await;

    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let base_dir = if options.use_cwd {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        config
            .base_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    };

    config.apply_to_settings(&mut settings, &base_dir);

    // --site moves the whole site; explicit data/output dirs from config stay
    if let Some(site_dir) = site_override {
        let data_dir = config.data_dir.as_ref().map(|_| settings.data_dir.clone());
        let output_dir = config.output_dir.as_ref().map(|_| settings.output_dir.clone());
        settings.data_dir = data_dir.unwrap_or_else(|| site_dir.join(DEFAULT_DATA_SUBDIR));
        settings.output_dir = output_dir.unwrap_or_else(|| site_dir.join(DEFAULT_OUTPUT_SUBDIR));
        settings.site_dir = site_dir;
    }

    if let Some(remote) = options.remote {
        settings.remote_url = Some(remote);
    }

    // URL environment variable takes precedence over config
    if let Some(url) = std::env::var(BASE_URL_ENV).ok().filter(|s| !s.is_empty()) {
        tracing::debug!("Using {} from environment: {}", BASE_URL_ENV, url);
        settings.base_url = url;
    }

    (settings, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let settings = Settings::with_site_dir(PathBuf::from("/srv/site"));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/site/js/data"));
        assert_eq!(settings.output_dir, PathBuf::from("/srv/site/_site"));
        assert_eq!(settings.image_base, "images");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_apply_resolves_relative_paths() {
        let config = Config {
            site_dir: Some("site".into()),
            output_dir: Some("/tmp/out".into()),
            search: SearchConfig {
                threshold: Some(0.5),
                debounce_ms: Some(50),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc/quatrains"));

        assert_eq!(settings.site_dir, PathBuf::from("/etc/quatrains/site"));
        assert_eq!(settings.data_dir, PathBuf::from("/etc/quatrains/site/js/data"));
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.search.threshold, 0.5);
        assert_eq!(settings.search.debounce, Duration::from_millis(50));
        assert_eq!(settings.search.limit, 10);
    }

    #[tokio::test]
    async fn test_load_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("quatrains.toml");
        std::fs::write(
            &toml_path,
            "base_url = \"https://quatrains.test\"\n[search]\nlimit = 5\n",
        )
        .unwrap();
        let config = Config::load_from_path(&toml_path).await.unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://quatrains.test"));
        assert_eq!(config.search.limit, Some(5));
        assert_eq!(config.base_dir().as_deref(), Some(dir.path()));

        let yaml_path = dir.path().join("quatrains.yaml");
        std::fs::write(&yaml_path, "image_base: media\n").unwrap();
        let config = Config::load_from_path(&yaml_path).await.unwrap();
        assert_eq!(config.image_base.as_deref(), Some("media"));

        let bad = dir.path().join("quatrains.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(Config::load_from_path(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_site_flag_finds_config_in_site() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("quatrains.json"),
            r#"{"image_base": "pics", "output_dir": "public"}"#,
        )
        .unwrap();

        let (settings, config) = load_settings_with_options(LoadOptions {
            site: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await;

        assert!(config.source_path.is_some());
        assert_eq!(settings.image_base, "pics");
        assert_eq!(settings.site_dir, dir.path());
        assert_eq!(settings.data_dir, dir.path().join("js/data"));
        assert_eq!(settings.output_dir, dir.path().join("public"));
    }

    #[test]
    fn test_source_selection() {
        let mut settings = Settings::with_site_dir(PathBuf::from("/srv/site"));
        assert!(settings.source().unwrap().describe().contains("/srv/site/js/data"));

        settings.remote_url = Some("https://quatrains.test".into());
        assert!(settings
            .source()
            .unwrap()
            .describe()
            .contains("https://quatrains.test/js/data/"));
    }
}
