use crate::catalog::DEFAULT_CATALOG;
use crate::error::Result;
use crate::fetcher::DEFAULT_FETCH_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How catalog pages are turned into markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Drive a real browser through WebDriver so page scripts run
    WebDriver,
    /// Plain HTTP GET, no script execution
    Http,
}

/// Configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Pages to scan for artifacts
    #[serde(default = "default_catalog")]
    pub catalog: Vec<String>,

    /// Where PDF documents are saved
    #[serde(default = "default_document_dir")]
    pub document_dir: PathBuf,

    /// Where ZIP archives are saved
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,

    /// Page renderer to use
    #[serde(default = "default_renderer")]
    pub renderer: RendererKind,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default)]
    pub headless: bool,

    /// Seconds to wait after navigation before capturing markup
    #[serde(default = "default_dwell_secs")]
    pub dwell_secs: u64,

    /// Upper bound on rendering a single page
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// Upper bound on a single artifact download
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_catalog() -> Vec<String> {
    DEFAULT_CATALOG.iter().map(|url| url.to_string()).collect()
}

fn default_document_dir() -> PathBuf {
    PathBuf::from("PDFs/")
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("ZIPs/")
}

fn default_renderer() -> RendererKind {
    RendererKind::WebDriver
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Long enough for script-based bot challenges to clear
fn default_dwell_secs() -> u64 {
    10
}

fn default_render_timeout_secs() -> u64 {
    5 * 60
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            document_dir: default_document_dir(),
            archive_dir: default_archive_dir(),
            renderer: default_renderer(),
            webdriver_url: default_webdriver_url(),
            headless: false,
            dwell_secs: default_dwell_secs(),
            render_timeout_secs: default_render_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    /// Settle time after navigation as a `Duration`
    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    /// Per-page render ceiling as a `Duration`
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Per-artifact download ceiling as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarvestConfig::default();
        assert_eq!(config.document_dir, PathBuf::from("PDFs/"));
        assert_eq!(config.archive_dir, PathBuf::from("ZIPs/"));
        assert_eq!(config.renderer, RendererKind::WebDriver);
        assert_eq!(config.dwell(), Duration::from_secs(10));
        assert_eq!(config.render_timeout(), Duration::from_secs(300));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(900));
        assert_eq!(config.catalog.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = HarvestConfig::from_json(
            r#"{
                "catalog": ["https://example.com/downloads/widget/"],
                "renderer": "http",
                "dwell_secs": 2
            }"#,
        )
        .unwrap();

        assert_eq!(config.catalog, vec!["https://example.com/downloads/widget/"]);
        assert_eq!(config.renderer, RendererKind::Http);
        assert_eq!(config.dwell_secs, 2);
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.fetch_timeout_secs, 900);
        assert!(!config.headless);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(HarvestConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.json");
        std::fs::write(&path, r#"{"archive_dir": "out/zips", "headless": true}"#).unwrap();

        let config = HarvestConfig::from_file(&path).unwrap();
        assert_eq!(config.archive_dir, PathBuf::from("out/zips"));
        assert!(config.headless);
        assert!(HarvestConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
