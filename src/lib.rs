//! Harvests downloadable documents and archives from product documentation pages.
//!
//! Each catalog page is rendered (through a real browser by default, so
//! challenge scripts and dynamic content run), its `.pdf` and `.zip` links are
//! extracted, and every artifact is downloaded once into a flat output
//! directory per kind. Downloads are validated by status, declared content
//! type and non-empty body before anything touches disk.

// Re-export modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filename;
pub mod filter;
pub mod parsers;
pub mod pipeline;
pub mod renderers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::{HarvestConfig, RendererKind};
pub use error::{Error, FetchError, Result};
pub use fetcher::Fetcher;
pub use filter::ArtifactKind;
pub use pipeline::Pipeline;
pub use renderers::Renderer;
pub use results::{FetchOutcome, RunReport};

use renderers::{HttpRenderer, WebDriverRenderer};
use std::path::Path;

/// Main builder for a harvest run
pub struct Harvester {
    config: HarvestConfig,
}

impl Harvester {
    /// Create a harvester from a configuration
    pub fn new(config: HarvestConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn with_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(HarvestConfig::from_file(path)?))
    }

    /// Select the page renderer
    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.config.renderer = renderer;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, webdriver_url: impl Into<String>) -> Self {
        self.config.webdriver_url = webdriver_url.into();
        self
    }

    /// Run the browser without a window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// The configuration this harvester will run with
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Build the configured renderer and fetcher, then process the whole catalog
    pub async fn run(self) -> Result<RunReport> {
        let fetcher = Fetcher::new(self.config.fetch_timeout())?;

        let report = match self.config.renderer {
            RendererKind::WebDriver => {
                let renderer = WebDriverRenderer::from_config(&self.config);
                self.run_with(renderer, fetcher).await
            }
            RendererKind::Http => {
                let renderer = HttpRenderer::new(self.config.render_timeout())?;
                self.run_with(renderer, fetcher).await
            }
        };

        Ok(report)
    }

    /// Process the whole catalog with a caller-supplied renderer and fetcher
    pub async fn run_with<R: Renderer>(&self, renderer: R, fetcher: Fetcher) -> RunReport {
        let pipeline = Pipeline::new(
            renderer,
            fetcher,
            &self.config.document_dir,
            &self.config.archive_dir,
        );
        pipeline.ensure_directories();
        pipeline.run(&self.config.catalog).await
    }
}
