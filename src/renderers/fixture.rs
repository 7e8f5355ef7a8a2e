use super::Renderer;
use std::collections::HashMap;

/// Serves canned markup by URL; unknown URLs render as empty pages
#[derive(Debug, Clone, Default)]
pub struct FixtureRenderer {
    pages: HashMap<String, String>,
}

impl FixtureRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the markup returned for `url`
    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(url.into(), markup.into());
        self
    }
}

impl Renderer for FixtureRenderer {
    async fn render(&self, url: &str) -> String {
        match self.pages.get(url) {
            Some(markup) => markup.clone(),
            None => {
                ::log::debug!("No fixture for {}", url);
                String::new()
            }
        }
    }
}
