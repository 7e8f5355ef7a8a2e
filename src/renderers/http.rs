use super::Renderer;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Fetches pages with a plain GET. Scripts are not executed, so pages behind
/// a JavaScript challenge render as the challenge itself.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Create a renderer whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Use an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Renderer for HttpRenderer {
    async fn render(&self, url: &str) -> String {
        ::log::info!("Scraping: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                ::log::error!("Failed to fetch {}: {}", url, e);
                return String::new();
            }
        };

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                ::log::error!("Failed to read body of {}: {}", url, e);
                String::new()
            }
        }
    }
}
