use super::Renderer;
use crate::config::HarvestConfig;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on ending a session once rendering is over
const CLOSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Common local WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Renders pages in a real Chrome session driven over WebDriver.
///
/// Each page gets a fresh session: navigate, wait out the dwell delay so
/// challenge scripts and dynamic content settle, capture the page source,
/// then close the session. Session setup, navigation, dwell and capture
/// together are bounded by the render timeout.
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
    headless: bool,
    dwell: Duration,
    timeout: Duration,
}

impl WebDriverRenderer {
    /// Create a renderer talking to the WebDriver server at `webdriver_url`
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            headless: false,
            dwell: Duration::from_secs(10),
            timeout: Duration::from_secs(5 * 60),
        }
    }

    /// Build a renderer from the harvest configuration
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(config.webdriver_url.clone())
            .with_headless(config.headless)
            .with_dwell(config.dwell())
            .with_timeout(config.render_timeout())
    }

    /// Launch Chrome without a window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the wait between navigation and capture
    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    /// Set the overall ceiling on rendering one page
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn capabilities(&self) -> Capabilities {
        let mut args = vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-setuid-sandbox",
            "--window-size=1920,1080",
        ];
        if self.headless {
            args.push("--headless=new");
        }

        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }

    /// Opens a session on the configured WebDriver, falling back to common local ports
    async fn connect(&self) -> Option<Client> {
        match self.connect_to(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Some(client);
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
            }
        }

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == self.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = self.connect_to(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Some(client);
            }
        }

        ::log::error!("Failed to connect to any WebDriver servers");
        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        None
    }

    async fn connect_to(
        &self,
        webdriver_url: &str,
    ) -> Result<Client, fantoccini::error::NewSessionError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());
        builder.connect(webdriver_url).await
    }

    async fn capture(&self, client: &Client, url: &str) -> Result<String, CmdError> {
        client.goto(url).await?;
        tokio::time::sleep(self.dwell).await;
        client.source().await
    }
}

impl Renderer for WebDriverRenderer {
    async fn render(&self, url: &str) -> String {
        ::log::info!("Scraping: {}", url);
        let started = std::time::Instant::now();

        // Keeps a handle on the session so it can be closed even if the deadline
        // fires mid-capture
        let session = OnceLock::new();
        let result = timeout(self.timeout, async {
            let client = self.connect().await?;
            let _ = session.set(client.clone());
            Some(self.capture(&client, url).await)
        })
        .await;

        if let Some(client) = session.into_inner() {
            match timeout(CLOSE_TIMEOUT, client.close()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => ::log::warn!("Failed to close WebDriver session: {}", e),
                Err(_) => ::log::warn!("Timeout closing WebDriver session for {}", url),
            }
        }

        match result {
            // No WebDriver endpoint answered; already logged by connect
            Ok(None) => String::new(),
            Ok(Some(Ok(html))) => {
                ::log::debug!(
                    "Rendered {} ({} bytes) in {:.2} seconds",
                    url,
                    html.len(),
                    started.elapsed().as_secs_f64()
                );
                html
            }
            Ok(Some(Err(e))) => {
                handle_navigation_error(e, url);
                String::new()
            }
            Err(_) => {
                ::log::error!("Timeout rendering {} after {:?}", url, self.timeout);
                String::new()
            }
        }
    }
}

/// Logs errors that occur during navigation or page source retrieval
fn handle_navigation_error(error: CmdError, url: &str) {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while rendering {}", url);
    } else {
        ::log::error!("Failed to render {}: {}", url, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_window_and_sandbox_flags() {
        let caps = WebDriverRenderer::new("http://localhost:4444").capabilities();
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.contains(&json!("--window-size=1920,1080")));
        assert!(args.contains(&json!("--no-sandbox")));
        assert!(!args.contains(&json!("--headless=new")));
    }

    #[test]
    fn test_headless_flag() {
        let caps = WebDriverRenderer::new("http://localhost:4444")
            .with_headless(true)
            .capabilities();
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.contains(&json!("--headless=new")));
    }

    #[test]
    fn test_from_config() {
        let config = HarvestConfig {
            webdriver_url: "http://localhost:9515".to_string(),
            dwell_secs: 3,
            render_timeout_secs: 60,
            ..HarvestConfig::default()
        };
        let renderer = WebDriverRenderer::from_config(&config);
        assert_eq!(renderer.webdriver_url, "http://localhost:9515");
        assert_eq!(renderer.dwell, Duration::from_secs(3));
        assert_eq!(renderer.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_stalled_webdriver_is_bounded_by_timeout() {
        // Accepts connections but never answers the new-session request
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });

        let renderer = WebDriverRenderer::new(format!("http://{}", addr))
            .with_dwell(Duration::ZERO)
            .with_timeout(Duration::from_millis(500));

        let started = std::time::Instant::now();
        let markup = tokio::time::timeout(
            Duration::from_secs(10),
            renderer.render("https://example.com/"),
        )
        .await
        .expect("render outlived its own timeout");

        assert_eq!(markup, "");
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
