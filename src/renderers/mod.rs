//! Page renderers: turn a catalog URL into markup.

pub mod fixture;
pub mod http;
pub mod webdriver;

pub use fixture::FixtureRenderer;
pub use http::HttpRenderer;
pub use webdriver::WebDriverRenderer;

use std::future::Future;

/// Produces the markup of a page.
///
/// Implementations swallow their own failures: a page that could not be
/// rendered comes back as an empty string, which extracts to zero links.
pub trait Renderer {
    /// Render `url` and return its markup, or "" on any failure
    fn render(&self, url: &str) -> impl Future<Output = String> + Send;
}
