use crate::filter::ArtifactKind;
use scraper::{Html, Selector};

/// Extracts every `<a href>` target containing `suffix`, in document order.
///
/// Targets are trimmed and compared case-insensitively; the token may appear
/// anywhere in the target (a query string counts). Duplicates are kept.
/// Malformed markup never fails: whatever the parser could recover is
/// searched, which for an unterminated tag is nothing.
pub fn extract_links(html: &str, suffix: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    if !doc.errors.is_empty() {
        ::log::debug!("HTML parser recovered from {} errors", doc.errors.len());
    }

    let suffix = suffix.to_lowercase();
    let link_selector = Selector::parse("a[href]").unwrap();
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| href.to_lowercase().contains(&suffix))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links containing {}", links.len(), suffix);
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}

/// Extracts the links that point at artifacts of `kind`
pub fn extract_artifact_links(html: &str, kind: ArtifactKind) -> Vec<String> {
    extract_links(html, kind.suffix())
}
