use serde::{Deserialize, Serialize};
use std::fmt;

/// Content types accepted for every kind. Servers use both spellings.
const OCTET_STREAM: &[&str] = &["application/octet-stream", "binary/octet-stream"];

/// The kinds of artifact the harvester collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// PDF manuals and datasheets
    Document,
    /// ZIP firmware bundles and tools
    Archive,
}

impl ArtifactKind {
    /// Every kind, in the order the pipeline processes them
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Document, ArtifactKind::Archive];

    /// Lowercase token a link must contain to be considered this kind
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Document => ".pdf",
            ArtifactKind::Archive => ".zip",
        }
    }

    /// Content types (besides octet-stream) that identify this kind
    fn specific_content_types(&self) -> &'static [&'static str] {
        match self {
            ArtifactKind::Document => &["application/pdf"],
            ArtifactKind::Archive => &["application/zip", "application/x-zip-compressed"],
        }
    }

    /// Returns true if the href mentions the kind's suffix anywhere, ignoring case.
    ///
    /// This is containment rather than suffix matching, so `manual.pdf?v=2`
    /// qualifies as a document.
    pub fn matches_link(&self, href: &str) -> bool {
        href.to_lowercase().contains(self.suffix())
    }

    /// Returns true if a declared Content-Type header is on this kind's whitelist.
    ///
    /// Matching is case-insensitive containment, so parameters such as
    /// `; charset=binary` do not cause a rejection. An empty header never matches.
    pub fn accepts_content_type(&self, content_type: &str) -> bool {
        let content_type = content_type.to_lowercase();
        OCTET_STREAM
            .iter()
            .chain(self.specific_content_types())
            .any(|accepted| content_type.contains(accepted))
    }

    /// Whitelist rendered for diagnostics
    pub fn expected_content_types(&self) -> String {
        OCTET_STREAM
            .iter()
            .chain(self.specific_content_types())
            .copied()
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Document => write!(f, "document"),
            ArtifactKind::Archive => write!(f, "archive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_link_is_case_insensitive_containment() {
        assert!(ArtifactKind::Document.matches_link("/files/Manual.PDF"));
        assert!(ArtifactKind::Document.matches_link("/get?file=manual.pdf&v=2"));
        assert!(!ArtifactKind::Document.matches_link("/files/firmware.zip"));
        assert!(ArtifactKind::Archive.matches_link("https://cdn.example.com/FW.ZIP"));
        assert!(!ArtifactKind::Archive.matches_link("/downloads/"));
    }

    #[test]
    fn test_document_content_types() {
        let kind = ArtifactKind::Document;
        assert!(kind.accepts_content_type("application/pdf"));
        assert!(kind.accepts_content_type("Application/PDF; charset=binary"));
        assert!(kind.accepts_content_type("application/octet-stream"));
        assert!(kind.accepts_content_type("binary/octet-stream"));
        assert!(!kind.accepts_content_type("application/zip"));
        assert!(!kind.accepts_content_type("text/html; charset=utf-8"));
        assert!(!kind.accepts_content_type(""));
    }

    #[test]
    fn test_archive_content_types() {
        let kind = ArtifactKind::Archive;
        assert!(kind.accepts_content_type("application/zip"));
        assert!(kind.accepts_content_type("application/x-zip-compressed"));
        assert!(kind.accepts_content_type("application/octet-stream"));
        assert!(!kind.accepts_content_type("application/pdf"));
        assert!(!kind.accepts_content_type("text/html"));
    }

    #[test]
    fn test_expected_content_types_lists_whitelist() {
        assert_eq!(
            ArtifactKind::Document.expected_content_types(),
            "application/octet-stream or binary/octet-stream or application/pdf"
        );
    }
}
