use crate::catalog;
use crate::fetcher::Fetcher;
use crate::filter::ArtifactKind;
use crate::parsers::extract_artifact_links;
use crate::renderers::Renderer;
use crate::results::RunReport;
use std::path::{Path, PathBuf};
use url::Url;

/// Drives catalog pages through rendering, link extraction and fetching.
///
/// Processing is sequential: one page is rendered and all of its artifacts are
/// fetched before the next page starts. No per-page or per-artifact failure
/// stops the run.
pub struct Pipeline<R> {
    renderer: R,
    fetcher: Fetcher,
    document_dir: PathBuf,
    archive_dir: PathBuf,
}

impl<R: Renderer> Pipeline<R> {
    /// Create a pipeline saving documents and archives into the given directories
    pub fn new(
        renderer: R,
        fetcher: Fetcher,
        document_dir: impl Into<PathBuf>,
        archive_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            fetcher,
            document_dir: document_dir.into(),
            archive_dir: archive_dir.into(),
        }
    }

    /// Directory artifacts of `kind` are saved into
    pub fn destination(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Document => &self.document_dir,
            ArtifactKind::Archive => &self.archive_dir,
        }
    }

    /// Create both output directories if they are missing
    pub fn ensure_directories(&self) {
        ensure_directory(&self.document_dir);
        ensure_directory(&self.archive_dir);
    }

    /// Process every catalog page once, in catalog order, skipping repeats
    pub async fn run<S: AsRef<str>>(&self, entries: &[S]) -> RunReport {
        let mut report = RunReport::default();

        for page_url in catalog::dedup(entries) {
            let Some(base) = catalog::parse(&page_url) else {
                ::log::debug!("Skipping invalid catalog URL: {}", page_url);
                report.invalid_pages += 1;
                continue;
            };

            report.pages += 1;
            self.process_page(&base, &mut report).await;
        }

        ::log::info!(
            "Harvest complete - {} pages, {} saved, {} already present, {} failed",
            report.pages,
            report.saved,
            report.skipped,
            report.failed
        );
        report
    }

    async fn process_page(&self, page_url: &Url, report: &mut RunReport) {
        let markup = self.renderer.render(page_url.as_str()).await;
        if markup.is_empty() {
            ::log::warn!("No markup rendered for {}", page_url);
        }

        for kind in ArtifactKind::ALL {
            let links = extract_artifact_links(&markup, kind);
            ::log::info!("Found {} {} links in {}", links.len(), kind, page_url);

            for link in links {
                // Relative hrefs are resolved against the page they were found on
                let resolved = match page_url.join(&link) {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        ::log::warn!("Cannot resolve link {} on {}: {}", link, page_url, e);
                        report.failed += 1;
                        continue;
                    }
                };

                let outcome = self
                    .fetcher
                    .fetch(resolved.as_str(), kind, self.destination(kind))
                    .await;
                report.record(&outcome);
            }
        }
    }
}

/// Create `path` (rwxr-xr-x on unix) if it does not exist.
///
/// Failure is logged rather than returned; downloads into a missing
/// directory then fail one by one.
pub fn ensure_directory(path: &Path) {
    if path.is_dir() {
        return;
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    match builder.create(path) {
        Ok(()) => ::log::debug!("Created directory {}", path.display()),
        Err(e) => ::log::error!("Failed to create directory {}: {}", path.display(), e),
    }
}
