//! Validated artifact downloads
//!
//! A fetch either leaves exactly one new file on disk or touches nothing.
//! Each gate below short-circuits before any write:
//!
//! 1. derive the destination from the normalized URL filename
//! 2. skip if a file is already there (no request is made)
//! 3. GET with the configured timeout
//! 4. require status 200
//! 5. require a whitelisted Content-Type for the artifact kind
//! 6. buffer the body and require it to be non-empty
//! 7. exclusive-create the destination and write the body

use crate::error::{FetchError, Result};
use crate::filename::url_to_filename;
use crate::filter::ArtifactKind;
use crate::results::FetchOutcome;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Default per-request ceiling, sized for large binary transfers
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Downloads artifacts into local directories, at most once per filename
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Use an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` into `destination_dir` and return `true` only if a new file was written.
    ///
    /// Skips and failures both return `false`; the reason has already been logged.
    pub async fn download(&self, url: &str, kind: ArtifactKind, destination_dir: &Path) -> bool {
        matches!(
            self.fetch(url, kind, destination_dir).await,
            Ok(FetchOutcome::Saved { .. })
        )
    }

    /// Download `url` into `destination_dir`, logging the outcome where it happens.
    pub async fn fetch(
        &self,
        url: &str,
        kind: ArtifactKind,
        destination_dir: &Path,
    ) -> std::result::Result<FetchOutcome, FetchError> {
        let result = self.try_fetch(url, kind, destination_dir).await;

        match &result {
            Ok(FetchOutcome::Saved { path, bytes }) => {
                ::log::info!(
                    "Successfully downloaded {} bytes: {} → {}",
                    bytes,
                    url,
                    path.display()
                );
            }
            Ok(FetchOutcome::Skipped { path }) => {
                ::log::info!("File already exists, skipping: {}", path.display());
            }
            Err(e) => {
                ::log::warn!("{}", e);
            }
        }

        result
    }

    async fn try_fetch(
        &self,
        url: &str,
        kind: ArtifactKind,
        destination_dir: &Path,
    ) -> std::result::Result<FetchOutcome, FetchError> {
        let filename = url_to_filename(url).to_lowercase();
        if filename.is_empty() {
            return Err(FetchError::EmptyFilename(url.to_string()));
        }
        let path = destination_dir.join(filename);

        if is_file(&path).await {
            return Ok(FetchOutcome::Skipped { path });
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !kind.accepts_content_type(&content_type) {
            return Err(FetchError::ContentTypeMismatch {
                url: url.to_string(),
                content_type,
                expected: kind.expected_content_types(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody(url.to_string()));
        }

        write_new_file(path, &body).await
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// Writes `body` to a file that must not exist yet. A file that appeared since
/// the existence check counts as a skip; a failed write leaves nothing behind.
async fn write_new_file(
    path: PathBuf,
    body: &[u8],
) -> std::result::Result<FetchOutcome, FetchError> {
    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(source) => {
            if source.kind() == ErrorKind::AlreadyExists && is_file(&path).await {
                return Ok(FetchOutcome::Skipped { path });
            }
            return Err(FetchError::Io { path, source });
        }
    };

    let written = match file.write_all(body).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    drop(file);

    if let Err(source) = written {
        if let Err(e) = fs::remove_file(&path).await {
            ::log::warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
        return Err(FetchError::Io { path, source });
    }

    Ok(FetchOutcome::Saved {
        path,
        bytes: body.len() as u64,
    })
}
