use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a successful fetch did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// A new file was written
    Saved {
        /// Destination path
        path: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// A file with the same normalized name already existed; nothing was requested
    Skipped {
        /// Existing file
        path: PathBuf,
    },
}

impl FetchOutcome {
    /// Returns true if this fetch wrote a new file
    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }

    /// Where the artifact lives on disk
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Saved { path, .. } | FetchOutcome::Skipped { path } => path,
        }
    }
}

/// Tally of a pipeline run. Informational only: per-item failures never fail a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Catalog pages rendered
    pub pages: usize,
    /// Catalog entries that were not valid URLs
    pub invalid_pages: usize,
    /// Artifacts written to disk
    pub saved: usize,
    /// Artifacts already present
    pub skipped: usize,
    /// Artifacts abandoned for any reason
    pub failed: usize,
}

impl RunReport {
    /// Count one fetch attempt
    pub fn record(&mut self, outcome: &Result<FetchOutcome, crate::error::FetchError>) {
        match outcome {
            Ok(FetchOutcome::Saved { .. }) => self.saved += 1,
            Ok(FetchOutcome::Skipped { .. }) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn test_outcome_path_and_tally() {
        let saved = FetchOutcome::Saved {
            path: PathBuf::from("PDFs/manual.pdf"),
            bytes: 8,
        };
        let skipped = FetchOutcome::Skipped {
            path: PathBuf::from("ZIPs/firmware.zip"),
        };
        assert_eq!(saved.path(), Path::new("PDFs/manual.pdf"));
        assert_eq!(skipped.path(), Path::new("ZIPs/firmware.zip"));
        assert!(saved.is_saved() && !skipped.is_saved());

        let mut report = RunReport::default();
        report.record(&Ok(saved));
        report.record(&Ok(skipped));
        report.record(&Err(FetchError::EmptyBody("https://example.com/a.pdf".to_string())));
        assert_eq!((report.saved, report.skipped, report.failed), (1, 1, 1));
    }
}
