//! Archive listing domain model.
//!
//! The listing is a backend-authoritative snapshot of previously generated
//! CSV and PDF files. It is always replaced in full, never merged.

use serde::{Deserialize, Serialize};

/// A single archived file as listed by `GET /archives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveFile {
    pub name: String,
    /// Path relative to the backend base URL, e.g. `/files/archive/csv/a.csv`
    pub url: String,
    /// Backend-formatted modification time, kept verbatim
    pub modified: String,
    pub size_bytes: u64,
}

impl ArchiveFile {
    /// Absolute link to the file on the backend's static file route.
    pub fn download_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.url)
    }
}

/// Snapshot of the archive, split by file kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveListing {
    #[serde(default)]
    pub csv: Vec<ArchiveFile>,
    #[serde(default)]
    pub pdf: Vec<ArchiveFile>,
}

impl ArchiveListing {
    pub fn is_empty(&self) -> bool {
        self.csv.is_empty() && self.pdf.is_empty()
    }

    pub fn len(&self) -> usize {
        self.csv.len() + self.pdf.len()
    }
}
