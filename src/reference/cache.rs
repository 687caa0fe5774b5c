use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::catalog::ReferenceCatalog;

const FETCH_RECORD_KEY: &str = "reference:last-fetch";

/// Get the platform-appropriate cache directory for fetch metadata
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("habitable-priority"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/habitable-priority",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Remove the fetch metadata cache
pub fn clear_cache() -> Result<()> {
    let cache_dir = get_cache_dir();
    match std::fs::remove_dir_all(&cache_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Provenance of the last successful remote fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRecord {
    pub url: String,
    pub fetched_at: i64, // Unix timestamp
    pub rows: usize,
}

/// Local copy of the authoritative catalog plus its fetch metadata.
#[derive(Debug, Clone)]
pub struct ReferenceCache {
    pub csv_path: PathBuf,
    pub meta_dir: PathBuf,
}

impl ReferenceCache {
    pub fn new(csv_path: PathBuf) -> Self {
        Self {
            csv_path,
            meta_dir: get_cache_dir(),
        }
    }

    /// Read the cached table. `Ok(None)` when no copy exists yet.
    pub fn load(&self) -> Result<Option<ReferenceCatalog>> {
        if !self.csv_path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.csv_path).with_context(|| {
            format!("Failed to open reference cache at {}", self.csv_path.display())
        })?;
        let catalog = ReferenceCatalog::parse_csv(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to parse reference cache at {}", self.csv_path.display()))?;
        Ok(Some(catalog))
    }

    /// Persist a freshly downloaded table so later runs work offline.
    pub fn store(&self, body: &str) -> Result<()> {
        ensure_parent_dir(&self.csv_path)?;
        let mut file = AtomicWriteFile::open(&self.csv_path).with_context(|| {
            format!("Failed to open atomic write file at {}", self.csv_path.display())
        })?;
        file.write_all(body.as_bytes())
            .context("Failed to write reference cache")?;
        file.commit().context("Failed to save reference cache")?;
        Ok(())
    }

    pub fn read_fetch_record(&self) -> Option<FetchRecord> {
        let bytes = cacache::read_sync(&self.meta_dir, FETCH_RECORD_KEY).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn write_fetch_record(&self, record: &FetchRecord) -> Result<()> {
        let json = serde_json::to_vec(record)?;
        cacache::write_sync(&self.meta_dir, FETCH_RECORD_KEY, &json)?;
        Ok(())
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}
