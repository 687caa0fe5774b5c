use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::io::Read;

/// One planet listed by the authoritative catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry {
    pub name: String,
    pub confidence: Option<String>,
}

/// Independently curated habitable-planet list, keyed by planet name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
    index: HashMap<String, usize>,
}

/// Accepted spellings of the optional confidence column, in preference order.
const CONFIDENCE_COLUMNS: &[&str] = &["confidence", "reference_source"];

impl ReferenceCatalog {
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Self {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.name.clone()).or_insert(i);
        }
        Self { entries, index }
    }

    /// Parse a reference table with a `pl_name` column. A table without one,
    /// or without any named planet, is treated as malformed.
    pub fn parse_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read reference header")?
            .clone();
        let Some(name_idx) = headers.iter().position(|h| h.trim() == "pl_name") else {
            bail!("Reference table has no pl_name column");
        };
        let confidence_idx = CONFIDENCE_COLUMNS
            .iter()
            .find_map(|col| headers.iter().position(|h| h.trim() == *col));

        let mut entries = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row.with_context(|| format!("Malformed reference row {}", idx + 1))?;
            let name = normalize_name(row.get(name_idx).unwrap_or_default());
            if name.is_empty() {
                continue;
            }
            let confidence = confidence_idx
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            entries.push(ReferenceEntry { name, confidence });
        }

        if entries.is_empty() {
            bail!("Reference table lists no planets");
        }

        Ok(Self::from_entries(entries))
    }

    /// Case-sensitive lookup on the trimmed name.
    pub fn get(&self, name: &str) -> Option<&ReferenceEntry> {
        self.index
            .get(normalize_name(name).as_str())
            .map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}
