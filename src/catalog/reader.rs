use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::PlanetRecord;

/// Columns the catalog file must carry. `pl_bmasse` and `pl_insol` are
/// optional and imputed when absent.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "pl_name",
    "hostname",
    "default_flag",
    "pl_eqt",
    "pl_rade",
    "pl_orbper",
    "st_teff",
    "st_rad",
    "sy_vmag",
    "sy_dist",
    "sy_snum",
];

/// Parse a planetary-systems table, keeping only rows flagged as the
/// canonical solution (`default_flag == 1`). Lines starting with `#` are
/// metadata and skipped.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<PlanetRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read catalog header")?
        .clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("Catalog is missing required columns: {}", missing.join(", "));
    }

    let flag_idx = headers
        .iter()
        .position(|h| h == "default_flag")
        .context("Catalog is missing required columns: default_flag")?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row.with_context(|| format!("Malformed catalog row {}", idx + 1))?;
        if row.get(flag_idx).and_then(|f| f.parse::<u8>().ok()) != Some(1) {
            continue;
        }
        let record: PlanetRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("Invalid value in catalog row {}", idx + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Load the catalog from a file on disk.
pub fn load_catalog(path: &Path) -> Result<Vec<PlanetRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalog at {}", path.display()))?;
    read_catalog(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}
