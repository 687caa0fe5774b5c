use anyhow::Result;
use std::path::Path;

use crate::catalog::{load_catalog, PlanetRecord};
use crate::log_info;
use crate::scoring::{compute_priority_scores, select_habitable_inputs, ModelConfig, ScoredPlanet};

/// Outcome of one load → select → score pass.
#[derive(Debug, Clone)]
pub struct RankedCatalog {
    pub catalog_rows: usize,
    pub selected_rows: usize,
    pub scored: Vec<ScoredPlanet>,
}

impl RankedCatalog {
    pub fn high_priority_count(&self) -> usize {
        self.scored
            .iter()
            .filter(|p| p.priority_band == crate::scoring::PriorityBand::HighPriority)
            .count()
    }
}

/// Select and score already-loaded catalog rows.
pub fn rank_records(records: &[PlanetRecord], model: &ModelConfig) -> Result<RankedCatalog> {
    let selected = select_habitable_inputs(records, model)?;
    log_info!(
        "Selected {} of {} canonical catalog rows",
        selected.len(),
        records.len()
    );
    let scored = compute_priority_scores(&selected, model);
    Ok(RankedCatalog {
        catalog_rows: records.len(),
        selected_rows: selected.len(),
        scored,
    })
}

/// Full pass from a catalog file on disk.
pub fn rank_catalog_file(path: &Path, model: &ModelConfig) -> Result<RankedCatalog> {
    log_info!("Loading catalog from {}", path.display());
    let records = load_catalog(path)?;
    rank_records(&records, model)
}
