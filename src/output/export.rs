use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::table::ScoreRow;
use crate::reference::CrossCheckedPlanet;
use crate::scoring::ScoredPlanet;
use crate::validation::ValidationReport;

/// File names inside the results directory.
#[derive(Debug, Clone)]
pub struct ResultsLayout {
    pub dir: PathBuf,
}

impl ResultsLayout {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn scores_path(&self) -> PathBuf {
        self.dir.join("habitable_priority_scores.csv")
    }

    pub fn top_path(&self) -> PathBuf {
        self.dir.join("habitable_top20.md")
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.dir.join("habitable_authoritative_comparison.csv")
    }

    pub fn report_json_path(&self) -> PathBuf {
        self.dir.join("validation_report.json")
    }

    pub fn report_md_path(&self) -> PathBuf {
        self.dir.join("validation_report.md")
    }
}

/// Open `path` for an atomic replace, creating parent directories.
fn open_atomic(path: &Path) -> Result<AtomicWriteFile> {
    crate::reference::cache::ensure_parent_dir(path)?;
    AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))
}

/// Write the full scored table in rank order.
pub fn write_score_table(path: &Path, scored: &[ScoredPlanet]) -> Result<()> {
    let mut file = open_atomic(path)?;
    {
        let mut writer = csv::Writer::from_writer(&mut file);
        for planet in scored {
            writer
                .serialize(ScoreRow::from(planet))
                .with_context(|| format!("Failed to serialize row for {}", planet.input.name))?;
        }
        writer.flush().context("Failed to flush scored table")?;
    }
    file.commit()
        .with_context(|| format!("Failed to save scored table to {}", path.display()))?;
    Ok(())
}

pub fn read_score_rows<R: Read>(reader: R) -> Result<Vec<ScoreRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (idx, row) in csv_reader.deserialize().enumerate() {
        let row: ScoreRow = row.with_context(|| format!("Invalid stored score row {}", idx + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read a previously written scored table.
pub fn read_score_table(path: &Path) -> Result<Vec<ScoreRow>> {
    let file = File::open(path)
        .with_context(|| format!("Stored priority scores not found at {}", path.display()))?;
    read_score_rows(std::io::BufReader::new(file))
}

/// Markdown excerpt of the best `n` planets.
pub fn render_top_markdown(scored: &[ScoredPlanet], n: usize) -> String {
    let mut lines = vec![
        "| pl_name | priority_score | priority_band | pl_eqt | pl_rade | pl_orbper | sy_vmag | sy_snum |".to_string(),
        "| --- | --- | --- | --- | --- | --- | --- | --- |".to_string(),
    ];
    for planet in scored.iter().take(n) {
        let input = &planet.input;
        lines.push(format!(
            "| {} | {:.4} | {} | {} | {} | {} | {} | {} |",
            input.name.replace('|', "\\|"),
            planet.priority_score,
            planet.priority_band,
            input.eq_temp,
            input.radius,
            input.orbital_period,
            input.vmag,
            input.star_count
        ));
    }
    lines.join("\n") + "\n"
}

pub fn write_top_markdown(path: &Path, scored: &[ScoredPlanet], n: usize) -> Result<()> {
    write_text(path, &render_top_markdown(scored, n))
}

pub fn write_comparison(path: &Path, rows: &[CrossCheckedPlanet]) -> Result<()> {
    let mut file = open_atomic(path)?;
    {
        let mut writer = csv::Writer::from_writer(&mut file);
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to serialize comparison row for {}", row.pl_name))?;
        }
        writer.flush().context("Failed to flush comparison table")?;
    }
    file.commit()
        .with_context(|| format!("Failed to save comparison table to {}", path.display()))?;
    Ok(())
}

/// Drop a comparison table left by an earlier run, so a skipped cross-check
/// leaves no comparison behind.
pub fn remove_comparison(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e)
            .with_context(|| format!("Failed to remove stale comparison at {}", path.display())),
    }
}

/// Write the validation report as JSON and as a Markdown table.
pub fn write_validation_reports(
    json_path: &Path,
    md_path: &Path,
    report: &ValidationReport,
) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize validation report")?;
    write_text(json_path, &json)?;
    write_text(md_path, &render_validation_markdown(report))
}

pub fn render_validation_markdown(report: &ValidationReport) -> String {
    let mut lines = vec![
        "# Validation report".to_string(),
        String::new(),
        format!("Overall status: **{}**", report.overall()),
        String::new(),
        format!("Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        String::new(),
        "| Check | Status | Details |".to_string(),
        "| --- | --- | --- |".to_string(),
    ];
    for record in report.checks() {
        lines.push(format!(
            "| {} | {} | {} |",
            record.name,
            record.status.to_string().to_uppercase(),
            record.details.replace('|', "\\|")
        ));
    }
    lines.join("\n") + "\n"
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut file = open_atomic(path)?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}
