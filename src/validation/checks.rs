use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::{CheckStatus, ValidationRecord, ValidationReport};
use crate::output::{read_score_table, ScoreRow};
use crate::pipeline::rank_catalog_file;
use crate::scoring::{
    observability_score, priority_score, ModelConfig, PillarScores, PriorityBand, ScoredPlanet,
};

/// Largest tolerated |recomputed - stored| for any score.
pub const SCORE_TOLERANCE: f64 = 1e-6;
/// Upper bound for component scores, leaving room for weighting round-off.
pub const COMPONENT_CEILING: f64 = 1.05;

pub const COVERAGE: &str = "Priority candidate coverage";
pub const SCORE_EQUALITY: &str = "Priority score equality";
pub const BAND_EQUALITY: &str = "Priority band labels";
pub const COMPONENT_BOUNDS: &str = "Component score bounds";
pub const WEIGHTING: &str = "Weighting reconstruction";
pub const BAND_DISTRIBUTION: &str = "High-priority presence";

/// Recompute the ranking from `catalog_path` and compare it with the table
/// stored at `stored_path`. Every check is reported even if loading failed.
pub fn validate_priority_table(
    catalog_path: &Path,
    stored_path: &Path,
    model: &ModelConfig,
) -> ValidationReport {
    let recomputed = rank_catalog_file(catalog_path, model).map(|ranked| ranked.scored);
    let stored = read_score_table(stored_path);
    run_checks(recomputed, stored, model)
}

/// Run all six checks in order. Never returns early: a check whose input is
/// missing is recorded as failed with the reason.
pub fn run_checks(
    recomputed: Result<Vec<ScoredPlanet>>,
    stored: Result<Vec<ScoreRow>>,
    model: &ModelConfig,
) -> ValidationReport {
    let recomputed = recomputed.map_err(|e| format!("Recompute failed: {:#}", e));
    let stored = stored.map_err(|e| format!("Stored table unavailable: {:#}", e));
    let unavailable = |name: &str, reason: &String| {
        ValidationRecord::new(name, CheckStatus::Fail, reason.clone())
    };

    let mut checks = Vec::with_capacity(6);

    match (&recomputed, &stored) {
        (Ok(model_rows), Ok(stored_rows)) => {
            checks.push(check_coverage(model_rows, stored_rows));
            checks.push(check_score_equality(model_rows, stored_rows));
            checks.push(check_band_equality(model_rows, stored_rows));
        }
        (Err(reason), _) | (_, Err(reason)) => {
            checks.push(unavailable(COVERAGE, reason));
            checks.push(unavailable(SCORE_EQUALITY, reason));
            checks.push(unavailable(BAND_EQUALITY, reason));
        }
    }

    match &stored {
        Ok(stored_rows) => {
            checks.push(check_component_bounds(stored_rows));
            checks.push(check_weighting(stored_rows, model));
        }
        Err(reason) => {
            checks.push(unavailable(COMPONENT_BOUNDS, reason));
            checks.push(unavailable(WEIGHTING, reason));
        }
    }

    match &recomputed {
        Ok(model_rows) => checks.push(check_band_distribution(model_rows)),
        Err(reason) => checks.push(unavailable(BAND_DISTRIBUTION, reason)),
    }

    ValidationReport::new(checks)
}

fn stored_by_name(stored: &[ScoreRow]) -> HashMap<&str, &ScoreRow> {
    stored.iter().map(|row| (row.pl_name.as_str(), row)).collect()
}

pub fn check_coverage(recomputed: &[ScoredPlanet], stored: &[ScoreRow]) -> ValidationRecord {
    let model_names: HashSet<&str> = recomputed.iter().map(|p| p.input.name.as_str()).collect();
    let stored_names: HashSet<&str> = stored.iter().map(|r| r.pl_name.as_str()).collect();
    let missing = model_names.difference(&stored_names).count();
    let extra = stored_names.difference(&model_names).count();
    // planet names are unique in a scored table
    let duplicates = stored.len() - stored_names.len();

    let status = if missing == 0 && extra == 0 && duplicates == 0 {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    ValidationRecord::new(
        COVERAGE,
        status,
        format!(
            "Rows in model: {}; stored: {}; missing={}; extra={}; duplicated={}",
            recomputed.len(),
            stored.len(),
            missing,
            extra,
            duplicates
        ),
    )
}

pub fn check_score_equality(recomputed: &[ScoredPlanet], stored: &[ScoreRow]) -> ValidationRecord {
    let by_name = stored_by_name(stored);
    let deltas: Vec<f64> = recomputed
        .iter()
        .filter_map(|p| {
            by_name
                .get(p.input.name.as_str())
                .map(|row| (p.priority_score - row.priority_score).abs())
        })
        .collect();

    if deltas.is_empty() {
        return ValidationRecord::new(
            SCORE_EQUALITY,
            CheckStatus::Fail,
            "No planets shared between model and stored table",
        );
    }

    let max_delta = deltas.iter().copied().fold(0.0, f64::max);
    // NaN never compares below the tolerance, so it fails here
    let status = if max_delta < SCORE_TOLERANCE && deltas.iter().all(|d| !d.is_nan()) {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    ValidationRecord::new(
        SCORE_EQUALITY,
        status,
        format!(
            "Max |priority_score_model - priority_score_stored| = {:.2e} over {} shared rows",
            max_delta,
            deltas.len()
        ),
    )
}

pub fn check_band_equality(recomputed: &[ScoredPlanet], stored: &[ScoreRow]) -> ValidationRecord {
    let by_name = stored_by_name(stored);
    let mismatched: Vec<&str> = recomputed
        .iter()
        .filter(|p| {
            by_name
                .get(p.input.name.as_str())
                .is_some_and(|row| row.priority_band != p.priority_band)
        })
        .map(|p| p.input.name.as_str())
        .collect();

    if mismatched.is_empty() {
        ValidationRecord::new(BAND_EQUALITY, CheckStatus::Pass, "Priority bands identical")
    } else {
        let sample: Vec<&str> = mismatched.iter().take(3).copied().collect();
        ValidationRecord::new(
            BAND_EQUALITY,
            CheckStatus::Fail,
            format!(
                "Priority band mismatch for {} planets (e.g. {})",
                mismatched.len(),
                sample.join(", ")
            ),
        )
    }
}

pub fn check_component_bounds(stored: &[ScoreRow]) -> ValidationRecord {
    let mut violations = 0usize;
    let mut first: Option<String> = None;
    for row in stored {
        let values = row
            .components()
            .into_iter()
            .chain(std::iter::once(("priority_score", row.priority_score)));
        for (column, value) in values {
            if !(0.0..=COMPONENT_CEILING).contains(&value) {
                violations += 1;
                first.get_or_insert_with(|| format!("{} {}={}", row.pl_name, column, value));
            }
        }
    }

    match first {
        None => ValidationRecord::new(
            COMPONENT_BOUNDS,
            CheckStatus::Pass,
            format!("All components within [0, {}] for {} rows", COMPONENT_CEILING, stored.len()),
        ),
        Some(example) => ValidationRecord::new(
            COMPONENT_BOUNDS,
            CheckStatus::Fail,
            format!(
                "{} component values outside [0, {}] (first: {})",
                violations, COMPONENT_CEILING, example
            ),
        ),
    }
}

/// Rebuild observability and priority scores from their weighted formulas.
pub fn check_weighting(stored: &[ScoreRow], model: &ModelConfig) -> ValidationRecord {
    let mut max_obs = 0.0f64;
    let mut max_priority = 0.0f64;
    let mut any_nan = false;

    for row in stored {
        let obs = observability_score(
            row.brightness_score,
            row.transit_score,
            row.distance_score,
            &model.observability_weights,
        );
        let pillars = PillarScores {
            climate: row.climate_score,
            structure: row.structure_score,
            observability: row.observability_score,
            system: row.system_score,
        };
        let priority = priority_score(&pillars, &model.pillar_weights);

        let obs_delta = (obs - row.observability_score).abs();
        let priority_delta = (priority - row.priority_score).abs();
        any_nan |= obs_delta.is_nan() || priority_delta.is_nan();
        max_obs = max_obs.max(obs_delta);
        max_priority = max_priority.max(priority_delta);
    }

    let status = if !any_nan && max_obs < SCORE_TOLERANCE && max_priority < SCORE_TOLERANCE {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    ValidationRecord::new(
        WEIGHTING,
        status,
        format!(
            "Max |observability delta| = {:.2e}; max |priority delta| = {:.2e}",
            max_obs, max_priority
        ),
    )
}

/// Warn (never fail) when nothing reaches the top band.
pub fn check_band_distribution(recomputed: &[ScoredPlanet]) -> ValidationRecord {
    let high = recomputed
        .iter()
        .filter(|p| p.priority_band == PriorityBand::HighPriority)
        .count();
    let share = if recomputed.is_empty() {
        0.0
    } else {
        high as f64 / recomputed.len() as f64
    };
    let status = if high > 0 {
        CheckStatus::Pass
    } else {
        CheckStatus::Warn
    };
    ValidationRecord::new(
        BAND_DISTRIBUTION,
        status,
        format!(
            "High priority: {} of {} planets (share = {:.4})",
            high,
            recomputed.len(),
            share
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SelectedInput;
    use crate::scoring::{compute_priority_scores, MODEL};
    use crate::validation::OverallStatus;
    use anyhow::anyhow;

    fn input(name: &str, eq_temp: f64, vmag: f64, star_count: u32) -> SelectedInput {
        SelectedInput {
            name: name.to_string(),
            host: "Host".to_string(),
            eq_temp,
            radius: 1.0,
            mass: Some(1.0),
            insolation: Some(1.0),
            orbital_period: 365.0,
            stellar_teff: 5778.0,
            stellar_radius: 1.0,
            vmag,
            distance_pc: 10.0,
            star_count,
            effective_insolation: 1.0,
            filled_mass: 1.0,
        }
    }

    fn inputs() -> Vec<SelectedInput> {
        vec![
            input("A b", 288.0, 6.0, 1),
            input("B b", 390.0, 13.0, 3),
            input("C b", 200.0, 10.0, 2),
        ]
    }

    fn stored_from(scored: &[ScoredPlanet]) -> Vec<ScoreRow> {
        scored.iter().map(ScoreRow::from).collect()
    }

    #[test]
    fn test_two_identical_runs_pass() {
        let first = compute_priority_scores(&inputs(), &MODEL);
        let second = compute_priority_scores(&inputs(), &MODEL);
        let report = run_checks(Ok(second), Ok(stored_from(&first)), &MODEL);

        assert_eq!(report.checks().len(), 6);
        for name in [COVERAGE, SCORE_EQUALITY, BAND_EQUALITY, COMPONENT_BOUNDS, WEIGHTING] {
            assert_eq!(report.get(name).unwrap().status, CheckStatus::Pass, "{}", name);
        }
        assert_eq!(report.get(BAND_DISTRIBUTION).unwrap().status, CheckStatus::Pass);
        assert_eq!(report.overall(), OverallStatus::Pass);
    }

    #[test]
    fn test_score_drift_fails() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let mut stored = stored_from(&scored);
        stored[1].priority_score += 1e-3;
        let report = run_checks(Ok(scored), Ok(stored), &MODEL);
        assert_eq!(report.get(SCORE_EQUALITY).unwrap().status, CheckStatus::Fail);
        // the stored row no longer matches its own pillars either
        assert_eq!(report.get(WEIGHTING).unwrap().status, CheckStatus::Fail);
        assert_eq!(report.get(COVERAGE).unwrap().status, CheckStatus::Pass);
    }

    #[test]
    fn test_tiny_drift_within_tolerance_passes() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let mut stored = stored_from(&scored);
        stored[0].priority_score += 1e-9;
        let report = run_checks(Ok(scored), Ok(stored), &MODEL);
        assert_eq!(report.get(SCORE_EQUALITY).unwrap().status, CheckStatus::Pass);
        assert_eq!(report.get(WEIGHTING).unwrap().status, CheckStatus::Pass);
    }

    #[test]
    fn test_coverage_counts_missing_and_extra() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let mut stored = stored_from(&scored);
        stored.pop();
        let mut extra = stored[0].clone();
        extra.pl_name = "Ghost b".to_string();
        stored.push(extra);
        let record = check_coverage(&scored, &stored);
        assert_eq!(record.status, CheckStatus::Fail);
        assert!(record.details.contains("missing=1"));
        assert!(record.details.contains("extra=1"));
    }

    #[test]
    fn test_duplicated_stored_name_fails_coverage() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let mut stored = stored_from(&scored);
        stored.push(stored[0].clone());
        let record = check_coverage(&scored, &stored);
        assert_eq!(record.status, CheckStatus::Fail);
        assert!(record.details.contains("missing=0"));
        assert!(record.details.contains("extra=0"));
        assert!(record.details.contains("duplicated=1"));
    }

    #[test]
    fn test_band_mismatch_fails() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let mut stored = stored_from(&scored);
        stored[0].priority_band = PriorityBand::Context;
        let record = check_band_equality(&scored, &stored);
        assert_eq!(record.status, CheckStatus::Fail);
        assert!(record.details.contains(&scored[0].input.name));
    }

    #[test]
    fn test_component_out_of_bounds_fails() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let mut stored = stored_from(&scored);
        stored[2].radius_score = 1.2;
        let record = check_component_bounds(&stored);
        assert_eq!(record.status, CheckStatus::Fail);
        assert!(record.details.contains("radius_score"));

        stored[2].radius_score = 1.04;
        assert_eq!(check_component_bounds(&stored).status, CheckStatus::Pass);
    }

    #[test]
    fn test_no_high_priority_warns() {
        let mut cold = input("Cold b", 175.0, 16.0, 4);
        cold.effective_insolation = 5.0;
        cold.distance_pc = 900.0;
        let scored = compute_priority_scores(&[cold], &MODEL);
        assert_ne!(scored[0].priority_band, PriorityBand::HighPriority);
        let record = check_band_distribution(&scored);
        assert_eq!(record.status, CheckStatus::Warn);
    }

    #[test]
    fn test_missing_stored_table_reports_every_check() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let report = run_checks(Ok(scored), Err(anyhow!("file not found")), &MODEL);
        assert_eq!(report.checks().len(), 6);
        for name in [COVERAGE, SCORE_EQUALITY, BAND_EQUALITY, COMPONENT_BOUNDS, WEIGHTING] {
            let record = report.get(name).unwrap();
            assert_eq!(record.status, CheckStatus::Fail);
            assert!(record.details.contains("file not found"));
        }
        assert_eq!(report.get(BAND_DISTRIBUTION).unwrap().status, CheckStatus::Pass);
        assert_eq!(report.overall(), OverallStatus::Review);
    }

    #[test]
    fn test_failed_recompute_still_checks_stored() {
        let scored = compute_priority_scores(&inputs(), &MODEL);
        let stored = stored_from(&scored);
        let report = run_checks(Err(anyhow!("No planets meet")), Ok(stored), &MODEL);
        assert_eq!(report.get(COVERAGE).unwrap().status, CheckStatus::Fail);
        assert_eq!(report.get(COMPONENT_BOUNDS).unwrap().status, CheckStatus::Pass);
        assert_eq!(report.get(WEIGHTING).unwrap().status, CheckStatus::Pass);
        assert_eq!(report.get(BAND_DISTRIBUTION).unwrap().status, CheckStatus::Fail);
    }

    #[test]
    fn test_validate_priority_table_from_files() {
        let dir = std::env::temp_dir().join("habitable_priority_harness_files");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let catalog_path = dir.join("catalog.csv");
        std::fs::write(
            &catalog_path,
            "# comment\npl_name,hostname,default_flag,pl_eqt,pl_rade,pl_bmasse,pl_insol,pl_orbper,st_teff,st_rad,sy_vmag,sy_dist,sy_snum\nA b,Sun,1,288,1.0,1.0,1.0,365,5778,1.0,6,10,1\n",
        )
        .unwrap();
        let stored_path = dir.join("scores.csv");
        let ranked = rank_catalog_file(&catalog_path, &MODEL).unwrap();
        crate::output::write_score_table(&stored_path, &ranked.scored).unwrap();

        let report = validate_priority_table(&catalog_path, &stored_path, &MODEL);
        assert_eq!(report.overall(), OverallStatus::Pass);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
