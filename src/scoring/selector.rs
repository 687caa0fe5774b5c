use anyhow::{bail, Result};
use std::collections::HashSet;

use super::config::ModelConfig;
use crate::catalog::{PlanetRecord, SelectedInput};

/// Reduce a raw catalog to complete, physically plausible planets.
///
/// Missing insolation and mass are replaced by proxy values before the
/// plausibility bounds are checked. Planet names are kept unique (first
/// occurrence wins). An empty result is an error: the pipeline must not
/// continue with nothing to score.
pub fn select_habitable_inputs(
    records: &[PlanetRecord],
    model: &ModelConfig,
) -> Result<Vec<SelectedInput>> {
    let mut seen_names = HashSet::new();
    let selected: Vec<SelectedInput> = records
        .iter()
        .filter_map(|record| complete_input(record, model))
        .filter(|input| is_plausible(input, model))
        .filter(|input| seen_names.insert(input.name.clone()))
        .collect();

    if selected.is_empty() {
        bail!(
            "No planets meet the habitable input criteria ({} catalog rows examined); review filtering thresholds",
            records.len()
        );
    }

    Ok(selected)
}

/// Build a `SelectedInput` if every required field is present.
fn complete_input(record: &PlanetRecord, model: &ModelConfig) -> Option<SelectedInput> {
    let name = record.name.as_deref()?.trim();
    let host = record.host.as_deref()?.trim();
    if name.is_empty() || host.is_empty() {
        return None;
    }

    let eq_temp = record.eq_temp?;
    let radius = record.radius?;
    let orbital_period = record.orbital_period?;
    let stellar_teff = record.stellar_teff?;
    let stellar_radius = record.stellar_radius?;
    let vmag = record.vmag?;
    let distance_pc = record.distance_pc?;
    let star_count = record.star_count?;

    let effective_insolation = record
        .insolation
        .unwrap_or_else(|| model.imputation.insolation_from_eq_temp(eq_temp));
    let filled_mass = record
        .mass
        .unwrap_or_else(|| model.imputation.mass_from_radius(radius));

    Some(SelectedInput {
        name: name.to_string(),
        host: host.to_string(),
        eq_temp,
        radius,
        mass: record.mass,
        insolation: record.insolation,
        orbital_period,
        stellar_teff,
        stellar_radius,
        vmag,
        distance_pc,
        star_count,
        effective_insolation,
        filled_mass,
    })
}

fn is_plausible(input: &SelectedInput, model: &ModelConfig) -> bool {
    let b = &model.bounds;
    b.equilibrium_temp.contains(input.eq_temp)
        && b.insolation.contains(input.effective_insolation)
        && b.radius.contains(input.radius)
        && b.filled_mass.contains(input.filled_mass)
        && b.orbital_period.contains(input.orbital_period)
        && b.stellar_teff.contains(input.stellar_teff)
        && b.stellar_radius.contains(input.stellar_radius)
        && b.vmag.contains(input.vmag)
        && input.distance_pc > 0.0
        && input.distance_pc <= b.max_distance_pc
}
