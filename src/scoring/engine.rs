use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::{ModelConfig, ObservabilityWeights, PillarWeights};
use super::membership::{logistic_decreasing, logistic_increasing};
use crate::catalog::SelectedInput;

/// Discrete priority label derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityBand {
    #[serde(rename = "Context")]
    Context,
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "High Priority")]
    HighPriority,
}

impl PriorityBand {
    /// Lower edges are inclusive: exactly `follow_up` bands as Follow-up and
    /// exactly `high_priority` as High Priority.
    pub fn from_score(score: f64, model: &ModelConfig) -> Self {
        if score >= model.bands.high_priority {
            PriorityBand::HighPriority
        } else if score >= model.bands.follow_up {
            PriorityBand::FollowUp
        } else {
            PriorityBand::Context
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityBand::Context => "Context",
            PriorityBand::FollowUp => "Follow-up",
            PriorityBand::HighPriority => "High Priority",
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    // climate
    pub temperature: f64,
    pub insolation: f64,
    pub period: f64,
    pub stellar_temp: f64,
    // structure
    pub radius: f64,
    pub mass: f64,
    // observability
    pub brightness: f64,
    pub transit: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarScores {
    pub climate: f64,
    pub structure: f64,
    pub observability: f64,
    pub system: f64,
}

/// A selected planet with its full score breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlanet {
    pub input: SelectedInput,
    pub transit_depth_ppm: f64,
    pub sub_scores: SubScores,
    pub pillars: PillarScores,
    pub priority_score: f64,
    pub priority_band: PriorityBand,
}

/// Score and band every selected planet, highest priority first.
///
/// Pure function of its inputs; ties keep their input order.
pub fn compute_priority_scores(inputs: &[SelectedInput], model: &ModelConfig) -> Vec<ScoredPlanet> {
    let mut scored: Vec<ScoredPlanet> = inputs
        .iter()
        .map(|input| score_planet(input, model))
        .collect();

    // sort_by is stable, so equal scores stay in catalog order
    scored.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored
}

pub fn score_planet(input: &SelectedInput, model: &ModelConfig) -> ScoredPlanet {
    let climate = &model.climate;
    let temperature = climate.temperature.membership(input.eq_temp);
    let insolation = climate.insolation.membership(input.effective_insolation);
    let period = climate
        .period_days
        .log10()
        .membership(input.orbital_period.log10());
    let stellar_temp = climate.stellar_teff.membership(input.stellar_teff);

    let radius = model.structure.radius.membership(input.radius);
    let mass = model.structure.mass.membership(input.filled_mass);

    let curves = &model.observability;
    let transit_depth_ppm = transit_depth_ppm(input.radius, input.stellar_radius, model);
    let transit = logistic_increasing(
        transit_depth_ppm.max(curves.min_depth_ppm).log10(),
        curves.transit_log_depth.midpoint,
        curves.transit_log_depth.width,
    );
    let brightness = logistic_decreasing(
        input.vmag,
        curves.brightness_vmag.midpoint,
        curves.brightness_vmag.width,
    );
    let distance = logistic_decreasing(
        input.distance_pc.log10(),
        curves.distance_midpoint_pc.log10(),
        curves.distance_log_width,
    );

    let sub_scores = SubScores {
        temperature,
        insolation,
        period,
        stellar_temp,
        radius,
        mass,
        brightness,
        transit,
        distance,
    };

    let pillars = PillarScores {
        climate: (temperature + insolation + period + stellar_temp) / 4.0,
        structure: (radius + mass) / 2.0,
        observability: observability_score(brightness, transit, distance, &model.observability_weights),
        system: system_score(input.star_count, model),
    };

    let priority_score = priority_score(&pillars, &model.pillar_weights);

    ScoredPlanet {
        input: input.clone(),
        transit_depth_ppm,
        sub_scores,
        pillars,
        priority_score,
        priority_band: PriorityBand::from_score(priority_score, model),
    }
}

/// Transit depth in parts per million from the planet/star radius ratio.
pub fn transit_depth_ppm(radius_earth: f64, stellar_radius_solar: f64, model: &ModelConfig) -> f64 {
    let ratio = radius_earth / (stellar_radius_solar * model.observability.solar_to_earth_radius);
    ratio.powi(2) * 1e6
}

/// Weighted mean of the observability sub-scores.
pub fn observability_score(
    brightness: f64,
    transit: f64,
    distance: f64,
    weights: &ObservabilityWeights,
) -> f64 {
    (brightness * weights.brightness + transit * weights.transit + distance * weights.distance)
        / weights.total()
}

/// Weighted mean of the four pillars.
pub fn priority_score(pillars: &PillarScores, weights: &PillarWeights) -> f64 {
    (pillars.climate * weights.climate
        + pillars.structure * weights.structure
        + pillars.observability * weights.observability
        + pillars.system * weights.system)
        / weights.total()
}

/// 1.0 for a single star, then a clipped linear penalty per extra star.
pub fn system_score(star_count: u32, model: &ModelConfig) -> f64 {
    if star_count <= 1 {
        return 1.0;
    }
    let penalty = &model.system;
    (1.0 - penalty.per_extra_star * f64::from(star_count - 1)).clamp(penalty.floor, penalty.ceiling)
}
