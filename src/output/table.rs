use serde::{Deserialize, Serialize};

use crate::scoring::{PriorityBand, ScoredPlanet};

/// One row of the exported scored table.
///
/// Flat so it round-trips through CSV; the validation harness reads stored
/// tables back into this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub pl_name: String,
    pub hostname: String,
    pub pl_eqt: f64,
    pub pl_rade: f64,
    pub pl_bmasse: Option<f64>,
    pub pl_insol: Option<f64>,
    pub pl_orbper: f64,
    pub st_teff: f64,
    pub st_rad: f64,
    pub sy_vmag: f64,
    pub sy_dist: f64,
    pub sy_snum: u32,
    pub effective_insolation: f64,
    pub filled_mass: f64,
    pub insolation_imputed: bool,
    pub mass_imputed: bool,
    pub transit_depth_ppm: f64,
    pub temp_score: f64,
    pub insolation_score: f64,
    pub period_score: f64,
    pub stellar_temp_score: f64,
    pub radius_score: f64,
    pub mass_score: f64,
    pub brightness_score: f64,
    pub transit_score: f64,
    pub distance_score: f64,
    pub climate_score: f64,
    pub structure_score: f64,
    pub observability_score: f64,
    pub system_score: f64,
    pub priority_score: f64,
    pub priority_band: PriorityBand,
}

impl ScoreRow {
    /// Every sub-score and pillar score, labelled, for bound checks.
    pub fn components(&self) -> [(&'static str, f64); 13] {
        [
            ("temp_score", self.temp_score),
            ("insolation_score", self.insolation_score),
            ("period_score", self.period_score),
            ("stellar_temp_score", self.stellar_temp_score),
            ("radius_score", self.radius_score),
            ("mass_score", self.mass_score),
            ("brightness_score", self.brightness_score),
            ("transit_score", self.transit_score),
            ("distance_score", self.distance_score),
            ("climate_score", self.climate_score),
            ("structure_score", self.structure_score),
            ("observability_score", self.observability_score),
            ("system_score", self.system_score),
        ]
    }
}

impl From<&ScoredPlanet> for ScoreRow {
    fn from(planet: &ScoredPlanet) -> Self {
        let input = &planet.input;
        let sub = &planet.sub_scores;
        let pillars = &planet.pillars;
        Self {
            pl_name: input.name.clone(),
            hostname: input.host.clone(),
            pl_eqt: input.eq_temp,
            pl_rade: input.radius,
            pl_bmasse: input.mass,
            pl_insol: input.insolation,
            pl_orbper: input.orbital_period,
            st_teff: input.stellar_teff,
            st_rad: input.stellar_radius,
            sy_vmag: input.vmag,
            sy_dist: input.distance_pc,
            sy_snum: input.star_count,
            effective_insolation: input.effective_insolation,
            filled_mass: input.filled_mass,
            insolation_imputed: input.insolation_imputed(),
            mass_imputed: input.mass_imputed(),
            transit_depth_ppm: planet.transit_depth_ppm,
            temp_score: sub.temperature,
            insolation_score: sub.insolation,
            period_score: sub.period,
            stellar_temp_score: sub.stellar_temp,
            radius_score: sub.radius,
            mass_score: sub.mass,
            brightness_score: sub.brightness,
            transit_score: sub.transit,
            distance_score: sub.distance,
            climate_score: pillars.climate,
            structure_score: pillars.structure,
            observability_score: pillars.observability,
            system_score: pillars.system,
            priority_score: planet.priority_score,
            priority_band: planet.priority_band,
        }
    }
}
