use serde::{Deserialize, Serialize};

/// One catalog row for a confirmed planet (canonical solution only).
///
/// Every measurement is optional here; the input selector decides which rows
/// are complete enough to score.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlanetRecord {
    #[serde(rename = "pl_name", default)]
    pub name: Option<String>,
    #[serde(rename = "hostname", default)]
    pub host: Option<String>,
    #[serde(rename = "pl_eqt", default)]
    pub eq_temp: Option<f64>,    // K
    #[serde(rename = "pl_rade", default)]
    pub radius: Option<f64>,     // Earth radii
    #[serde(rename = "pl_bmasse", default)]
    pub mass: Option<f64>,       // Earth masses
    #[serde(rename = "pl_insol", default)]
    pub insolation: Option<f64>, // Earth flux
    #[serde(rename = "pl_orbper", default)]
    pub orbital_period: Option<f64>, // days
    #[serde(rename = "st_teff", default)]
    pub stellar_teff: Option<f64>,   // K
    #[serde(rename = "st_rad", default)]
    pub stellar_radius: Option<f64>, // solar radii
    #[serde(rename = "sy_vmag", default)]
    pub vmag: Option<f64>,
    #[serde(rename = "sy_dist", default)]
    pub distance_pc: Option<f64>,
    #[serde(rename = "sy_snum", default)]
    pub star_count: Option<u32>,
}

/// A complete, plausible planet ready for scoring.
///
/// `effective_insolation` and `filled_mass` carry the raw measurement when it
/// exists and a proxy value otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedInput {
    pub name: String,
    pub host: String,
    pub eq_temp: f64,
    pub radius: f64,
    pub mass: Option<f64>,
    pub insolation: Option<f64>,
    pub orbital_period: f64,
    pub stellar_teff: f64,
    pub stellar_radius: f64,
    pub vmag: f64,
    pub distance_pc: f64,
    pub star_count: u32,
    pub effective_insolation: f64,
    pub filled_mass: f64,
}

impl SelectedInput {
    pub fn insolation_imputed(&self) -> bool {
        self.insolation.is_none()
    }

    pub fn mass_imputed(&self) -> bool {
        self.mass.is_none()
    }
}
