use serde::Serialize;

use super::membership::Trapezoid;

/// Inclusive plausibility range applied by the input selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Physical plausibility window for every field the selector checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlausibilityBounds {
    pub equilibrium_temp: Bounds,
    pub insolation: Bounds,
    pub radius: Bounds,
    pub filled_mass: Bounds,
    pub orbital_period: Bounds,
    pub stellar_teff: Bounds,
    pub stellar_radius: Bounds,
    pub vmag: Bounds,
    /// Upper limit only; the lower edge is exclusive (distance must be positive).
    pub max_distance_pc: f64,
}

/// Pillar weights for the aggregate priority score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarWeights {
    pub climate: f64,
    pub structure: f64,
    pub observability: f64,
    pub system: f64,
}

impl PillarWeights {
    pub fn total(&self) -> f64 {
        self.climate + self.structure + self.observability + self.system
    }
}

/// Sub-score weights inside the observability pillar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservabilityWeights {
    pub brightness: f64,
    pub transit: f64,
    pub distance: f64,
}

impl ObservabilityWeights {
    pub fn total(&self) -> f64 {
        self.brightness + self.transit + self.distance
    }
}

/// Climate pillar windows. The period window is in days; the engine applies
/// it on a log10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateWindows {
    pub temperature: Trapezoid,
    pub insolation: Trapezoid,
    pub period_days: Trapezoid,
    pub stellar_teff: Trapezoid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureWindows {
    pub radius: Trapezoid,
    pub mass: Trapezoid,
}

/// Logistic parameters for a single observability sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Logistic {
    pub midpoint: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservabilityCurves {
    /// Applied to log10(transit depth in ppm).
    pub transit_log_depth: Logistic,
    pub brightness_vmag: Logistic,
    /// Midpoint is a distance in parsecs; compared on a log10 scale.
    pub distance_midpoint_pc: f64,
    pub distance_log_width: f64,
    /// Depth floor before log10 is taken.
    pub min_depth_ppm: f64,
    /// Solar radius expressed in Earth radii.
    pub solar_to_earth_radius: f64,
}

/// System-simplicity penalty for multi-star systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemPenalty {
    pub per_extra_star: f64,
    pub floor: f64,
    pub ceiling: f64,
}

/// Proxy formulas used when a raw measurement is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImputationModel {
    /// Equilibrium temperature of an Earth analog receiving unit insolation.
    pub reference_eq_temp: f64,
    pub rocky_radius_limit: f64,
    pub rocky_exponent: f64,
    pub sub_neptune_coefficient: f64,
    pub sub_neptune_exponent: f64,
}

impl ImputationModel {
    pub fn insolation_from_eq_temp(&self, eq_temp: f64) -> f64 {
        (eq_temp / self.reference_eq_temp).powi(4)
    }

    pub fn mass_from_radius(&self, radius: f64) -> f64 {
        if radius <= self.rocky_radius_limit {
            radius.powf(self.rocky_exponent)
        } else {
            self.sub_neptune_coefficient * radius.powf(self.sub_neptune_exponent)
        }
    }
}

/// Lower edges of the "Follow-up" and "High Priority" bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandThresholds {
    pub follow_up: f64,
    pub high_priority: f64,
}

/// The complete, fixed habitability model.
///
/// Built once as [`MODEL`] and shared by reference. Changing any value here
/// is a model revision, not a runtime option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub bounds: PlausibilityBounds,
    pub imputation: ImputationModel,
    pub climate: ClimateWindows,
    pub structure: StructureWindows,
    pub observability: ObservabilityCurves,
    pub system: SystemPenalty,
    pub pillar_weights: PillarWeights,
    pub observability_weights: ObservabilityWeights,
    pub bands: BandThresholds,
}

pub const MODEL: ModelConfig = ModelConfig {
    bounds: PlausibilityBounds {
        equilibrium_temp: Bounds::new(150.0, 450.0),
        insolation: Bounds::new(0.1, 3.0),
        radius: Bounds::new(0.4, 3.5),
        filled_mass: Bounds::new(0.2, 15.0),
        orbital_period: Bounds::new(3.0, 800.0),
        stellar_teff: Bounds::new(3000.0, 7200.0),
        stellar_radius: Bounds::new(0.2, 2.5),
        vmag: Bounds::new(0.0, 18.0),
        max_distance_pc: 1000.0,
    },
    imputation: ImputationModel {
        reference_eq_temp: 255.0,
        rocky_radius_limit: 1.5,
        rocky_exponent: 3.7,
        sub_neptune_coefficient: 1.5,
        sub_neptune_exponent: 2.3,
    },
    climate: ClimateWindows {
        temperature: Trapezoid::new(180.0, 240.0, 320.0, 400.0),
        insolation: Trapezoid::new(0.2, 0.32, 1.7, 2.2),
        period_days: Trapezoid::new(15.0, 30.0, 400.0, 800.0),
        stellar_teff: Trapezoid::new(3300.0, 4100.0, 6400.0, 7200.0),
    },
    structure: StructureWindows {
        radius: Trapezoid::new(0.5, 0.85, 1.6, 2.5),
        mass: Trapezoid::new(0.3, 0.7, 5.0, 10.0),
    },
    observability: ObservabilityCurves {
        transit_log_depth: Logistic {
            midpoint: 2.6,
            width: 0.35,
        },
        brightness_vmag: Logistic {
            midpoint: 11.5,
            width: 1.2,
        },
        distance_midpoint_pc: 80.0,
        distance_log_width: 0.4,
        min_depth_ppm: 5.0,
        solar_to_earth_radius: 109.076,
    },
    system: SystemPenalty {
        per_extra_star: 0.25,
        floor: 0.45,
        ceiling: 0.85,
    },
    pillar_weights: PillarWeights {
        climate: 0.45,
        structure: 0.25,
        observability: 0.22,
        system: 0.08,
    },
    observability_weights: ObservabilityWeights {
        brightness: 0.40,
        transit: 0.35,
        distance: 0.25,
    },
    bands: BandThresholds {
        follow_up: 0.58,
        high_priority: 0.70,
    },
};

impl Default for ModelConfig {
    fn default() -> Self {
        MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pillar_weights_sum_to_one() {
        assert!((MODEL.pillar_weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_observability_weights_sum_to_one() {
        assert!((MODEL.observability_weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let b = Bounds::new(150.0, 450.0);
        assert!(b.contains(150.0));
        assert!(b.contains(450.0));
        assert!(!b.contains(149.999));
        assert!(!b.contains(450.001));
    }

    #[test]
    fn test_insolation_proxy_is_unity_at_reference() {
        let s = MODEL.imputation.insolation_from_eq_temp(255.0);
        assert!((s - 1.0).abs() < 1e-12);
        let hotter = MODEL.imputation.insolation_from_eq_temp(300.0);
        assert!((hotter - (300.0f64 / 255.0).powi(4)).abs() < 1e-12);
    }

    #[test]
    fn test_mass_proxy_switches_at_rocky_limit() {
        let rocky = MODEL.imputation.mass_from_radius(1.5);
        assert!((rocky - 1.5f64.powf(3.7)).abs() < 1e-12);
        let sub_neptune = MODEL.imputation.mass_from_radius(2.0);
        assert!((sub_neptune - 1.5 * 2.0f64.powf(2.3)).abs() < 1e-12);
    }

    #[test]
    fn test_default_is_model() {
        assert_eq!(ModelConfig::default(), MODEL);
    }
}
