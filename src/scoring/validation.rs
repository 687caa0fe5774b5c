use super::config::{Bounds, ModelConfig};
use super::membership::Trapezoid;

/// Sanity-check the model constants at startup.
/// Returns all problems at once (not just the first).
pub fn validate_model(model: &ModelConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let windows: [(&str, &Trapezoid); 6] = [
        ("climate.temperature", &model.climate.temperature),
        ("climate.insolation", &model.climate.insolation),
        ("climate.period_days", &model.climate.period_days),
        ("climate.stellar_teff", &model.climate.stellar_teff),
        ("structure.radius", &model.structure.radius),
        ("structure.mass", &model.structure.mass),
    ];
    for (name, w) in windows {
        if !(w.a <= w.b && w.b <= w.c && w.c <= w.d) || w.a >= w.d {
            errors.push(format!(
                "{}: window edges must satisfy a <= b <= c <= d with a < d (got {}, {}, {}, {})",
                name, w.a, w.b, w.c, w.d
            ));
        }
    }
    if model.climate.period_days.a <= 0.0 {
        errors.push("climate.period_days: edges must be positive for a log10 scale".to_string());
    }

    let bounds: [(&str, &Bounds); 8] = [
        ("bounds.equilibrium_temp", &model.bounds.equilibrium_temp),
        ("bounds.insolation", &model.bounds.insolation),
        ("bounds.radius", &model.bounds.radius),
        ("bounds.filled_mass", &model.bounds.filled_mass),
        ("bounds.orbital_period", &model.bounds.orbital_period),
        ("bounds.stellar_teff", &model.bounds.stellar_teff),
        ("bounds.stellar_radius", &model.bounds.stellar_radius),
        ("bounds.vmag", &model.bounds.vmag),
    ];
    for (name, b) in bounds {
        if b.min > b.max {
            errors.push(format!("{}: min {} exceeds max {}", name, b.min, b.max));
        }
    }
    if model.bounds.orbital_period.min <= 0.0 {
        errors.push("bounds.orbital_period: min must be positive".to_string());
    }

    let pillar = &model.pillar_weights;
    check_weights(
        "pillar_weights",
        &[pillar.climate, pillar.structure, pillar.observability, pillar.system],
        &mut errors,
    );
    let obs = &model.observability_weights;
    check_weights(
        "observability_weights",
        &[obs.brightness, obs.transit, obs.distance],
        &mut errors,
    );

    let curves = &model.observability;
    if curves.transit_log_depth.width <= 0.0
        || curves.brightness_vmag.width <= 0.0
        || curves.distance_log_width <= 0.0
    {
        errors.push("observability: logistic widths must be positive".to_string());
    }
    if curves.min_depth_ppm <= 0.0 || curves.distance_midpoint_pc <= 0.0 {
        errors.push("observability: depth floor and distance midpoint must be positive".to_string());
    }

    let system = &model.system;
    if system.floor > system.ceiling {
        errors.push(format!(
            "system: floor {} exceeds ceiling {}",
            system.floor, system.ceiling
        ));
    }

    let bands = &model.bands;
    if !(0.0 < bands.follow_up && bands.follow_up < bands.high_priority && bands.high_priority <= 1.0) {
        errors.push(format!(
            "bands: thresholds must satisfy 0 < follow_up < high_priority <= 1 (got {}, {})",
            bands.follow_up, bands.high_priority
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_weights(name: &str, weights: &[f64], errors: &mut Vec<String>) {
    if weights.iter().any(|w| *w < 0.0) {
        errors.push(format!("{}: weights must be non-negative", name));
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        errors.push(format!("{}: weights must have a positive sum", name));
    }
}
