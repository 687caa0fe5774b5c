pub mod config;
pub mod engine;
pub mod membership;
pub mod selector;
pub mod validation;

pub use config::*;
pub use engine::{
    compute_priority_scores, observability_score, priority_score, score_planet, system_score,
    transit_depth_ppm, PillarScores, PriorityBand, ScoredPlanet, SubScores,
};
pub use membership::{logistic_decreasing, logistic_increasing, trapezoidal, Trapezoid};
pub use selector::select_habitable_inputs;
pub use validation::validate_model;
