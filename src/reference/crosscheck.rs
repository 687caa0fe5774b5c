use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::ReferenceCatalog;
use super::ReferenceSource;
use crate::scoring::{PriorityBand, ScoredPlanet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "Match")]
    Match,
    #[serde(rename = "Not in reference")]
    NotInReference,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Match => f.write_str("Match"),
            MatchStatus::NotInReference => f.write_str("Not in reference"),
        }
    }
}

/// A ranked planet joined against the authoritative list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossCheckedPlanet {
    pub pl_name: String,
    pub priority_score: f64,
    pub priority_band: PriorityBand,
    pub authoritative_match: MatchStatus,
    pub reference_confidence: Option<String>,
}

/// Join the ranking (or its best `top_k` rows) against the reference.
/// Output keeps rank order.
pub fn cross_check(
    scored: &[ScoredPlanet],
    reference: &ReferenceCatalog,
    top_k: Option<usize>,
) -> Vec<CrossCheckedPlanet> {
    let limit = top_k.unwrap_or(scored.len());
    scored
        .iter()
        .take(limit)
        .map(|planet| {
            let entry = reference.get(&planet.input.name);
            CrossCheckedPlanet {
                pl_name: planet.input.name.clone(),
                priority_score: planet.priority_score,
                priority_band: planet.priority_band,
                authoritative_match: if entry.is_some() {
                    MatchStatus::Match
                } else {
                    MatchStatus::NotInReference
                },
                reference_confidence: entry.and_then(|e| e.confidence.clone()),
            }
        })
        .collect()
}

/// `None` when the reference could not be obtained: the cross-check is
/// absent, not "nothing matched".
pub fn cross_check_source(
    scored: &[ScoredPlanet],
    source: &ReferenceSource,
    top_k: Option<usize>,
) -> Option<Vec<CrossCheckedPlanet>> {
    source
        .catalog()
        .map(|catalog| cross_check(scored, catalog, top_k))
}

/// Number of matched rows.
pub fn count_matches(rows: &[CrossCheckedPlanet]) -> usize {
    rows.iter()
        .filter(|r| r.authoritative_match == MatchStatus::Match)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SelectedInput;
    use crate::reference::ReferenceEntry;
    use crate::scoring::{compute_priority_scores, MODEL};

    fn input(name: &str, vmag: f64) -> SelectedInput {
        SelectedInput {
            name: name.to_string(),
            host: "Host".to_string(),
            eq_temp: 280.0,
            radius: 1.1,
            mass: Some(1.3),
            insolation: Some(0.9),
            orbital_period: 120.0,
            stellar_teff: 4800.0,
            stellar_radius: 0.7,
            vmag,
            distance_pc: 30.0,
            star_count: 1,
            effective_insolation: 0.9,
            filled_mass: 1.3,
        }
    }

    fn scored() -> Vec<ScoredPlanet> {
        compute_priority_scores(
            &[input("Alpha b", 8.0), input("Beta c", 10.0), input("Gamma d", 12.0)],
            &MODEL,
        )
    }

    fn reference() -> ReferenceCatalog {
        ReferenceCatalog::from_entries(vec![
            ReferenceEntry {
                name: "Alpha b".to_string(),
                confidence: Some("Conservative".to_string()),
            },
            ReferenceEntry {
                name: "Gamma d".to_string(),
                confidence: None,
            },
        ])
    }

    #[test]
    fn test_match_and_not_in_reference() {
        let rows = cross_check(&scored(), &reference(), None);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].pl_name, "Alpha b");
        assert_eq!(rows[0].authoritative_match, MatchStatus::Match);
        assert_eq!(rows[0].reference_confidence.as_deref(), Some("Conservative"));
        assert_eq!(rows[1].authoritative_match, MatchStatus::NotInReference);
        assert!(rows[1].reference_confidence.is_none());
        assert_eq!(rows[2].authoritative_match, MatchStatus::Match);
        assert_eq!(count_matches(&rows), 2);
    }

    #[test]
    fn test_top_k_shortlist() {
        let rows = cross_check(&scored(), &reference(), Some(2));
        assert_eq!(rows.len(), 2);
        assert_eq!(count_matches(&rows), 1);
    }

    #[test]
    fn test_unavailable_reference_is_absent() {
        let source = ReferenceSource::Unavailable {
            reason: "offline".to_string(),
        };
        assert!(cross_check_source(&scored(), &source, None).is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MatchStatus::Match.to_string(), "Match");
        assert_eq!(MatchStatus::NotInReference.to_string(), "Not in reference");
    }
}
