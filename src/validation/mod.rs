//! Consistency checks that recompute the ranking and compare it with a
//! stored scored table.

pub mod checks;

pub use checks::{
    run_checks, validate_priority_table, BAND_DISTRIBUTION, BAND_EQUALITY, COMPONENT_BOUNDS,
    COMPONENT_CEILING, COVERAGE, SCORE_EQUALITY, SCORE_TOLERANCE, WEIGHTING,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => f.write_str("pass"),
            CheckStatus::Fail => f.write_str("fail"),
            CheckStatus::Warn => f.write_str("warn"),
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub name: String,
    pub status: CheckStatus,
    pub details: String,
}

impl ValidationRecord {
    pub fn new(name: &str, status: CheckStatus, details: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "REVIEW")]
    Review,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Pass => f.write_str("PASS"),
            OverallStatus::Review => f.write_str("REVIEW"),
        }
    }
}

/// Ordered check results plus the overall verdict: PASS only when every
/// check passed. A warning is enough to ask for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    overall: OverallStatus,
    checks: Vec<ValidationRecord>,
}

impl ValidationReport {
    pub fn new(checks: Vec<ValidationRecord>) -> Self {
        let overall = if checks.iter().all(|c| c.status == CheckStatus::Pass) {
            OverallStatus::Pass
        } else {
            OverallStatus::Review
        };
        Self {
            generated_at: Utc::now(),
            overall,
            checks,
        }
    }

    pub fn overall(&self) -> OverallStatus {
        self.overall
    }

    pub fn checks(&self) -> &[ValidationRecord] {
        &self.checks
    }

    pub fn get(&self, name: &str) -> Option<&ValidationRecord> {
        self.checks.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_pass_only_when_all_pass() {
        let all_pass = ValidationReport::new(vec![
            ValidationRecord::new("a", CheckStatus::Pass, ""),
            ValidationRecord::new("b", CheckStatus::Pass, ""),
        ]);
        assert_eq!(all_pass.overall(), OverallStatus::Pass);

        let warned = ValidationReport::new(vec![
            ValidationRecord::new("a", CheckStatus::Pass, ""),
            ValidationRecord::new("b", CheckStatus::Warn, ""),
        ]);
        assert_eq!(warned.overall(), OverallStatus::Review);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ValidationReport::new(vec![ValidationRecord::new(
            "Priority score equality",
            CheckStatus::Fail,
            "Max |delta| = 1.00e-3",
        )]);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overall"], "REVIEW");
        assert_eq!(json["checks"][0]["name"], "Priority score equality");
        assert_eq!(json["checks"][0]["status"], "fail");
        assert!(json["generated_at"].is_string());
    }
}
