use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG: &str = "PS_2025.09.20_08.15.55.csv";
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_REFERENCE_URL: &str =
    "https://phl.upr.edu/projects/habitable-exoplanets-catalog/data/habitable_exoplanets_catalog.csv";
pub const DEFAULT_REFERENCE_CACHE: &str = "data/authoritative_habitable_sample.csv";
pub const DEFAULT_TIMEOUT: &str = "15s";
pub const DEFAULT_USER_AGENT: &str = "CDC-Project/1.0";

/// Run configuration. Every field is optional; see the accessors for defaults.
///
/// Example YAML:
/// ```yaml
/// catalog: data/PS_2025.09.20_08.15.55.csv
/// results_dir: results
/// top_n: 20
/// crosscheck_top_k: 50
/// reference:
///   cache_path: data/authoritative_habitable_sample.csv
///   timeout: 15s
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Planetary-systems catalog export (CSV with `#` comment lines)
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Directory receiving the scored table, excerpts and reports
    #[serde(default)]
    pub results_dir: Option<PathBuf>,

    /// Rows in the human-readable excerpt
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Cross-check only the best K planets (default: all)
    #[serde(default)]
    pub crosscheck_top_k: Option<usize>,

    #[serde(default)]
    pub reference: Option<ReferenceConfig>,
}

/// Where the authoritative habitable-planet list comes from.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub url: Option<String>,

    /// Local copy used offline and after a failed fetch
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Fetch timeout, e.g. "15s" or "1m"
    #[serde(default)]
    pub timeout: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Config {
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }

    pub fn results_dir(&self) -> PathBuf {
        self.results_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR))
    }

    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    /// Reference settings with defaults filled in.
    pub fn reference(&self) -> Result<ResolvedReference> {
        let r = self.reference.clone().unwrap_or_default();
        let timeout_str = r.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT);
        let timeout = humantime::parse_duration(timeout_str)
            .with_context(|| format!("reference.timeout: invalid duration '{}'", timeout_str))?;
        Ok(ResolvedReference {
            url: r.url.unwrap_or_else(|| DEFAULT_REFERENCE_URL.to_string()),
            cache_path: r
                .cache_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE_CACHE)),
            timeout,
            user_agent: r
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Check values that serde cannot. Returns all errors at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.top_n == Some(0) {
            errors.push("top_n: must be at least 1".to_string());
        }
        if self.crosscheck_top_k == Some(0) {
            errors.push("crosscheck_top_k: must be at least 1".to_string());
        }
        if let Err(e) = self.reference() {
            errors.push(format!("{:#}", e));
        }
        if let Some(url) = self.reference.as_ref().and_then(|r| r.url.as_deref()) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("reference.url: expected an http(s) URL, got '{}'", url));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReference {
    pub url: String,
    pub cache_path: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from(DEFAULT_CATALOG));
        assert_eq!(config.results_dir(), PathBuf::from("results"));
        assert_eq!(config.top_n(), 20);
        assert!(config.crosscheck_top_k.is_none());

        let reference = config.reference().unwrap();
        assert_eq!(reference.timeout, Duration::from_secs(15));
        assert_eq!(reference.user_agent, "CDC-Project/1.0");
        assert_eq!(reference.url, DEFAULT_REFERENCE_URL);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
catalog: data/ps.csv
results_dir: out
top_n: 10
crosscheck_top_k: 50
reference:
  url: "https://example.org/hec.csv"
  cache_path: cache/hec.csv
  timeout: 30s
  user_agent: test-agent
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from("data/ps.csv"));
        assert_eq!(config.top_n(), 10);
        assert_eq!(config.crosscheck_top_k, Some(50));
        let reference = config.reference().unwrap();
        assert_eq!(reference.url, "https://example.org/hec.csv");
        assert_eq!(reference.cache_path, PathBuf::from("cache/hec.csv"));
        assert_eq!(reference.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("weights: {climate: 1.0}");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = Config {
            top_n: Some(0),
            reference: Some(ReferenceConfig {
                timeout: Some("soon".to_string()),
                url: Some("ftp://example.org".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("top_n"));
        assert!(errors[1].contains("reference.timeout"));
        assert!(errors[2].contains("reference.url"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config {
            top_n: Some(5),
            ..Default::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
