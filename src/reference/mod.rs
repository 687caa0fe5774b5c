//! Authoritative reference catalog: remote fetch, local cache, cross-check.
//!
//! Resolution is a three-way decision: a successful download wins and is
//! cached, any download problem falls back to the local copy, and with no
//! local copy the reference is unavailable and the cross-check is skipped.

pub mod cache;
pub mod catalog;
pub mod crosscheck;
pub mod fetch;

pub use cache::{clear_cache, FetchRecord, ReferenceCache};
pub use catalog::{normalize_name, ReferenceCatalog, ReferenceEntry};
pub use crosscheck::{count_matches, cross_check, cross_check_source, CrossCheckedPlanet, MatchStatus};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::ResolvedReference;
use crate::{log_info, log_warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceSource {
    /// Freshly downloaded (and written to the local cache).
    Remote(ReferenceCatalog),
    /// Local copy; `fetched_at` is known when this machine downloaded it.
    Cached {
        catalog: ReferenceCatalog,
        fetched_at: Option<DateTime<Utc>>,
    },
    Unavailable { reason: String },
}

impl ReferenceSource {
    pub fn catalog(&self) -> Option<&ReferenceCatalog> {
        match self {
            ReferenceSource::Remote(catalog) => Some(catalog),
            ReferenceSource::Cached { catalog, .. } => Some(catalog),
            ReferenceSource::Unavailable { .. } => None,
        }
    }

    /// One-line provenance for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            ReferenceSource::Remote(catalog) => {
                format!("remote download ({} planets)", catalog.len())
            }
            ReferenceSource::Cached {
                catalog,
                fetched_at: Some(at),
            } => format!(
                "local cache fetched {} ({} planets)",
                at.format("%Y-%m-%d %H:%M UTC"),
                catalog.len()
            ),
            ReferenceSource::Cached {
                catalog,
                fetched_at: None,
            } => format!("local cache ({} planets)", catalog.len()),
            ReferenceSource::Unavailable { reason } => format!("unavailable: {}", reason),
        }
    }
}

/// Fetch the reference catalog (unless `offline`) and resolve it against
/// the local cache. Never fails: problems degrade to the next branch.
pub async fn load_reference(reference: &ResolvedReference, offline: bool) -> ReferenceSource {
    let cache = ReferenceCache::new(reference.cache_path.clone());
    let remote = if offline {
        log_info!("Offline: skipping reference download");
        None
    } else {
        log_info!("Fetching reference catalog from {}", reference.url);
        Some(fetch::fetch_reference_csv(reference).await)
    };
    resolve_reference(remote, &cache, &reference.url)
}

/// Decide between a downloaded body, the local cache, and nothing.
///
/// `remote` is `None` when no download was attempted.
pub fn resolve_reference(
    remote: Option<Result<String>>,
    cache: &ReferenceCache,
    url: &str,
) -> ReferenceSource {
    match remote {
        Some(Ok(body)) => match ReferenceCatalog::parse_csv(body.as_bytes()) {
            Ok(catalog) => {
                if let Err(e) = cache.store(&body) {
                    log_warn!("Could not cache reference catalog: {:#}", e);
                }
                let record = FetchRecord {
                    url: url.to_string(),
                    fetched_at: Utc::now().timestamp(),
                    rows: catalog.len(),
                };
                if let Err(e) = cache.write_fetch_record(&record) {
                    log_warn!("Could not record reference fetch metadata: {:#}", e);
                }
                return ReferenceSource::Remote(catalog);
            }
            Err(e) => {
                log_warn!(
                    "Reference download was malformed ({:#}); falling back to local cache",
                    e
                );
            }
        },
        Some(Err(e)) => {
            log_warn!(
                "Reference download failed ({:#}); falling back to local cache",
                e
            );
        }
        None => {}
    }

    match cache.load() {
        Ok(Some(catalog)) => {
            let fetched_at = cache
                .read_fetch_record()
                .and_then(|r| DateTime::<Utc>::from_timestamp(r.fetched_at, 0));
            ReferenceSource::Cached {
                catalog,
                fetched_at,
            }
        }
        Ok(None) => ReferenceSource::Unavailable {
            reason: format!("no local copy at {}", cache.csv_path.display()),
        },
        Err(e) => {
            log_warn!("Reference cache unusable: {:#}", e);
            ReferenceSource::Unavailable {
                reason: format!("{:#}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SelectedInput;
    use crate::scoring::{compute_priority_scores, ScoredPlanet, MODEL};
    use anyhow::anyhow;
    use std::env;

    fn scored(names: &[&str]) -> Vec<ScoredPlanet> {
        let inputs: Vec<SelectedInput> = names
            .iter()
            .map(|name| SelectedInput {
                name: name.to_string(),
                host: "Host".to_string(),
                eq_temp: 270.0,
                radius: 1.1,
                mass: Some(1.2),
                insolation: Some(0.9),
                orbital_period: 37.4,
                stellar_teff: 3480.0,
                stellar_radius: 0.42,
                vmag: 13.1,
                distance_pc: 31.1,
                star_count: 1,
                effective_insolation: 0.9,
                filled_mass: 1.2,
            })
            .collect();
        compute_priority_scores(&inputs, &MODEL)
    }

    fn temp_cache(tag: &str) -> ReferenceCache {
        let root = env::temp_dir().join(format!("habitable_priority_resolve_{}", tag));
        let _ = std::fs::remove_dir_all(&root);
        ReferenceCache {
            csv_path: root.join("reference.csv"),
            meta_dir: root.join("meta"),
        }
    }

    fn cleanup(cache: &ReferenceCache) {
        if let Some(root) = cache.csv_path.parent() {
            let _ = std::fs::remove_dir_all(root);
        }
    }

    #[test]
    fn test_remote_success_is_cached() {
        let cache = temp_cache("remote");
        let body = "pl_name,confidence\nKepler-1649 c,Optimistic\n".to_string();
        let source = resolve_reference(Some(Ok(body)), &cache, "https://example.org/hec.csv");
        match &source {
            ReferenceSource::Remote(catalog) => assert!(catalog.contains("Kepler-1649 c")),
            other => panic!("expected remote, got {:?}", other),
        }
        assert!(cache.csv_path.exists());
        assert_eq!(cache.read_fetch_record().map(|r| r.rows), Some(1));
        cleanup(&cache);
    }

    #[test]
    fn test_connection_error_falls_back_to_cache() {
        let cache = temp_cache("fallback");
        cache.store("pl_name\nTOI-700 d\n").unwrap();
        let source = resolve_reference(
            Some(Err(anyhow!("connection refused"))),
            &cache,
            "https://example.org/hec.csv",
        );
        match &source {
            ReferenceSource::Cached { catalog, .. } => assert!(catalog.contains("TOI-700 d")),
            other => panic!("expected cached, got {:?}", other),
        }
        assert!(source.describe().starts_with("local cache"));

        let rows = cross_check_source(&scored(&["TOI-700 d", "Wolf 1061 c"]), &source, None)
            .expect("cached reference allows a cross-check");
        assert_eq!(rows.len(), 2);
        let status = |name: &str| {
            rows.iter()
                .find(|r| r.pl_name == name)
                .map(|r| r.authoritative_match)
        };
        assert_eq!(status("TOI-700 d"), Some(MatchStatus::Match));
        assert_eq!(status("Wolf 1061 c"), Some(MatchStatus::NotInReference));
        cleanup(&cache);
    }

    #[test]
    fn test_malformed_body_falls_back_to_cache() {
        let cache = temp_cache("malformed");
        cache.store("pl_name\nGJ 1002 b\n").unwrap();
        let source = resolve_reference(
            Some(Ok("<html>rate limited</html>".to_string())),
            &cache,
            "https://example.org/hec.csv",
        );
        assert!(matches!(source, ReferenceSource::Cached { .. }));
        // The bad body must not overwrite the good cache
        assert!(cache.load().unwrap().unwrap().contains("GJ 1002 b"));
        cleanup(&cache);
    }

    #[test]
    fn test_empty_download_keeps_cache() {
        let cache = temp_cache("empty_body");
        cache.store("pl_name\nTOI-700 d\nK2-18 b\n").unwrap();
        let source = resolve_reference(
            Some(Ok("pl_name\n".to_string())),
            &cache,
            "https://example.org/hec.csv",
        );
        match &source {
            ReferenceSource::Cached { catalog, .. } => assert_eq!(catalog.len(), 2),
            other => panic!("expected cached, got {:?}", other),
        }
        let after = cache.load().unwrap().unwrap();
        assert!(after.contains("TOI-700 d"));
        assert!(after.contains("K2-18 b"));
        cleanup(&cache);
    }

    #[test]
    fn test_no_cache_is_unavailable() {
        let cache = temp_cache("nothing");
        let source = resolve_reference(
            Some(Err(anyhow!("timed out"))),
            &cache,
            "https://example.org/hec.csv",
        );
        assert!(source.catalog().is_none());
        assert!(source.describe().starts_with("unavailable"));
    }

    #[test]
    fn test_offline_uses_cache_only() {
        let cache = temp_cache("offline");
        cache.store("pl_name\nRoss 128 b\n").unwrap();
        let source = resolve_reference(None, &cache, "https://example.org/hec.csv");
        assert!(source.catalog().unwrap().contains("Ross 128 b"));
        cleanup(&cache);
    }
}
