use anyhow::{Context, Result};

use crate::config::ResolvedReference;

/// Download the authoritative catalog as CSV text.
///
/// Bounded by the configured timeout; any transport or HTTP status error is
/// returned to the caller, which decides on the fallback.
pub async fn fetch_reference_csv(reference: &ResolvedReference) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(reference.timeout)
        .user_agent(reference.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(&reference.url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch reference catalog from {}", reference.url))?
        .error_for_status()
        .context("Reference catalog request was rejected")?;

    response
        .text()
        .await
        .context("Failed to read reference catalog body")
}
