use anyhow::{Context, Result};
use tracing::info;

/// Fetch the raw HTML of one item page. Network failure means no record at
/// all; everything past this point is best-effort.
pub async fn fetch_html(url: &str) -> Result<String> {
    let client = reqwest::Client::new();

    info!("Fetching page: {}", url);
    let html = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Failed to fetch {url}"))?
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))?;

    Ok(html)
}
