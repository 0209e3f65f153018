//! HTTP list queries.

use anyhow::Result;

/// GET `path` on the SDK server and split the comma-joined body.
pub async fn fetch_list(base_url: &str, path: &str) -> Result<Vec<String>> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);
    let res = reqwest::get(&url).await?;
    if !res.status().is_success() {
        anyhow::bail!("{} returned {}", url, res.status());
    }
    let body = res.text().await?;
    Ok(split_list(&body).into_iter().map(String::from).collect())
}

/// Comma-joined list → entries, ignoring empty segments.
pub fn split_list(body: &str) -> Vec<&str> {
    body.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
