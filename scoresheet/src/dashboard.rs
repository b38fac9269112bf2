use crate::{config::Backend, console::render};
use handball_common::stats_api::{ApiResult, MatchSummary, StatsApiClient};
use log::*;

/// Fetches the match list once. Any failure is logged and gives an empty list.
pub async fn fetch_matches(backend: &Backend, require_https: bool) -> Vec<MatchSummary> {
    match try_fetch(backend, require_https).await {
        Ok(matches) => matches,
        Err(e) => {
            error!("Could not load matches from {}: {e}", backend.url);
            Vec::new()
        }
    }
}

async fn try_fetch(backend: &Backend, require_https: bool) -> ApiResult<Vec<MatchSummary>> {
    let client = StatsApiClient::new(
        &backend.url,
        backend.token(),
        require_https,
        backend.timeout(),
    )?;
    info!("Requesting matches from {}", client.matches_url());
    client.list_matches().await
}

pub async fn show(backend: &Backend, require_https: bool) -> String {
    render::dashboard(&fetch_matches(backend, require_https).await)
}
