//! Discovery and detail resolution - read-only API calls

use crate::error::{Error, Result};
use crate::group::plan::GroupPlan;
use crate::platform::PlatformService;
use crate::types::{PlatformConfig, PullRequestRef, SearchMatch};
use tracing::{debug, warn};

/// Build the search expression for open PRs carrying `label`
///
/// Labels with whitespace or commas are quoted so they match as one label.
pub fn search_query(label: &str, repo: &PlatformConfig) -> String {
    let label = if label.contains(|c: char| c.is_whitespace() || c == ',') {
        format!("\"{label}\"")
    } else {
        label.to_string()
    };
    format!("is:pr label:{label} repo:{} state:open", repo.slug())
}

/// Search for open PRs carrying `label`, newest first
pub async fn discover_matches(
    platform: &dyn PlatformService,
    label: &str,
) -> Result<Vec<SearchMatch>> {
    let query = search_query(label, platform.config());
    debug!(%query, "discovering labeled pull requests");

    let results = platform
        .search_pull_requests(&query)
        .await
        .map_err(|e| Error::Discovery(e.to_string()))?;

    let fetched = results.items.len() as u64;
    if results.total_count > fetched {
        warn!(
            total = results.total_count,
            fetched, "more labeled pull requests than one search page; grouping the newest"
        );
    }

    Ok(results.items)
}

/// Fetch head branches for every planned member, in plan order
///
/// The first failure aborts; nothing is merged with a partial group.
pub async fn resolve_members(
    platform: &dyn PlatformService,
    plan: &GroupPlan,
) -> Result<Vec<PullRequestRef>> {
    let mut resolved = Vec::with_capacity(plan.members.len());

    for member in &plan.members {
        let pr = platform
            .get_pull_request(member.number)
            .await
            .map_err(|e| Error::Resolution {
                number: member.number,
                message: e.to_string(),
            })?;
        debug!(number = pr.number, head_ref = %pr.head_ref, "resolved {member}");
        resolved.push(pr);
    }

    Ok(resolved)
}
