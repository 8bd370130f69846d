//! Status comments on the triggering pull request

use crate::platform::PlatformService;
use crate::types::PullRequestRef;
use std::fmt::Write;
use tracing::{debug, info, warn};

/// Comment listing the PRs merged into the integration branch
pub fn success_comment(integration_branch: &str, pull_requests: &[PullRequestRef]) -> String {
    let mut body = format!("## Merged Pull Requests into `{integration_branch}`:\n");
    for pr in pull_requests {
        let _ = writeln!(body, "- {}", pr.html_url);
    }
    body
}

/// Comment describing why the run failed
pub fn failure_comment(message: &str) -> String {
    format!(":ghost: Merge failed with error:\n```shell\n{message}\n```")
}

/// Post `body` on `issue_number` (best-effort)
///
/// Without an issue number nothing is posted. Failures are logged and
/// swallowed so reporting can never change a run's outcome.
pub async fn post_comment(platform: &dyn PlatformService, issue_number: Option<u64>, body: &str) {
    let Some(number) = issue_number else {
        info!("no triggering pull request; skipping status comment");
        return;
    };

    match platform.create_comment(number, body).await {
        Ok(()) => debug!(number, "posted status comment"),
        Err(e) => warn!(number, error = %e, "failed to post status comment"),
    }
}
