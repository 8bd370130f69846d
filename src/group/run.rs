//! Run orchestration
//!
//! `Discover -> (empty -> Done) | Resolve -> Assemble -> Report`. Errors from
//! any step are reported on the triggering PR and then returned.

use crate::config::GroupConfig;
use crate::error::Result;
use crate::group::discover::{discover_matches, resolve_members};
use crate::group::execute::{AssemblyResult, assemble_group};
use crate::group::plan::create_group_plan;
use crate::group::report::{failure_comment, post_comment, success_comment};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::types::PullRequestRef;
use chrono::Utc;
use tracing::info;

/// Summary of a run that published the integration branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// Pull requests in merge order
    pub pull_requests: Vec<PullRequestRef>,
    /// Branch assembly details
    pub assembly: AssemblyResult,
}

/// How a run ended, when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No labeled PRs (or only the excluded trigger); nothing was touched
    NothingToMerge,
    /// The integration branch now holds the merged group
    Merged(GroupSummary),
}

/// Temporary branch name for a run: `temp-ci-<repo>-<unix millis>`
pub fn temp_branch_name(repo: &str, timestamp_millis: i64) -> String {
    format!("temp-ci-{repo}-{timestamp_millis}")
}

/// Run a group merge with a timestamped temporary branch
pub async fn run_group(
    platform: &dyn PlatformService,
    config: &GroupConfig,
    progress: &dyn ProgressCallback,
) -> Result<RunOutcome> {
    let temp_branch = temp_branch_name(&platform.config().repo, Utc::now().timestamp_millis());
    run_group_with_branch(platform, config, &temp_branch, progress).await
}

/// Run a group merge staging on `temp_branch`
///
/// The status comment goes out after cleanup. Comment failures are logged
/// and do not affect the returned result.
pub async fn run_group_with_branch(
    platform: &dyn PlatformService,
    config: &GroupConfig,
    temp_branch: &str,
    progress: &dyn ProgressCallback,
) -> Result<RunOutcome> {
    config.validate()?;

    match execute_run(platform, config, temp_branch, progress).await {
        Ok(RunOutcome::Merged(summary)) => {
            let body = success_comment(&config.integration_branch, &summary.pull_requests);
            post_comment(platform, config.trigger_pr, &body).await;
            Ok(RunOutcome::Merged(summary))
        }
        Ok(RunOutcome::NothingToMerge) => Ok(RunOutcome::NothingToMerge),
        Err(e) => {
            post_comment(platform, config.trigger_pr, &failure_comment(&e.to_string())).await;
            Err(e)
        }
    }
}

async fn execute_run(
    platform: &dyn PlatformService,
    config: &GroupConfig,
    temp_branch: &str,
    progress: &dyn ProgressCallback,
) -> Result<RunOutcome> {
    let matches = discover_matches(platform, &config.label).await?;
    if matches.is_empty() {
        info!(label = %config.label, "no open pull requests found");
        return Ok(RunOutcome::NothingToMerge);
    }

    let plan = create_group_plan(&matches, config);
    if plan.is_empty() {
        info!(
            label = %config.label,
            excluded_trigger = plan.excluded_trigger,
            "no pull requests left to merge"
        );
        return Ok(RunOutcome::NothingToMerge);
    }

    progress
        .on_message(&format!(
            "🔎 Found {} pull request(s) labeled {}",
            plan.members.len(),
            config.label
        ))
        .await;

    let pull_requests = resolve_members(platform, &plan).await?;
    let assembly = assemble_group(platform, config, &pull_requests, temp_branch, progress).await?;

    info!(
        integration = %config.integration_branch,
        sha = %assembly.integration_sha,
        count = pull_requests.len(),
        "published integration branch"
    );

    Ok(RunOutcome::Merged(GroupSummary {
        pull_requests,
        assembly,
    }))
}
