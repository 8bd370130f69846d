//! Branch assembly - effectful operations
//!
//! Cuts the temporary branch from trunk, merges each member's head branch
//! into it in order, and publishes the tip to the integration branch. The
//! integration branch is only touched after every merge has succeeded.

use crate::config::GroupConfig;
use crate::error::{Error, Result};
use crate::group::temp_branch::TempBranch;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::types::{Branch, MergeOutcome, PullRequestRef};

/// One successfully merged member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedMember {
    /// PR number
    pub number: u64,
    /// Head branch that was merged
    pub head_ref: String,
    /// What the merge did
    pub outcome: MergeOutcome,
}

/// Result of a completed assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyResult {
    /// Temporary branch the merges were staged on (already deleted)
    pub temp_branch: String,
    /// Trunk commit the temporary branch started from
    pub base_sha: String,
    /// Commit the integration branch now points at
    pub integration_sha: String,
    /// Whether the integration branch had to be created
    pub integration_created: bool,
    /// Members in merge order
    pub merged: Vec<MergedMember>,
}

fn ref_failure(branch: &str, err: Error) -> Error {
    match err {
        e @ Error::RefUpdate { .. } => e,
        other => Error::RefUpdate {
            branch: branch.to_string(),
            message: other.to_string(),
        },
    }
}

async fn require_branch(platform: &dyn PlatformService, name: &str) -> Result<Branch> {
    platform
        .get_branch(name)
        .await
        .map_err(|e| ref_failure(name, e))?
        .ok_or_else(|| Error::RefUpdate {
            branch: name.to_string(),
            message: "branch not found".to_string(),
        })
}

/// Assemble the group (EFFECTFUL)
///
/// Steps:
/// 1. resolve the trunk tip
/// 2. create `temp_branch` at it
/// 3. merge each PR's head into `temp_branch`, stopping at the first failure
/// 4. resolve the `temp_branch` tip
/// 5. force-update the integration branch to it, or create it if missing
///
/// Once step 2 succeeds the temporary branch is deleted on every path.
/// Cleanup failures are logged and never replace the assembly result.
pub async fn assemble_group(
    platform: &dyn PlatformService,
    config: &GroupConfig,
    pull_requests: &[PullRequestRef],
    temp_branch: &str,
    progress: &dyn ProgressCallback,
) -> Result<AssemblyResult> {
    let trunk = require_branch(platform, &config.trunk_branch).await?;

    progress
        .on_message(&format!(
            "🌱 Creating {temp_branch} from {} at {}",
            config.trunk_branch, trunk.sha
        ))
        .await;
    let temp = TempBranch::create(platform, temp_branch.to_string(), &trunk.sha).await?;

    let result = merge_and_publish(platform, config, pull_requests, temp.name(), progress).await;

    progress
        .on_message(&format!("🧹 Deleting {}", temp.name()))
        .await;
    temp.delete().await;

    let (merged, integration_sha, integration_created) = result?;
    Ok(AssemblyResult {
        temp_branch: temp_branch.to_string(),
        base_sha: trunk.sha,
        integration_sha,
        integration_created,
        merged,
    })
}

async fn merge_and_publish(
    platform: &dyn PlatformService,
    config: &GroupConfig,
    pull_requests: &[PullRequestRef],
    temp_branch: &str,
    progress: &dyn ProgressCallback,
) -> Result<(Vec<MergedMember>, String, bool)> {
    let mut merged = Vec::with_capacity(pull_requests.len());

    for pr in pull_requests {
        progress
            .on_message(&format!(
                "🔀 Merging PR #{} ({}) into {temp_branch}",
                pr.number, pr.head_ref
            ))
            .await;

        let outcome = platform
            .merge(temp_branch, &pr.head_ref)
            .await
            .map_err(|e| match e {
                e @ (Error::MergeConflict { .. } | Error::MergeFailed { .. }) => e,
                other => Error::MergeFailed {
                    head: pr.head_ref.clone(),
                    message: other.to_string(),
                },
            })?;

        match &outcome {
            MergeOutcome::Merged { sha } => {
                progress
                    .on_message(&format!("✅ Merged PR #{}: {sha}", pr.number))
                    .await;
            }
            MergeOutcome::AlreadyMerged => {
                progress
                    .on_message(&format!("✅ PR #{} already contained", pr.number))
                    .await;
            }
        }

        merged.push(MergedMember {
            number: pr.number,
            head_ref: pr.head_ref.clone(),
            outcome,
        });
    }

    let tip = require_branch(platform, temp_branch).await?;
    let integration = &config.integration_branch;

    let existing = platform
        .get_branch(integration)
        .await
        .map_err(|e| ref_failure(integration, e))?;

    let created = if existing.is_some() {
        progress
            .on_message(&format!("📌 Updating {integration} to {}", tip.sha))
            .await;
        platform
            .update_ref(integration, &tip.sha, true)
            .await
            .map_err(|e| ref_failure(integration, e))?;
        false
    } else {
        progress
            .on_message(&format!("📌 Creating {integration} at {}", tip.sha))
            .await;
        platform
            .create_ref(integration, &tip.sha)
            .await
            .map_err(|e| ref_failure(integration, e))?;
        true
    };

    Ok((merged, tip.sha, created))
}
