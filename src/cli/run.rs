//! Run command - merge labeled PRs into the integration branch

use crate::cli::style::{CHECK, Stylize};
use anstream::println;
use anyhow::{Context, Result};
use clap::Args;
use pr_group::actions::{TEMP_BRANCH_OUTPUT, read_trigger_from_event_file, set_output};
use pr_group::auth::get_github_auth;
use pr_group::config::{ConfigOverrides, FileConfig, load_config_file};
use pr_group::group::{GroupSummary, RunOutcome, run_group};
use pr_group::platform::{create_platform_service, parse_repo_slug};
use pr_group::progress::LogProgress;
use pr_group::types::MergeOutcome;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Options for a group run
///
/// Every option can also come from the environment the Actions runner sets
/// up, so the binary runs unchanged as an action step.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Label that marks pull requests for grouping
    #[arg(long, env = "INPUT_TARGET-LABEL")]
    pub label: Option<String>,

    /// Branch the group is built on top of [default: main]
    #[arg(long = "main-branch", env = "INPUT_MAIN-BRANCH")]
    pub main_branch: Option<String>,

    /// Branch that receives the merged group [default: integration]
    #[arg(long = "integration-branch", env = "INPUT_INTEGRATION-BRANCH")]
    pub integration_branch: Option<String>,

    /// Leave the triggering pull request out of the group
    #[arg(
        long = "exclude-current",
        env = "INPUT_EXCLUDE-CURRENT",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub exclude_current: Option<bool>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repo: Option<String>,

    /// Pull request that triggered the run (read from the event payload if omitted)
    #[arg(long = "pr", env = "INPUT_PR-NUMBER")]
    pub pr: Option<u64>,

    /// Event payload to read the triggering pull request from
    #[arg(long = "event-path", env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long = "api-url", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// File step outputs are appended to
    #[arg(long = "output-file", env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// TOML file with defaults for the options above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the group merge
#[allow(clippy::future_not_send)]
pub async fn run_command(args: RunArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => load_config_file(path)?,
        None => FileConfig::default(),
    };

    let repo_slug = args
        .repo
        .clone()
        .or_else(|| file.repository.clone())
        .context("repository is required (--repo or GITHUB_REPOSITORY)")?;
    let api_url = args.api_url.clone().or_else(|| file.api_url.clone());

    let trigger_pr = match (args.pr, &args.event_path) {
        (Some(number), _) => Some(number),
        (None, Some(path)) => read_trigger_from_event_file(path)?,
        (None, None) => None,
    };

    let config = file.resolve(ConfigOverrides {
        label: args.label,
        trunk_branch: args.main_branch,
        integration_branch: args.integration_branch,
        exclude_current: args.exclude_current,
        trigger_pr,
    })?;

    let platform_config = parse_repo_slug(&repo_slug, api_url)?;
    let auth = get_github_auth()?;
    let platform = create_platform_service(&platform_config, &auth.token)?;

    println!(
        "{} {} {}",
        "Grouping pull requests labeled".emphasis(),
        config.label.accent(),
        format!("in {}", platform_config.slug()).muted()
    );

    match run_group(platform.as_ref(), &config, &LogProgress).await? {
        RunOutcome::NothingToMerge => {
            println!(
                "{}",
                format!("No open pull requests labeled {}.", config.label).muted()
            );
        }
        RunOutcome::Merged(summary) => {
            publish_temp_branch(&summary.assembly.temp_branch, args.output_file.as_deref());
            print_summary(&config.integration_branch, &summary);
        }
    }

    Ok(())
}

/// Write the temp branch step output
///
/// The run has already succeeded and been reported by now, so a failed write
/// is only logged.
fn publish_temp_branch(temp_branch: &str, output_file: Option<&Path>) -> bool {
    match set_output(TEMP_BRANCH_OUTPUT, temp_branch, output_file) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to write step output {TEMP_BRANCH_OUTPUT}: {e}");
            false
        }
    }
}

fn print_summary(integration_branch: &str, summary: &GroupSummary) {
    let verb = if summary.assembly.integration_created {
        "created"
    } else {
        "updated"
    };

    println!();
    println!(
        "{} {} {verb} at {}",
        CHECK.success(),
        integration_branch.accent(),
        summary.assembly.integration_sha.muted()
    );

    for member in &summary.assembly.merged {
        let detail = match &member.outcome {
            MergeOutcome::Merged { sha } => sha.clone(),
            MergeOutcome::AlreadyMerged => "already contained".to_string(),
        };
        println!(
            "   PR #{} {} {}",
            member.number,
            member.head_ref.accent(),
            detail.muted()
        );
    }
}
