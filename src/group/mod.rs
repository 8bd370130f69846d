//! Group engine for labeled pull requests
//!
//! Same gather/plan/execute split as the rest of the crate:
//! 1. Discover - search for labeled PRs (effectful, read-only)
//! 2. Plan - decide group membership and order (pure, testable)
//! 3. Resolve - fetch head branches (effectful, read-only)
//! 4. Assemble - merge into a temporary branch, publish to integration (effectful)
//! 5. Report - comment on the triggering PR (effectful, best-effort)

mod discover;
mod execute;
mod plan;
mod report;
mod run;
mod temp_branch;

pub use discover::{discover_matches, resolve_members, search_query};
pub use execute::{AssemblyResult, MergedMember, assemble_group};
pub use plan::{GroupPlan, MemberSource, PlannedMember, create_group_plan};
pub use report::{failure_comment, post_comment, success_comment};
pub use run::{GroupSummary, RunOutcome, run_group, run_group_with_branch, temp_branch_name};
pub use temp_branch::TempBranch;
