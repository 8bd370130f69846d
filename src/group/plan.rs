//! Group planning - pure functions deciding which PRs merge, in what order
//!
//! No I/O happens here. The search results and config are passed in, making
//! membership rules easy to unit test.

use crate::config::GroupConfig;
use crate::types::SearchMatch;
use std::collections::HashSet;

/// Why a pull request is in the group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSource {
    /// It triggered the run
    Trigger,
    /// It carries the target label
    Labeled,
}

/// A pull request scheduled for merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMember {
    /// PR number
    pub number: u64,
    /// How it got into the group
    pub source: MemberSource,
}

impl std::fmt::Display for PlannedMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.source {
            MemberSource::Trigger => write!(f, "PR #{} (triggering)", self.number),
            MemberSource::Labeled => write!(f, "PR #{}", self.number),
        }
    }
}

/// Ordered group membership
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPlan {
    /// Members in merge order
    pub members: Vec<PlannedMember>,
    /// Whether the triggering PR matched the label but was left out
    pub excluded_trigger: bool,
}

impl GroupPlan {
    /// Check if there is nothing to merge
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// PR numbers in merge order
    #[must_use]
    pub fn numbers(&self) -> Vec<u64> {
        self.members.iter().map(|m| m.number).collect()
    }
}

/// Create a group plan (PURE - no I/O, easily testable)
///
/// `matches` must be in discovery order (newest first). With no matches the
/// plan is empty even when a triggering PR is known. Otherwise:
/// - `exclude_current`: the triggering PR is dropped from the matches
/// - otherwise the triggering PR goes first, followed by the other matches
///
/// Duplicate numbers keep their first position.
#[must_use]
pub fn create_group_plan(matches: &[SearchMatch], config: &GroupConfig) -> GroupPlan {
    let mut plan = GroupPlan::default();
    if matches.is_empty() {
        return plan;
    }

    let mut seen = HashSet::new();

    if let Some(trigger) = config.trigger_pr
        && !config.exclude_current
    {
        seen.insert(trigger);
        plan.members.push(PlannedMember {
            number: trigger,
            source: MemberSource::Trigger,
        });
    }

    for item in matches {
        if config.exclude_current && config.trigger_pr == Some(item.number) {
            plan.excluded_trigger = true;
            continue;
        }
        if !seen.insert(item.number) {
            continue;
        }
        plan.members.push(PlannedMember {
            number: item.number,
            source: MemberSource::Labeled,
        });
    }

    plan
}
