//! Core types for pr-group

/// A search hit for a labeled pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
}

/// Result page of a pull request search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Total number of matches the API reports, across all pages
    pub total_count: u64,
    /// Matches on the fetched page, in API order
    pub items: Vec<SearchMatch>,
}

/// The parts of a pull request needed to merge it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// PR number
    pub number: u64,
    /// Head branch name
    pub head_ref: String,
    /// Web URL for the PR
    pub html_url: String,
}

/// A branch and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Commit SHA at the branch tip
    pub sha: String,
}

/// Outcome of merging one branch into another
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A merge commit was created
    Merged {
        /// SHA of the merge commit
        sha: String,
    },
    /// The head was already contained in the base; nothing changed
    AlreadyMerged,
}

/// Repository coordinates for the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API base URL (None for api.github.com)
    pub api_url: Option<String>,
}

impl PlatformConfig {
    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
