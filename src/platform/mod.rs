//! Platform services for the code hosting API
//!
//! Provides the narrow set of branch, merge and comment operations a group
//! run needs, behind a trait so runs can be driven against a mock.

mod detection;
mod factory;
mod github;

pub use detection::parse_repo_slug;
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Branch, MergeOutcome, PlatformConfig, PullRequestRef, SearchResults};
use async_trait::async_trait;

/// Platform service trait for the operations a group run performs
///
/// Every method is a single request/response round trip. Implementations
/// never retry.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Search open issues and pull requests, newest first
    ///
    /// `query` is a complete search expression such as
    /// `is:pr label:ci repo:owner/repo state:open`.
    async fn search_pull_requests(&self, query: &str) -> Result<SearchResults>;

    /// Fetch a pull request's head branch and URL
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestRef>;

    /// Look up a branch, returning `None` if it does not exist
    async fn get_branch(&self, name: &str) -> Result<Option<Branch>>;

    /// Create `refs/heads/<branch>` pointing at `sha`
    async fn create_ref(&self, branch: &str, sha: &str) -> Result<()>;

    /// Move `refs/heads/<branch>` to `sha`
    ///
    /// With `force`, the update need not be a fast-forward.
    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> Result<()>;

    /// Merge `head` into `base`, creating a merge commit on `base`
    ///
    /// Returns [`Error::MergeConflict`] when the merge cannot be applied
    /// cleanly.
    ///
    /// [`Error::MergeConflict`]: crate::error::Error::MergeConflict
    async fn merge(&self, base: &str, head: &str) -> Result<MergeOutcome>;

    /// Post a comment on an issue or pull request
    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()>;

    /// Delete `refs/heads/<branch>`
    async fn delete_ref(&self, branch: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
