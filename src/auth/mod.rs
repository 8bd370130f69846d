//! Authentication for GitHub
//!
//! Tokens come from the Actions input or the usual environment variables.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, resolve_github_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed as an Actions input (`INPUT_GITHUB-TOKEN`)
    ActionInput,
    /// Token from `GITHUB_TOKEN` or `GH_TOKEN`
    EnvVar,
}
