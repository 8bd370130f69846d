//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tracing::debug;

/// Variables checked for a token, in order
const TOKEN_VARS: [(&str, AuthSource); 3] = [
    ("INPUT_GITHUB-TOKEN", AuthSource::ActionInput),
    ("GITHUB_TOKEN", AuthSource::EnvVar),
    ("GH_TOKEN", AuthSource::EnvVar),
];

/// A resolved GitHub token
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// The token itself
    pub token: String,
    /// Where it came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve a token from the process environment
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    resolve_github_auth(|name| std::env::var(name).ok())
}

/// Resolve a token through `lookup`, first non-empty variable wins
pub fn resolve_github_auth<F>(lookup: F) -> Result<GitHubAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, source) in TOKEN_VARS {
        if let Some(token) = lookup(var).filter(|t| !t.trim().is_empty()) {
            debug!(var, "using GitHub token");
            return Ok(GitHubAuthConfig {
                token: token.trim().to_string(),
                source,
            });
        }
    }

    Err(Error::Auth(
        "no GitHub token found; set GITHUB_TOKEN or pass the github-token input".to_string(),
    ))
}
