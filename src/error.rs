//! Error types for pr-group

use thiserror::Error;

/// Errors that can abort a group run
#[derive(Debug, Error)]
pub enum Error {
    /// Searching for labeled pull requests failed
    #[error("failed to search for labeled pull requests: {0}")]
    Discovery(String),

    /// Fetching a pull request's details failed
    #[error("failed to resolve pull request #{number}: {message}")]
    Resolution {
        /// Pull request number
        number: u64,
        /// Underlying failure
        message: String,
    },

    /// A head branch could not be merged cleanly
    #[error("Merge conflict: {head} could not be merged into {base}")]
    MergeConflict {
        /// Branch being merged into
        base: String,
        /// Branch being merged
        head: String,
    },

    /// A merge request failed for a reason other than a conflict
    #[error("failed to merge {head}: {message}")]
    MergeFailed {
        /// Branch being merged
        head: String,
        /// Underlying failure
        message: String,
    },

    /// Creating, updating or reading a branch ref failed
    #[error("failed to update branch {branch}: {message}")]
    RefUpdate {
        /// Branch name (without `refs/heads/`)
        branch: String,
        /// Underlying failure
        message: String,
    },

    /// Raw GitHub API failure
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable token
    #[error("authentication error: {0}")]
    Auth(String),

    /// CI event payload could not be read
    #[error("event payload error: {0}")]
    Event(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::GitHubApi(format!(
                "{} ({})",
                source.message,
                source.status_code.as_u16()
            )),
            other => Self::GitHubApi(without_backtrace(&other.to_string()).to_string()),
        }
    }
}

/// Drop the `Found at <backtrace>` octocrab appends to transport and decoding errors
fn without_backtrace(message: &str) -> &str {
    message
        .find("\nFound at")
        .map_or(message, |end| &message[..end])
        .trim_end()
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result type alias for pr-group
pub type Result<T> = std::result::Result<T, Error>;
