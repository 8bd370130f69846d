//! Repository coordinate parsing

use crate::error::{Error, Result};
use crate::types::PlatformConfig;

/// Parse an `owner/repo` slug (as found in `GITHUB_REPOSITORY`)
///
/// A trailing `.git` is tolerated. `api_url` is carried through unchanged.
pub fn parse_repo_slug(slug: &str, api_url: Option<String>) -> Result<PlatformConfig> {
    let trimmed = slug.trim().trim_end_matches(".git");
    let mut parts = trimmed.split('/');

    let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::Config(format!(
            "repository must be in owner/repo form, got '{slug}'"
        )));
    };

    if owner.is_empty() || repo.is_empty() {
        return Err(Error::Config(format!(
            "repository must be in owner/repo form, got '{slug}'"
        )));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        api_url,
    })
}
