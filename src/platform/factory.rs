//! Platform service construction

use crate::error::Result;
use crate::platform::{GitHubService, PlatformService};
use crate::types::PlatformConfig;
use tracing::debug;

/// Create the platform service for a repository
pub fn create_platform_service(
    config: &PlatformConfig,
    token: &str,
) -> Result<Box<dyn PlatformService>> {
    debug!(repo = %config.slug(), api_url = ?config.api_url, "creating GitHub service");
    let service = GitHubService::new(
        token,
        config.owner.clone(),
        config.repo.clone(),
        config.api_url.clone(),
    )?;
    Ok(Box::new(service))
}
