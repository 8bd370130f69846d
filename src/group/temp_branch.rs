//! Scoped temporary branch

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use tracing::{debug, warn};

/// A temporary branch that must be deleted before it goes out of scope
///
/// Created with [`TempBranch::create`] and released with the consuming
/// [`TempBranch::delete`], so a branch can be deleted at most once. Deletion
/// is async and cannot run in `Drop`; dropping an undeleted guard only logs
/// the leaked ref.
pub struct TempBranch<'a> {
    platform: &'a dyn PlatformService,
    name: String,
    deleted: bool,
}

impl<'a> TempBranch<'a> {
    /// Create `name` pointing at `sha`
    pub async fn create(
        platform: &'a dyn PlatformService,
        name: String,
        sha: &str,
    ) -> Result<Self> {
        platform
            .create_ref(&name, sha)
            .await
            .map_err(|e| match e {
                e @ Error::RefUpdate { .. } => e,
                other => Error::RefUpdate {
                    branch: name.clone(),
                    message: other.to_string(),
                },
            })?;
        debug!(branch = %name, sha, "created temporary branch");

        Ok(Self {
            platform,
            name,
            deleted: false,
        })
    }

    /// Branch name (without `refs/heads/`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delete the branch (best-effort)
    ///
    /// A failed delete is logged and otherwise ignored.
    pub async fn delete(mut self) {
        self.deleted = true;
        match self.platform.delete_ref(&self.name).await {
            Ok(()) => debug!(branch = %self.name, "deleted temporary branch"),
            Err(e) => warn!(branch = %self.name, error = %e, "failed to delete temporary branch"),
        }
    }
}

impl Drop for TempBranch<'_> {
    fn drop(&mut self) {
        if !self.deleted {
            warn!(
                branch = %self.name,
                "temporary branch left behind; delete it manually"
            );
        }
    }
}
