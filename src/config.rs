//! Run configuration
//!
//! A run is driven entirely by an explicit [`GroupConfig`]. The CLI builds one
//! from flags and `INPUT_*` variables, falling back to an optional TOML file
//! and then to defaults.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Trunk branch used when none is configured
pub const DEFAULT_TRUNK_BRANCH: &str = "main";

/// Integration branch used when none is configured
pub const DEFAULT_INTEGRATION_BRANCH: &str = "integration";

/// Everything a group run needs to know besides the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    /// Label that marks pull requests for grouping
    pub label: String,
    /// Branch the temporary branch is cut from
    pub trunk_branch: String,
    /// Branch repointed at the merged result
    pub integration_branch: String,
    /// Leave the triggering pull request out of the group
    pub exclude_current: bool,
    /// Pull request whose event started this run, if known
    pub trigger_pr: Option<u64>,
}

impl GroupConfig {
    /// Config for `label` with default branches and no trigger
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            trunk_branch: DEFAULT_TRUNK_BRANCH.to_string(),
            integration_branch: DEFAULT_INTEGRATION_BRANCH.to_string(),
            exclude_current: false,
            trigger_pr: None,
        }
    }

    /// Reject configs that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(Error::Config("target label must not be empty".to_string()));
        }
        if self.trunk_branch.trim().is_empty() || self.integration_branch.trim().is_empty() {
            return Err(Error::Config("branch names must not be empty".to_string()));
        }
        if self.trunk_branch == self.integration_branch {
            return Err(Error::Config(format!(
                "integration branch must differ from trunk branch '{}'",
                self.trunk_branch
            )));
        }
        Ok(())
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Target label
    pub label: Option<String>,
    /// Trunk branch
    pub trunk_branch: Option<String>,
    /// Integration branch
    pub integration_branch: Option<String>,
    /// Exclude the triggering PR
    pub exclude_current: Option<bool>,
    /// Triggering PR number
    pub trigger_pr: Option<u64>,
}

/// Optional TOML config file
///
/// ```toml
/// target-label = "merge-train"
/// main-branch = "main"
/// integration-branch = "integration"
/// exclude-current = false
/// repository = "octo-org/widgets"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    /// Target label
    pub target_label: Option<String>,
    /// Trunk branch
    pub main_branch: Option<String>,
    /// Integration branch
    pub integration_branch: Option<String>,
    /// Exclude the triggering PR
    pub exclude_current: Option<bool>,
    /// `owner/repo`
    pub repository: Option<String>,
    /// REST API base URL
    pub api_url: Option<String>,
}

impl FileConfig {
    /// Merge with overrides (which win) into a validated [`GroupConfig`]
    pub fn resolve(self, overrides: ConfigOverrides) -> Result<GroupConfig> {
        let label = overrides
            .label
            .or(self.target_label)
            .ok_or_else(|| Error::Config("target label is required".to_string()))?;

        let config = GroupConfig {
            label,
            trunk_branch: overrides
                .trunk_branch
                .or(self.main_branch)
                .unwrap_or_else(|| DEFAULT_TRUNK_BRANCH.to_string()),
            integration_branch: overrides
                .integration_branch
                .or(self.integration_branch)
                .unwrap_or_else(|| DEFAULT_INTEGRATION_BRANCH.to_string()),
            exclude_current: overrides
                .exclude_current
                .or(self.exclude_current)
                .unwrap_or(false),
            trigger_pr: overrides.trigger_pr,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Parse config file contents
pub fn parse_config(content: &str) -> Result<FileConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("invalid config file: {e}")))
}

/// Load a config file from disk
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))
}
