//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{
    CreateCommentCall, MergeCall, MockPlatformService, RefCall, UpdateRefCall,
};

use pr_group::config::GroupConfig;
use pr_group::types::PlatformConfig;

/// Repository coordinates used across tests
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        api_url: None,
    }
}

/// Web URL the mock hands out for a PR number
pub fn pr_url(number: u64) -> String {
    format!("https://github.com/test/repo/pull/{number}")
}

/// Group config for `label` triggered by `trigger`
pub fn group_config(label: &str, trigger: Option<u64>) -> GroupConfig {
    GroupConfig {
        trigger_pr: trigger,
        ..GroupConfig::new(label)
    }
}
