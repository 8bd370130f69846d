//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use super::pr_url;
use async_trait::async_trait;
use pr_group::error::{Error, Result};
use pr_group::platform::PlatformService;
use pr_group::types::{
    Branch, MergeOutcome, PlatformConfig, PullRequestRef, SearchMatch, SearchResults,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `merge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub base: String,
    pub head: String,
}

/// Call record for `create_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefCall {
    pub branch: String,
    pub sha: String,
}

/// Call record for `update_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRefCall {
    pub branch: String,
    pub sha: String,
    pub force: bool,
}

/// Call record for `create_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub issue_number: u64,
    pub body: String,
}

/// In-memory hosting service for testing
///
/// Manually implements `PlatformService` over a tiny repository model:
/// branches map to commit SHAs, and every merge creates a commit whose
/// parents are the base and head tips. That lets tests check ancestry, not
/// just call order.
///
/// Features:
/// - Branch and commit graph state
/// - Call tracking for verification
/// - Per-head conflict and no-op merge responses
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    next_commit: AtomicU64,
    branches: Mutex<HashMap<String, String>>,
    parents: Mutex<HashMap<String, Vec<String>>>,
    pull_requests: Mutex<HashMap<u64, PullRequestRef>>,
    search_response: Mutex<SearchResults>,
    conflicting_heads: Mutex<HashSet<String>>,
    already_merged_heads: Mutex<HashSet<String>>,
    // Call tracking
    search_calls: Mutex<Vec<String>>,
    get_pr_calls: Mutex<Vec<u64>>,
    get_branch_calls: Mutex<Vec<String>>,
    create_ref_calls: Mutex<Vec<RefCall>>,
    update_ref_calls: Mutex<Vec<UpdateRefCall>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    comment_calls: Mutex<Vec<CreateCommentCall>>,
    delete_ref_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_search: Mutex<Option<String>>,
    error_on_get_pr: Mutex<HashMap<u64, String>>,
    error_on_create_ref: Mutex<HashMap<String, String>>,
    error_on_update_ref: Mutex<Option<String>>,
    error_on_comment: Mutex<Option<String>>,
    error_on_delete_ref: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config and an empty repository
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_commit: AtomicU64::new(1),
            branches: Mutex::new(HashMap::new()),
            parents: Mutex::new(HashMap::new()),
            pull_requests: Mutex::new(HashMap::new()),
            search_response: Mutex::new(SearchResults::default()),
            conflicting_heads: Mutex::new(HashSet::new()),
            already_merged_heads: Mutex::new(HashSet::new()),
            search_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            get_branch_calls: Mutex::new(Vec::new()),
            create_ref_calls: Mutex::new(Vec::new()),
            update_ref_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            comment_calls: Mutex::new(Vec::new()),
            delete_ref_calls: Mutex::new(Vec::new()),
            error_on_search: Mutex::new(None),
            error_on_get_pr: Mutex::new(HashMap::new()),
            error_on_create_ref: Mutex::new(HashMap::new()),
            error_on_update_ref: Mutex::new(None),
            error_on_comment: Mutex::new(None),
            error_on_delete_ref: Mutex::new(None),
        }
    }

    // === Repository setup ===

    /// Point `name` at `sha`, creating the branch if needed
    pub fn set_branch(&self, name: &str, sha: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), sha.to_string());
    }

    /// Register an open PR whose head branch `head` is at `head_sha`
    pub fn setup_pr(&self, number: u64, head: &str, head_sha: &str) {
        self.set_branch(head, head_sha);
        self.pull_requests.lock().unwrap().insert(
            number,
            PullRequestRef {
                number,
                head_ref: head.to_string(),
                html_url: pr_url(number),
            },
        );
    }

    /// Make the search return these PR numbers, in this order
    pub fn set_search_results(&self, numbers: &[u64]) {
        let items: Vec<SearchMatch> = numbers
            .iter()
            .map(|&number| SearchMatch {
                number,
                html_url: pr_url(number),
            })
            .collect();
        *self.search_response.lock().unwrap() = SearchResults {
            total_count: items.len() as u64,
            items,
        };
    }

    /// Override the total count the search reports
    pub fn set_search_total_count(&self, total: u64) {
        self.search_response.lock().unwrap().total_count = total;
    }

    /// Merging `head` into anything conflicts
    pub fn conflict_on(&self, head: &str) {
        self.conflicting_heads
            .lock()
            .unwrap()
            .insert(head.to_string());
    }

    /// Merging `head` into anything is a no-op
    pub fn already_merged(&self, head: &str) {
        self.already_merged_heads
            .lock()
            .unwrap()
            .insert(head.to_string());
    }

    // === Error injection methods ===

    /// Make `search_pull_requests` return an error
    pub fn fail_search(&self, msg: &str) {
        *self.error_on_search.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pull_request` return an error for `number`
    pub fn fail_get_pr(&self, number: u64, msg: &str) {
        self.error_on_get_pr
            .lock()
            .unwrap()
            .insert(number, msg.to_string());
    }

    /// Make `create_ref` return an error for `branch`
    pub fn fail_create_ref(&self, branch: &str, msg: &str) {
        self.error_on_create_ref
            .lock()
            .unwrap()
            .insert(branch.to_string(), msg.to_string());
    }

    /// Make `update_ref` return an error
    pub fn fail_update_ref(&self, msg: &str) {
        *self.error_on_update_ref.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_comment` return an error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `delete_ref` return an error
    pub fn fail_delete_ref(&self, msg: &str) {
        *self.error_on_delete_ref.lock().unwrap() = Some(msg.to_string());
    }

    // === State inspection ===

    /// Current SHA of `name`, if the branch exists
    pub fn branch_sha(&self, name: &str) -> Option<String> {
        self.branches.lock().unwrap().get(name).cloned()
    }

    /// Whether any branch starting with `prefix` exists
    pub fn has_branch_with_prefix(&self, prefix: &str) -> bool {
        self.branches
            .lock()
            .unwrap()
            .keys()
            .any(|name| name.starts_with(prefix))
    }

    /// Whether `ancestor` is reachable from `sha` (a commit is its own ancestor)
    pub fn is_ancestor(&self, ancestor: &str, sha: &str) -> bool {
        let parents = self.parents.lock().unwrap();
        let mut stack = vec![sha.to_string()];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(ps) = parents.get(&current) {
                stack.extend(ps.iter().cloned());
            }
        }
        false
    }

    // === Call verification methods ===

    /// Get all search queries
    pub fn get_search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Get all `get_pull_request` calls
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Get all `create_ref` calls
    pub fn get_create_ref_calls(&self) -> Vec<RefCall> {
        self.create_ref_calls.lock().unwrap().clone()
    }

    /// Get all `update_ref` calls
    pub fn get_update_ref_calls(&self) -> Vec<UpdateRefCall> {
        self.update_ref_calls.lock().unwrap().clone()
    }

    /// Get all `merge` calls
    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Heads passed to `merge`, in call order
    pub fn merged_heads(&self) -> Vec<String> {
        self.get_merge_calls().into_iter().map(|c| c.head).collect()
    }

    /// Get all `create_comment` calls
    pub fn get_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    /// Get all `delete_ref` calls
    pub fn get_delete_ref_calls(&self) -> Vec<String> {
        self.delete_ref_calls.lock().unwrap().clone()
    }

    /// Assert that nothing was written to the repository or the PR
    pub fn assert_no_writes(&self) {
        assert!(self.get_create_ref_calls().is_empty(), "unexpected create_ref");
        assert!(self.get_update_ref_calls().is_empty(), "unexpected update_ref");
        assert!(self.get_merge_calls().is_empty(), "unexpected merge");
        assert!(self.get_delete_ref_calls().is_empty(), "unexpected delete_ref");
        assert!(self.get_comment_calls().is_empty(), "unexpected comment");
    }

    fn new_commit(&self, parents: Vec<String>) -> String {
        let sha = format!("commit{}", self.next_commit.fetch_add(1, Ordering::SeqCst));
        self.parents.lock().unwrap().insert(sha.clone(), parents);
        sha
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn search_pull_requests(&self, query: &str) -> Result<SearchResults> {
        self.search_calls.lock().unwrap().push(query.to_string());

        if let Some(msg) = self.error_on_search.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.search_response.lock().unwrap().clone())
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequestRef> {
        self.get_pr_calls.lock().unwrap().push(number);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().get(&number) {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.pull_requests
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("Not Found (404): pull request #{number}")))
    }

    async fn get_branch(&self, name: &str) -> Result<Option<Branch>> {
        self.get_branch_calls.lock().unwrap().push(name.to_string());
        Ok(self.branch_sha(name).map(|sha| Branch {
            name: name.to_string(),
            sha,
        }))
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> Result<()> {
        self.create_ref_calls.lock().unwrap().push(RefCall {
            branch: branch.to_string(),
            sha: sha.to_string(),
        });

        if let Some(msg) = self.error_on_create_ref.lock().unwrap().get(branch) {
            return Err(Error::RefUpdate {
                branch: branch.to_string(),
                message: msg.clone(),
            });
        }

        let mut branches = self.branches.lock().unwrap();
        if branches.contains_key(branch) {
            return Err(Error::RefUpdate {
                branch: branch.to_string(),
                message: "Reference already exists (422)".to_string(),
            });
        }
        branches.insert(branch.to_string(), sha.to_string());
        Ok(())
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> Result<()> {
        self.update_ref_calls.lock().unwrap().push(UpdateRefCall {
            branch: branch.to_string(),
            sha: sha.to_string(),
            force,
        });

        if let Some(msg) = self.error_on_update_ref.lock().unwrap().as_ref() {
            return Err(Error::RefUpdate {
                branch: branch.to_string(),
                message: msg.clone(),
            });
        }

        let mut branches = self.branches.lock().unwrap();
        let Some(current) = branches.get_mut(branch) else {
            return Err(Error::RefUpdate {
                branch: branch.to_string(),
                message: "Reference does not exist (422)".to_string(),
            });
        };
        *current = sha.to_string();
        Ok(())
    }

    async fn merge(&self, base: &str, head: &str) -> Result<MergeOutcome> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            base: base.to_string(),
            head: head.to_string(),
        });

        let (Some(base_sha), Some(head_sha)) = (self.branch_sha(base), self.branch_sha(head))
        else {
            return Err(Error::MergeFailed {
                head: head.to_string(),
                message: "Base or head does not exist (404)".to_string(),
            });
        };

        if self.conflicting_heads.lock().unwrap().contains(head) {
            return Err(Error::MergeConflict {
                base: base.to_string(),
                head: head.to_string(),
            });
        }

        if self.already_merged_heads.lock().unwrap().contains(head) {
            return Ok(MergeOutcome::AlreadyMerged);
        }

        let sha = self.new_commit(vec![base_sha, head_sha]);
        self.set_branch(base, &sha);
        Ok(MergeOutcome::Merged { sha })
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        self.comment_calls.lock().unwrap().push(CreateCommentCall {
            issue_number,
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }

    async fn delete_ref(&self, branch: &str) -> Result<()> {
        self.delete_ref_calls
            .lock()
            .unwrap()
            .push(branch.to_string());

        if let Some(msg) = self.error_on_delete_ref.lock().unwrap().as_ref() {
            return Err(Error::RefUpdate {
                branch: branch.to_string(),
                message: msg.clone(),
            });
        }

        self.branches
            .lock()
            .unwrap()
            .remove(branch)
            .map(|_| ())
            .ok_or_else(|| Error::RefUpdate {
                branch: branch.to_string(),
                message: "Reference does not exist (422)".to_string(),
            })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
