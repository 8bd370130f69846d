//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Branch, MergeOutcome, PlatformConfig, PullRequestRef, SearchMatch, SearchResults};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::params::repos::Reference;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Public GitHub REST endpoint
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Search results fetched per run; GitHub caps a page at 100
const SEARCH_PAGE_SIZE: u8 = 100;

// Raw REST payloads for the endpoints served through reqwest

#[derive(Deserialize)]
struct BranchResponse {
    name: String,
    commit: BranchCommit,
}

#[derive(Deserialize)]
struct BranchCommit {
    sha: String,
}

#[derive(Serialize)]
struct UpdateRefRequest<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Serialize)]
struct MergeRequest<'a> {
    base: &'a str,
    head: &'a str,
}

#[derive(Deserialize)]
struct MergeCommitResponse {
    sha: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    message: String,
}

/// GitHub service using octocrab
///
/// Branch lookups, ref updates and merges go through a raw HTTP client
/// because the response status carries the meaning (404 for a missing
/// branch, 204 for a no-op merge, 409 for a conflict).
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// REST base URL without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` overrides the REST endpoint, e.g. `https://ghe.example.com/api/v3`.
    pub fn new(token: &str, owner: String, repo: String, api_url: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = match api_url {
            Some(ref u) => {
                let base = u.trim_end_matches('/').to_string();
                Url::parse(&base)
                    .map_err(|e| Error::Config(format!("invalid API URL '{u}': {e}")))?;
                builder = builder.base_uri(&base)?;
                base
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let client = builder.build()?;

        let http_client = Client::builder()
            .user_agent("pr-group")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_url,
            },
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// URL for a path under `/repos/{owner}/{repo}/`
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.config.owner, self.config.repo
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// Percent-encode each path segment of a branch name, keeping the slashes
fn encode_branch(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Pull the `message` out of a GitHub error body, falling back to the raw text
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    if message.is_empty() {
        status.to_string()
    } else {
        format!("{message} ({})", status.as_u16())
    }
}

/// Helper to convert an octocrab PR to our `PullRequestRef` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestRef {
    PullRequestRef {
        number: pr.number,
        head_ref: pr.head.ref_field.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

fn ref_error(branch: &str, err: impl Into<Error>) -> Error {
    Error::RefUpdate {
        branch: branch.to_string(),
        message: err.into().to_string(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn search_pull_requests(&self, query: &str) -> Result<SearchResults> {
        debug!(query, "searching pull requests");
        let page = self
            .client
            .search()
            .issues_and_pull_requests(query)
            .sort("created")
            .order("desc")
            .per_page(SEARCH_PAGE_SIZE)
            .send()
            .await?;

        let items: Vec<SearchMatch> = page
            .items
            .into_iter()
            .map(|issue| SearchMatch {
                number: issue.number,
                html_url: issue.html_url.to_string(),
            })
            .collect();
        let total_count = page.total_count.unwrap_or(items.len() as u64);

        debug!(total_count, fetched = items.len(), "searched pull requests");
        Ok(SearchResults { total_count, items })
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequestRef> {
        debug!(number, "getting pull request");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(number, head_ref = %result.head_ref, "got pull request");
        Ok(result)
    }

    async fn get_branch(&self, name: &str) -> Result<Option<Branch>> {
        debug!(name, "getting branch");
        let url = self.repo_url(&format!("branches/{}", encode_branch(name)));

        let response = self
            .authorized(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch branch {name}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(name, "branch not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to fetch branch {name}: {}",
                error_message(response).await
            )));
        }

        let branch: BranchResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse branch {name}: {e}")))?;

        debug!(name, sha = %branch.commit.sha, "got branch");
        Ok(Some(Branch {
            name: branch.name,
            sha: branch.commit.sha,
        }))
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> Result<()> {
        debug!(branch, sha, "creating ref");
        self.client
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(branch.to_string()), sha)
            .await
            .map_err(|e| ref_error(branch, e))?;
        debug!(branch, "created ref");
        Ok(())
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> Result<()> {
        debug!(branch, sha, force, "updating ref");
        let url = self.repo_url(&format!("git/refs/heads/{}", encode_branch(branch)));

        let response = self
            .authorized(self.http_client.patch(&url))
            .json(&UpdateRefRequest { sha, force })
            .send()
            .await
            .map_err(|e| ref_error(branch, e))?;

        if !response.status().is_success() {
            return Err(Error::RefUpdate {
                branch: branch.to_string(),
                message: error_message(response).await,
            });
        }

        debug!(branch, "updated ref");
        Ok(())
    }

    async fn merge(&self, base: &str, head: &str) -> Result<MergeOutcome> {
        debug!(base, head, "merging branch");
        let url = self.repo_url("merges");

        let response = self
            .authorized(self.http_client.post(&url))
            .json(&MergeRequest { base, head })
            .send()
            .await
            .map_err(|e| Error::MergeFailed {
                head: head.to_string(),
                message: e.to_string(),
            })?;

        match response.status() {
            StatusCode::CREATED => {
                let commit: MergeCommitResponse =
                    response.json().await.map_err(|e| Error::MergeFailed {
                        head: head.to_string(),
                        message: format!("Failed to parse merge commit: {e}"),
                    })?;
                debug!(base, head, sha = %commit.sha, "merged branch");
                Ok(MergeOutcome::Merged { sha: commit.sha })
            }
            StatusCode::NO_CONTENT => {
                debug!(base, head, "nothing to merge");
                Ok(MergeOutcome::AlreadyMerged)
            }
            StatusCode::CONFLICT => {
                debug!(base, head, "merge conflict");
                Err(Error::MergeConflict {
                    base: base.to_string(),
                    head: head.to_string(),
                })
            }
            _ => Err(Error::MergeFailed {
                head: head.to_string(),
                message: error_message(response).await,
            }),
        }
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        debug!(issue_number, "creating comment");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(issue_number, body)
            .await?;
        debug!(issue_number, "created comment");
        Ok(())
    }

    async fn delete_ref(&self, branch: &str) -> Result<()> {
        debug!(branch, "deleting ref");
        self.client
            .repos(&self.config.owner, &self.config.repo)
            .delete_ref(&Reference::Branch(branch.to_string()))
            .await
            .map_err(|e| ref_error(branch, e))?;
        debug!(branch, "deleted ref");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
