//! GitHub REST glue: repository, issue and pull-request creation.
//!
//! One-shot calls with no retry; a non-success response surfaces as
//! [`Error::GitHub`] with the status and a body excerpt.

use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::error::{Error, Result};
use crate::sprint::UserStory;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("sprint-pilot/", env!("CARGO_PKG_VERSION"));

/// Minimal GitHub API client scoped to one token and owner.
pub struct GitHubClient {
    token: String,
    owner: String,
    base_url: String,
    client: Client,
}

impl GitHubClient {
    /// Creates a client for the given token and repository owner.
    pub fn new(token: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            base_url: API_BASE.to_string(),
            client: Client::new(),
        }
    }

    /// Overrides the API base URL. Intended for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            return Err(Error::GitHub(format!("{path} failed ({status}): {excerpt}")));
        }

        Ok(response.json().await?)
    }

    /// Creates a repository for the authenticated user.
    pub async fn create_repo(&self, name: &str, private: bool) -> Result<()> {
        self.post("/user/repos", json!({ "name": name, "private": private }))
            .await?;
        info!(name, "created repository");
        Ok(())
    }

    /// Creates an issue in `repo`.
    pub async fn create_issue(&self, title: &str, body: &str, repo: &str) -> Result<()> {
        self.post(
            &format!("/repos/{}/{repo}/issues", self.owner),
            json!({ "title": title, "body": body }),
        )
        .await?;
        Ok(())
    }

    /// Creates one issue per user story: title is the feature name, body is
    /// the narrative plus acceptance criteria.
    pub async fn create_story_issues(&self, stories: &[UserStory], repo: &str) -> Result<()> {
        for story in stories {
            let mut body = format!("{}\n\n## Acceptance Criteria\n", story.story);
            for criterion in &story.acceptance_criteria {
                body.push_str(&format!("- {criterion}\n"));
            }
            self.create_issue(&story.feature, &body, repo).await?;
        }
        info!(count = stories.len(), repo, "created story issues");
        Ok(())
    }

    /// Opens a pull request merging `main` into `base` in `repo`.
    pub async fn create_pull_request(&self, base: &str, repo: &str) -> Result<()> {
        self.post(
            &format!("/repos/{}/{repo}/pulls", self.owner),
            json!({
                "head": "main",
                "base": base,
                "title": format!("Sprint: {base}"),
            }),
        )
        .await?;
        info!(base, repo, "created pull request");
        Ok(())
    }
}
