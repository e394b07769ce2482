//! Repository lookups. Unlike the other operations these check the decoded
//! response against a declared shape before returning it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiRequest, AtomGitClient, Query};
use crate::error::Result;
use crate::operations::conform;

const DEFAULT_PER_PAGE: u64 = 10;
const DEFAULT_PAGE: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Numeric on some endpoints, a string on others.
    pub id: Value,
    pub name: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<RepositoryOwner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_issues_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

pub async fn get_repository(client: &AtomGitClient, owner: &str, repo: &str) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo])?;
    let response = client.execute(ApiRequest::get(url)).await?;
    conform::<Repository>(response, "repository")
}

pub async fn list_user_repositories(
    client: &AtomGitClient,
    username: &str,
    per_page: Option<u64>,
    page: Option<u64>,
    search: Option<&str>,
) -> Result<Value> {
    let url = client.endpoint_with(
        &["users", username, "repos"],
        &listing_query(per_page, page, search),
    )?;
    let response = client.execute(ApiRequest::get(url)).await?;
    conform::<Vec<Repository>>(response, "repository list")
}

pub async fn list_org_repositories(
    client: &AtomGitClient,
    org: &str,
    per_page: Option<u64>,
    page: Option<u64>,
    search: Option<&str>,
) -> Result<Value> {
    let url = client.endpoint_with(
        &["orgs", org, "repos"],
        &listing_query(per_page, page, search),
    )?;
    let response = client.execute(ApiRequest::get(url)).await?;
    conform::<Vec<Repository>>(response, "repository list")
}

fn listing_query(per_page: Option<u64>, page: Option<u64>, search: Option<&str>) -> Query {
    Query::new()
        .number("per_page", Some(per_page.unwrap_or(DEFAULT_PER_PAGE)))
        .number("page", Some(page.unwrap_or(DEFAULT_PAGE)))
        .text("search", search)
}
