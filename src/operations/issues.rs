use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{ApiRequest, AtomGitClient};
use crate::error::Result;

/// Fields of a new issue, sent as the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

pub async fn create_issue(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue: &NewIssue,
) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "issues"])?;
    client
        .execute(ApiRequest::post(url).json(serde_json::to_value(issue)?))
        .await
}

pub async fn list_issues(client: &AtomGitClient, owner: &str, repo: &str) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "issues"])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn get_issue(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn assign_issue(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
    assignee: &str,
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number, "assignees"])?;
    client
        .execute(ApiRequest::post(url).json(json!({ "assignee": assignee })))
        .await
}

/// Users that issues in this repository can be assigned to.
pub async fn list_assignees(client: &AtomGitClient, owner: &str, repo: &str) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "assignees"])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn check_assignee(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    assignee: &str,
) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "assignees", assignee])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn create_comment(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
    body: &str,
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number, "comments"])?;
    client
        .execute(ApiRequest::post(url).json(json!({ "body": body })))
        .await
}

pub async fn list_comments(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number, "comments"])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn get_comment(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    comment_id: u64,
) -> Result<Value> {
    let id = comment_id.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", "comments", &id])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn delete_comment(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    comment_id: u64,
) -> Result<Value> {
    let id = comment_id.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", "comments", &id])?;
    client.execute(ApiRequest::delete(url)).await
}
