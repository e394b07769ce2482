use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{ApiRequest, AtomGitClient, Query};
use crate::error::Result;

/// Payload for opening a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NewPullRequest {
    #[schemars(description = "Pull request title")]
    pub title: String,

    #[schemars(description = "Pull request description")]
    pub body: String,

    #[schemars(description = "Source branch")]
    pub head: String,

    #[schemars(description = "Target branch")]
    pub base: String,

    #[schemars(description = "Open as a draft (default: false)")]
    #[serde(default)]
    pub draft: bool,
}

pub async fn create_pull_request(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    pull: &NewPullRequest,
) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "pulls"])?;
    client
        .execute(ApiRequest::post(url).json(serde_json::to_value(pull)?))
        .await
}

pub async fn get_pull_request(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    pull_number: u64,
) -> Result<Value> {
    let number = pull_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "pulls", &number])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn create_pull_request_comment(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    pull_number: u64,
    body: &str,
) -> Result<Value> {
    let number = pull_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "pulls", &number, "comments"])?;
    client
        .execute(ApiRequest::post(url).json(json!({ "body": body })))
        .await
}

/// Reply in the thread of an existing review comment.
pub async fn create_pull_request_reply(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    pull_number: u64,
    comment_id: &str,
    body: &str,
) -> Result<Value> {
    let number = pull_number.to_string();
    let url = client.endpoint(&[
        "repos", owner, repo, "pulls", &number, "comments", comment_id, "replies",
    ])?;
    client
        .execute(ApiRequest::post(url).json(json!({ "body": body })))
        .await
}

pub async fn get_pull_request_comment(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    pull_number: u64,
    comment_id: u64,
) -> Result<Value> {
    let number = pull_number.to_string();
    let comment = comment_id.to_string();
    let url = client.endpoint(&["repos", owner, repo, "pulls", &number, "comments", &comment])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn list_pull_request_comments(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    pull_number: u64,
    page: Option<u64>,
    per_page: Option<u64>,
) -> Result<Value> {
    let number = pull_number.to_string();
    let query = Query::new()
        .number("page", page)
        .number("per_page", per_page);
    let url = client.endpoint_with(&["repos", owner, repo, "pulls", &number, "comments"], &query)?;
    client.execute(ApiRequest::get(url)).await
}
