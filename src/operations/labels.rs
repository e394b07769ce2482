use serde_json::{json, Value};

use crate::client::{ApiRequest, AtomGitClient};
use crate::error::Result;

pub async fn create_label(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    name: &str,
    color: &str,
    description: Option<&str>,
) -> Result<Value> {
    let mut body = json!({ "name": name, "color": color });
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        body["description"] = Value::from(description);
    }
    let url = client.endpoint(&["repos", owner, repo, "labels"])?;
    client.execute(ApiRequest::post(url).json(body)).await
}

pub async fn list_labels(client: &AtomGitClient, owner: &str, repo: &str) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "labels"])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn get_label(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    name: &str,
) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "labels", name])?;
    client.execute(ApiRequest::get(url)).await
}

/// Attach labels to an issue. The endpoint takes a bare JSON array of names.
pub async fn add_issue_labels(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
    labels: &[String],
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number, "labels"])?;
    client
        .execute(ApiRequest::post(url).json(json!(labels)))
        .await
}

pub async fn list_issue_labels(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number, "labels"])?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn remove_issue_label(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    issue_number: u64,
    name: &str,
) -> Result<Value> {
    let number = issue_number.to_string();
    let url = client.endpoint(&["repos", owner, repo, "issues", &number, "labels", name])?;
    client.execute(ApiRequest::delete(url)).await
}
