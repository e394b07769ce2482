use serde_json::Value;

use crate::client::{ApiRequest, AtomGitClient, Query};
use crate::error::Result;

/// List the branches of a repository, one page at a time.
pub async fn list_branches(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    page: Option<u64>,
    per_page: Option<u64>,
) -> Result<Value> {
    let query = Query::new()
        .number("page", page)
        .number("per_page", per_page);
    let url = client.endpoint_with(&["repos", owner, repo, "branches"], &query)?;
    client.execute(ApiRequest::get(url)).await
}

pub async fn get_branch(
    client: &AtomGitClient,
    owner: &str,
    repo: &str,
    branch: &str,
) -> Result<Value> {
    let url = client.endpoint(&["repos", owner, repo, "branches", branch])?;
    client.execute(ApiRequest::get(url)).await
}
