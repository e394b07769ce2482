//! Routes a tool invocation to its operation.
//!
//! Order of checks: arguments present, tool known, arguments valid. Only then
//! does an operation run, so bad calls never reach the network.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::client::AtomGitClient;
use crate::error::{AtomGitError, Result};
use crate::operations::issues::NewIssue;
use crate::operations::{branches, issues, labels, pulls, repository, users};
use crate::params::{FromArguments, JsonObject};
use crate::tools::*;

/// An inbound `tools/call` request, independent of the transport.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Option<JsonObject>,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Option<JsonObject>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: AtomGitClient,
    registry: &'static ToolRegistry,
}

impl Dispatcher {
    pub fn new(client: AtomGitClient) -> Self {
        Self {
            client,
            registry: ToolRegistry::global(),
        }
    }

    pub fn catalog(&self) -> &[ToolDescriptor] {
        self.registry.list()
    }

    /// Run one invocation and wrap the operation's value as pretty-printed JSON text.
    pub async fn dispatch(&self, invocation: ToolInvocation) -> Result<CallToolResult> {
        let ToolInvocation { name, arguments } = invocation;
        let args = arguments.ok_or(AtomGitError::MissingArguments)?;
        let tool = self
            .registry
            .get(&name)
            .ok_or_else(|| AtomGitError::UnknownTool(name.clone()))?;

        tracing::info!(tool = tool.name, "Dispatching tool call");

        let value = self.run(tool.name, &args).await.map_err(|e| {
            tracing::warn!(tool = tool.name, error = %e, "Tool call failed");
            e
        })?;

        let text = serde_json::to_string_pretty(&value)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    async fn run(&self, name: &str, args: &JsonObject) -> Result<Value> {
        let client = &self.client;
        match name {
            "get_user_repository" => {
                let a = RepoArgs::from_arguments(args)?;
                repository::get_repository(client, &a.owner, &a.repo).await
            }
            "assign_issue" => {
                let a = AssignIssueArgs::from_arguments(args)?;
                issues::assign_issue(client, &a.owner, &a.repo, a.issue_number, &a.assignee).await
            }
            "list_repository_issues" => {
                let a = RepoArgs::from_arguments(args)?;
                issues::list_issues(client, &a.owner, &a.repo).await
            }
            "get_issue_details" => {
                let a = IssueArgs::from_arguments(args)?;
                issues::get_issue(client, &a.owner, &a.repo, a.issue_number).await
            }
            "list_issue_assignees" => {
                let a = RepoArgs::from_arguments(args)?;
                issues::list_assignees(client, &a.owner, &a.repo).await
            }
            "check_if_user_is_assignable" => {
                let a = AssigneeArgs::from_arguments(args)?;
                issues::check_assignee(client, &a.owner, &a.repo, &a.assignee).await
            }
            "get_user_repositories" => {
                let a = UserReposArgs::from_arguments(args)?;
                repository::list_user_repositories(
                    client,
                    &a.username,
                    a.per_page,
                    a.page,
                    a.search.as_deref(),
                )
                .await
            }
            "get_org_repositories" => {
                let a = OrgReposArgs::from_arguments(args)?;
                repository::list_org_repositories(
                    client,
                    &a.org_path,
                    a.per_page,
                    a.page,
                    a.search.as_deref(),
                )
                .await
            }
            "create_issue" => {
                let a = CreateIssueArgs::from_arguments(args)?;
                tracing::debug!(owner = %a.owner, repo = %a.repo, "Creating issue");
                let issue = NewIssue {
                    title: a.title,
                    body: a.body,
                    assignees: a.assignees,
                    milestone: a.milestone,
                    labels: a.labels,
                };
                issues::create_issue(client, &a.owner, &a.repo, &issue)
                    .await
                    .map_err(|e| e.with_repo_hint(&a.owner, &a.repo))
            }
            "create_issue_comment" => {
                let a = IssueCommentArgs::from_arguments(args)?;
                tracing::debug!(owner = %a.owner, repo = %a.repo, issue = a.issue_number, "Creating issue comment");
                issues::create_comment(client, &a.owner, &a.repo, a.issue_number, &a.body)
                    .await
                    .map_err(|e| e.with_repo_hint(&a.owner, &a.repo))
            }
            "get_issue_comment" => {
                let a = CommentIdArgs::from_arguments(args)?;
                issues::get_comment(client, &a.owner, &a.repo, a.comment_id).await
            }
            "list_issue_comments" => {
                let a = IssueArgs::from_arguments(args)?;
                issues::list_comments(client, &a.owner, &a.repo, a.issue_number).await
            }
            "delete_issue_comment" => {
                let a = CommentIdArgs::from_arguments(args)?;
                issues::delete_comment(client, &a.owner, &a.repo, a.comment_id).await
            }
            "create_pull_request" => {
                let a = CreatePullRequestArgs::from_arguments(args)?;
                pulls::create_pull_request(client, &a.owner, &a.repo, &a.body).await
            }
            "get_pull_request_details" => {
                let a = PullArgs::from_arguments(args)?;
                pulls::get_pull_request(client, &a.owner, &a.repo, a.pull_number).await
            }
            "create_pull_request_comment" => {
                let a = PullCommentArgs::from_arguments(args)?;
                pulls::create_pull_request_comment(client, &a.owner, &a.repo, a.pull_number, &a.body)
                    .await
            }
            "create_pull_request_reply" => {
                let a = PullReplyArgs::from_arguments(args)?;
                pulls::create_pull_request_reply(
                    client,
                    &a.owner,
                    &a.repo,
                    a.pull_number,
                    &a.comment_id,
                    &a.body,
                )
                .await
            }
            "get_pull_request_comment" => {
                let a = PullCommentIdArgs::from_arguments(args)?;
                pulls::get_pull_request_comment(client, &a.owner, &a.repo, a.pull_number, a.comment_id)
                    .await
            }
            "list_pull_request_comments" => {
                let a = PullCommentsPageArgs::from_arguments(args)?;
                pulls::list_pull_request_comments(
                    client,
                    &a.owner,
                    &a.repo,
                    a.pull_number,
                    a.page,
                    a.per_page,
                )
                .await
            }
            "list_repository_branches" => {
                let a = BranchListArgs::from_arguments(args)?;
                branches::list_branches(client, &a.owner, &a.repo, a.page, a.per_page).await
            }
            "get_repository_branch_details" => {
                let a = BranchArgs::from_arguments(args)?;
                branches::get_branch(client, &a.owner, &a.repo, &a.branch).await
            }
            "create_repository_label" => {
                let a = CreateLabelArgs::from_arguments(args)?;
                labels::create_label(
                    client,
                    &a.owner,
                    &a.repo,
                    &a.name,
                    &a.color,
                    a.description.as_deref(),
                )
                .await
            }
            "get_repository_labels" => {
                let a = RepoArgs::from_arguments(args)?;
                labels::list_labels(client, &a.owner, &a.repo).await
            }
            "create_issue_labels" => {
                let a = IssueLabelsArgs::from_arguments(args)?;
                labels::add_issue_labels(client, &a.owner, &a.repo, a.issue_number, &a.labels).await
            }
            "get_issue_labels" => {
                let a = IssueArgs::from_arguments(args)?;
                labels::list_issue_labels(client, &a.owner, &a.repo, a.issue_number).await
            }
            "delete_issue_label" => {
                let a = IssueLabelArgs::from_arguments(args)?;
                labels::remove_issue_label(client, &a.owner, &a.repo, a.issue_number, &a.name).await
            }
            "get_label_by_name" => {
                let a = LabelArgs::from_arguments(args)?;
                labels::get_label(client, &a.owner, &a.repo, &a.name).await
            }
            "get_user_info" => {
                NoArgs::from_arguments(args)?;
                users::get_user_info(client).await
            }
            _ => Err(AtomGitError::UnknownTool(name.to_string())),
        }
    }
}
