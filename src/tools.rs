//! The tool catalog: argument types, their input schemas, and the ordered
//! list of descriptors published to clients.

use std::sync::{Arc, OnceLock};

use schemars::JsonSchema;
use serde_json::Value;

use crate::operations::pulls::NewPullRequest;
use crate::params::{ArgReader, FromArguments, InvalidInput, JsonObject};

/// A published tool: name, description and JSON schema of its arguments.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
}

// -- Tool argument types --

#[derive(Debug, Default, JsonSchema)]
pub struct RepoArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,
}

impl FromArguments for RepoArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct IssueArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Issue number")]
    pub issue_number: u64,
}

impl FromArguments for IssueArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            issue_number: r.required("issue_number"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct AssignIssueArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Issue number")]
    pub issue_number: u64,

    #[schemars(description = "Username to assign to the issue")]
    pub assignee: String,
}

impl FromArguments for AssignIssueArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            issue_number: r.required("issue_number"),
            assignee: r.required("assignee"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct AssigneeArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Username to be checked")]
    pub assignee: String,
}

impl FromArguments for AssigneeArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            assignee: r.segment("assignee"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct UserReposArgs {
    #[schemars(description = "Username whose repositories to list")]
    pub username: String,

    #[schemars(description = "Number of results per page (default: 10)")]
    pub per_page: Option<u64>,

    #[schemars(description = "Page number for pagination (default: 1)")]
    pub page: Option<u64>,

    #[schemars(description = "Only return repositories matching this text")]
    pub search: Option<String>,
}

impl FromArguments for UserReposArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            username: r.segment("username"),
            per_page: r.optional("per_page"),
            page: r.optional("page"),
            search: r.optional("search"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct OrgReposArgs {
    #[schemars(description = "Organization path")]
    #[serde(rename = "orgPath")]
    pub org_path: String,

    #[schemars(description = "Number of results per page (default: 10)")]
    pub per_page: Option<u64>,

    #[schemars(description = "Page number for pagination (default: 1)")]
    pub page: Option<u64>,

    #[schemars(description = "Only return repositories matching this text")]
    pub search: Option<String>,
}

impl FromArguments for OrgReposArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            org_path: r.segment("orgPath"),
            per_page: r.optional("per_page"),
            page: r.optional("page"),
            search: r.optional("search"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct CreateIssueArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username (owner)'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Issue title")]
    pub title: String,

    #[schemars(description = "Issue content (in Markdown format)")]
    pub body: String,

    #[schemars(description = "Usernames to assign")]
    pub assignees: Option<Vec<String>>,

    #[schemars(description = "Milestone number")]
    pub milestone: Option<u64>,

    #[schemars(description = "Label names")]
    pub labels: Option<Vec<String>>,
}

impl FromArguments for CreateIssueArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            title: r.required("title"),
            body: r.required("body"),
            assignees: r.optional("assignees"),
            milestone: r.optional("milestone"),
            labels: r.optional("labels"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct IssueCommentArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username (owner)'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Issue number")]
    pub issue_number: u64,

    #[schemars(description = "Issue comment content (in Markdown format)")]
    pub body: String,
}

impl FromArguments for IssueCommentArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            issue_number: r.required("issue_number"),
            body: r.required("body"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct CommentIdArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Comment ID")]
    pub comment_id: u64,
}

impl FromArguments for CommentIdArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            comment_id: r.required("comment_id"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct CreatePullRequestArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request to open")]
    pub body: NewPullRequest,
}

impl FromArguments for CreatePullRequestArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            body: r.required("body"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct PullArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request number")]
    pub pull_number: u64,
}

impl FromArguments for PullArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            pull_number: r.required("pull_number"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct PullCommentArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request number")]
    pub pull_number: u64,

    #[schemars(description = "Comment content (in Markdown format)")]
    pub body: String,
}

impl FromArguments for PullCommentArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            pull_number: r.required("pull_number"),
            body: r.required("body"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct PullReplyArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request number")]
    pub pull_number: u64,

    #[schemars(description = "ID of the comment being replied to")]
    pub comment_id: String,

    #[schemars(description = "Reply content (in Markdown format)")]
    pub body: String,
}

impl FromArguments for PullReplyArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            pull_number: r.required("pull_number"),
            comment_id: r.segment("comment_id"),
            body: r.required("body"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct PullCommentIdArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request number")]
    pub pull_number: u64,

    #[schemars(description = "Comment ID")]
    pub comment_id: u64,
}

impl FromArguments for PullCommentIdArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            pull_number: r.required("pull_number"),
            comment_id: r.required("comment_id"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct PullCommentsPageArgs {
    #[schemars(description = "Repository owner")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request number")]
    pub pull_number: u64,

    #[schemars(description = "Page number")]
    pub page: Option<u64>,

    #[schemars(description = "Number of results per page")]
    pub per_page: Option<u64>,
}

impl FromArguments for PullCommentsPageArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            pull_number: r.required("pull_number"),
            page: r.optional("page"),
            per_page: r.optional("per_page"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct BranchListArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Number of results per page")]
    pub per_page: Option<u64>,

    #[schemars(description = "Page number")]
    pub page: Option<u64>,
}

impl FromArguments for BranchListArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            per_page: r.optional("per_page"),
            page: r.optional("page"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct BranchArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Branch name, cannot contain wildcards.")]
    pub branch: String,
}

impl FromArguments for BranchArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            branch: r.segment("branch"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct CreateLabelArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Label name")]
    pub name: String,

    #[schemars(description = "Label color. A 6-character string, e.g: #ED4014")]
    pub color: String,

    #[schemars(description = "Label description")]
    pub description: Option<String>,
}

impl FromArguments for CreateLabelArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            name: r.required("name"),
            color: r.required("color"),
            description: r.optional("description"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct IssueLabelsArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Issue number")]
    pub issue_number: u64,

    #[schemars(description = "Array of label names")]
    pub labels: Vec<String>,
}

impl FromArguments for IssueLabelsArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            issue_number: r.required("issue_number"),
            labels: r.required("labels"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct IssueLabelArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Issue number")]
    pub issue_number: u64,

    #[schemars(description = "Label name")]
    pub name: String,
}

impl FromArguments for IssueLabelArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            issue_number: r.required("issue_number"),
            name: r.segment("name"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct LabelArgs {
    #[schemars(description = "Repository owner, typically referred to as 'username'. Case-insensitive.")]
    pub owner: String,

    #[schemars(description = "Repository name. Case-insensitive.")]
    pub repo: String,

    #[schemars(description = "Label name")]
    pub name: String,
}

impl FromArguments for LabelArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
        let mut r = ArgReader::new(args);
        let parsed = Self {
            owner: r.segment("owner"),
            repo: r.segment("repo"),
            name: r.segment("name"),
        };
        r.finish(parsed)
    }
}

#[derive(Debug, Default, JsonSchema)]
pub struct NoArgs {}

impl FromArguments for NoArgs {
    fn from_arguments(_args: &JsonObject) -> Result<Self, InvalidInput> {
        Ok(Self {})
    }
}

// -- Catalog --

fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn describe<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description,
        input_schema: input_schema::<T>(),
    }
}

/// Ordered, immutable set of tools exposed by the server.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// The process-wide catalog, assembled on first use.
    pub fn global() -> &'static ToolRegistry {
        static REGISTRY: OnceLock<ToolRegistry> = OnceLock::new();
        REGISTRY.get_or_init(ToolRegistry::build)
    }

    fn build() -> Self {
        let tools = vec![
            describe::<RepoArgs>("get_user_repository", "Get an AtomGit repository by owner and name"),
            describe::<AssignIssueArgs>("assign_issue", "Assign a user to an issue in an AtomGit repository"),
            describe::<RepoArgs>("list_repository_issues", "List issues in an AtomGit repository"),
            describe::<IssueArgs>("get_issue_details", "Get details of a specific issue in an AtomGit repository"),
            describe::<RepoArgs>("list_issue_assignees", "List users that issues in an AtomGit repository can be assigned to"),
            describe::<AssigneeArgs>("check_if_user_is_assignable", "Check if a user can be assigned to issues in an AtomGit repository"),
            describe::<UserReposArgs>("get_user_repositories", "List an AtomGit user's repositories"),
            describe::<OrgReposArgs>("get_org_repositories", "List an AtomGit organization's repositories"),
            describe::<CreateIssueArgs>("create_issue", "Create a new issue in an AtomGit repository"),
            describe::<IssueCommentArgs>("create_issue_comment", "Create a comment on an issue in an AtomGit repository"),
            describe::<CommentIdArgs>("get_issue_comment", "Get a specific issue comment"),
            describe::<IssueArgs>("list_issue_comments", "List all comments on an issue"),
            describe::<CommentIdArgs>("delete_issue_comment", "Delete a specific issue comment"),
            describe::<CreatePullRequestArgs>("create_pull_request", "Create a new pull request in a repository"),
            describe::<PullArgs>("get_pull_request_details", "Get details of a specific pull request"),
            describe::<PullCommentArgs>("create_pull_request_comment", "Create a comment on a pull request"),
            describe::<PullReplyArgs>("create_pull_request_reply", "Reply to a comment on a pull request"),
            describe::<PullCommentIdArgs>("get_pull_request_comment", "Get details of a specific pull request comment"),
            describe::<PullCommentsPageArgs>("list_pull_request_comments", "List comments on a pull request"),
            describe::<BranchListArgs>("list_repository_branches", "List branches in a repository"),
            describe::<BranchArgs>("get_repository_branch_details", "Get details of a specific branch in a repository"),
            describe::<CreateLabelArgs>("create_repository_label", "Create a new label in a repository"),
            describe::<RepoArgs>("get_repository_labels", "Get all labels in a repository"),
            describe::<IssueLabelsArgs>("create_issue_labels", "Add labels to an issue in a repository"),
            describe::<IssueArgs>("get_issue_labels", "Get all labels for an issue in a repository"),
            describe::<IssueLabelArgs>("delete_issue_label", "Remove a label from an issue in a repository"),
            describe::<LabelArgs>("get_label_by_name", "Get a single label by name from a repository"),
            describe::<NoArgs>("get_user_info", "Get the profile of the authenticated AtomGit user"),
        ];
        Self { tools }
    }

    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }
}
