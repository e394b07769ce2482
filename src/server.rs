use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};

use crate::client::AtomGitClient;
use crate::dispatch::{Dispatcher, ToolInvocation};

#[derive(Clone)]
pub struct AtomGitServer {
    dispatcher: Arc<Dispatcher>,
}

impl AtomGitServer {
    pub fn new(client: AtomGitClient) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(client)),
        }
    }

    /// The catalog in MCP form.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher
            .catalog()
            .iter()
            .map(|t| Tool::new(t.name, t.description, t.input_schema.clone()))
            .collect()
    }
}

impl ServerHandler for AtomGitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "atomgit-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "AtomGit server. Use get_user_repository, get_user_repositories and \
                 get_org_repositories to find repositories, list_repository_issues/get_issue_details \
                 and create_issue for issues, create_pull_request/get_pull_request_details for PRs, \
                 list_repository_branches for branches, and get_repository_labels or \
                 create_issue_labels for labels."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation = ToolInvocation::new(request.name.to_string(), request.arguments);
        self.dispatcher
            .dispatch(invocation)
            .await
            .map_err(|e| e.to_mcp_error())
    }
}
