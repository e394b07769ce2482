use anyhow::Result;
use atomgit_mcp::client::AtomGitClient;
use atomgit_mcp::config::{Config, DEFAULT_BASE_URL, DEFAULT_TOKEN_ENV};
use atomgit_mcp::server;
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

/// MCP server for AtomGit: lets LLMs work with repositories, issues, pull requests, branches, and labels
#[derive(Parser)]
#[command(name = "atomgit-mcp", version, about)]
struct Cli {
    /// AtomGit personal access token.
    /// Can also be set via ATOMGIT_PERSONAL_ACCESS_TOKEN environment variable.
    #[arg(long)]
    token: Option<String>,

    /// Read the AtomGit token from an environment variable.
    /// Default: ATOMGIT_PERSONAL_ACCESS_TOKEN
    #[arg(long = "token-env")]
    token_env: Option<String>,

    /// AtomGit API root
    #[arg(long = "base-url", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Fatal error in main()");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Resolve token: --token > --token-env > ATOMGIT_PERSONAL_ACCESS_TOKEN
    let token = if let Some(t) = cli.token {
        Some(t)
    } else {
        let env_name = cli.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV);
        match std::env::var(env_name) {
            Ok(t) if !t.is_empty() => {
                tracing::info!(env = env_name, "Read AtomGit token from environment variable");
                Some(t)
            }
            _ => None,
        }
    };

    let config = Config::new(&cli.base_url, token)?;
    if !config.is_authenticated() {
        tracing::warn!("No AtomGit token provided, requests will be sent unauthenticated");
    }

    tracing::info!(
        authenticated = config.is_authenticated(),
        base_url = %config.base_url,
        "Starting atomgit-mcp server"
    );

    let client = AtomGitClient::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to create AtomGit client: {}", e))?;

    let service = server::AtomGitServer::new(client);
    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    tracing::info!("AtomGit MCP server shut down");
    Ok(())
}
