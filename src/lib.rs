//! MCP server that lets LLMs work with AtomGit repositories, issues, pull
//! requests, branches, and labels.
//!
//! Every tool call flows one way: [`dispatch`] validates arguments and picks
//! an [`operations`] function, which builds a request for the [`client`]
//! pipeline; failures come back as [`error::AtomGitError`] and are rendered
//! for the caller only at the dispatch boundary.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod operations;
pub mod params;
pub mod server;
pub mod tools;
