use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use rmcp::model::ErrorData;
use serde_json::Value;

use crate::config::ConfigError;
use crate::params::InvalidInput;

pub type Result<T> = std::result::Result<T, AtomGitError>;

/// Window assumed when a 429 response does not say when the limit resets.
const DEFAULT_RATE_LIMIT_WINDOW_MS: i64 = 60_000;

/// A non-success response from the AtomGit API, classified by status code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, body: Value },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("{message}")]
    Authentication { message: String },

    #[error("{message}")]
    Permission { message: String },

    #[error("{message}")]
    RateLimit {
        message: String,
        reset_at: DateTime<Utc>,
    },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Generic {
        status: u16,
        message: String,
        body: Value,
    },
}

impl ApiError {
    /// Map an HTTP status and its decoded body onto the taxonomy.
    ///
    /// Total over every status code; anything not listed becomes `Generic`.
    pub fn classify(status: u16, body: &Value) -> Self {
        Self::classify_at(status, body, Utc::now())
    }

    /// Same as [`ApiError::classify`] with an explicit clock for the rate-limit default.
    pub fn classify_at(status: u16, body: &Value, now: DateTime<Utc>) -> Self {
        let message = body_message(body);
        match status {
            401 => ApiError::Authentication {
                message: message.unwrap_or_else(|| "Authentication failed".to_string()),
            },
            403 => ApiError::Permission {
                message: message.unwrap_or_else(|| "Insufficient permissions".to_string()),
            },
            404 => ApiError::NotFound {
                resource: message.unwrap_or_else(|| "Resource".to_string()),
            },
            409 => ApiError::Conflict {
                message: message.unwrap_or_else(|| "Conflict occurred".to_string()),
            },
            422 => ApiError::Validation {
                message: message.unwrap_or_else(|| "Validation failed".to_string()),
                body: body.clone(),
            },
            429 => ApiError::RateLimit {
                message: message.unwrap_or_else(|| "Rate limit exceeded".to_string()),
                reset_at: parse_reset_at(body)
                    .unwrap_or_else(|| now + Duration::milliseconds(DEFAULT_RATE_LIMIT_WINDOW_MS)),
            },
            _ => ApiError::Generic {
                status,
                message: message.unwrap_or_else(|| "AtomGit API error".to_string()),
                body: body.clone(),
            },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation { .. } => 422,
            ApiError::NotFound { .. } => 404,
            ApiError::Authentication { .. } => 401,
            ApiError::Permission { .. } => 403,
            ApiError::RateLimit { .. } => 429,
            ApiError::Conflict { .. } => 409,
            ApiError::Generic { status, .. } => *status,
        }
    }

    /// Caller-facing rendering, applied once at the dispatch boundary.
    pub fn formatted(&self) -> String {
        match self {
            ApiError::Validation { body, .. } => {
                let mut text = format!("Validation Error: {}", self);
                if has_details(body) {
                    text.push_str(&format!("\nDetails: {}", body));
                }
                text
            }
            ApiError::NotFound { .. } => format!("Not Found: {}", self),
            ApiError::Authentication { .. } => format!("Authentication Failed: {}", self),
            ApiError::Permission { .. } => format!("Permission Denied: {}", self),
            ApiError::RateLimit { reset_at, .. } => format!(
                "Rate Limit Exceeded: {}\nResets at: {}",
                self,
                reset_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            ApiError::Conflict { .. } => format!("Conflict: {}", self),
            ApiError::Generic { .. } => format!("AtomGit API Error: {}", self),
        }
    }
}

fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

/// `reset_at` may be an RFC 3339 timestamp or epoch milliseconds.
fn parse_reset_at(body: &Value) -> Option<DateTime<Utc>> {
    match body.get("reset_at")? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn has_details(body: &Value) -> bool {
    match body {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AtomGitError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Malformed JSON in AtomGit response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Arguments are required")]
    MissingArguments,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error(
        "Repository '{owner}/{repo}' not found. Please verify:\n\
         1. The repository exists\n\
         2. You have correct access permissions\n\
         3. The owner and repository names are spelled correctly"
    )]
    RepoNotFound { owner: String, repo: String },
}

impl AtomGitError {
    /// Returns the classified API failure, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            AtomGitError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Replace a 404 with a checklist naming the repository the caller targeted.
    pub fn with_repo_hint(self, owner: &str, repo: &str) -> Self {
        match self {
            AtomGitError::Api(ApiError::NotFound { .. }) => AtomGitError::RepoNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            },
            other => other,
        }
    }

    pub fn user_message(&self) -> String {
        match self.as_api_error() {
            Some(api) => api.formatted(),
            None => self.to_string(),
        }
    }

    pub fn to_mcp_error(&self) -> ErrorData {
        match self {
            AtomGitError::MissingArguments
            | AtomGitError::UnknownTool(_)
            | AtomGitError::InvalidInput(_)
            | AtomGitError::InvalidPathSegment(_) => ErrorData::invalid_params(self.user_message(), None),
            AtomGitError::Api(_)
            | AtomGitError::Config(_)
            | AtomGitError::Transport(_)
            | AtomGitError::Decode(_)
            | AtomGitError::RepoNotFound { .. } => {
                ErrorData::internal_error(self.user_message(), None)
            }
        }
    }
}
