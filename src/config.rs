use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.atomgit.com";
pub const DEFAULT_TOKEN_ENV: &str = "ATOMGIT_PERSONAL_ACCESS_TOKEN";

/// Process-wide settings, resolved once at startup.
#[derive(Clone)]
pub struct Config {
    pub base_url: Url,
    pub token: Option<String>,
    pub user_agent: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid {header} header value: {reason}")]
    InvalidHeader {
        header: &'static str,
        reason: String,
    },
}

impl Config {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            base_url: parsed,
            token: token.filter(|t| !t.is_empty()),
            user_agent: user_agent(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Product identity sent with every request: server version plus host platform.
pub fn user_agent() -> String {
    format!(
        "modelcontextprotocol/servers/atomgit/v{} rust/{}-{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
