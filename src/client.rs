//! The single outbound path to the AtomGit REST API.
//!
//! Every operation builds an [`ApiRequest`] and hands it to
//! [`AtomGitClient::execute`], which attaches identity and credentials, decodes
//! the body, and turns non-2xx responses into a classified [`ApiError`].

use std::sync::Arc;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Method, Url};
use serde_json::Value;

use crate::config::{Config, ConfigError};
use crate::error::{ApiError, AtomGitError, Result};

/// One outbound call, as built by an operation.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header to this request, replacing any earlier value for `name`.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Query string parameters. Absent, zero and empty values are left out
/// entirely rather than sent empty.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, key: &'static str, value: Option<u64>) -> Self {
        if let Some(v) = value.filter(|v| *v != 0) {
            self.pairs.push((key, v.to_string()));
        }
        self
    }

    pub fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, v.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Whether `segment` can stand as one path segment. URL resolution drops
/// `.` and `..` and an empty segment collapses into its neighbour, so each of
/// those would address a different resource.
pub fn is_path_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

#[derive(Clone, Debug)]
pub struct AtomGitClient {
    http: reqwest::Client,
    config: Arc<Config>,
    default_headers: HeaderMap,
    authorization: Option<HeaderValue>,
}

impl AtomGitClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| ConfigError::InvalidHeader {
                header: "User-Agent",
                reason: e.to_string(),
            })?;
        default_headers.insert(USER_AGENT, user_agent);

        let authorization = match config.token.as_deref() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(
                    |e| ConfigError::InvalidHeader {
                        header: "Authorization",
                        reason: e.to_string(),
                    },
                )?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            http,
            config: Arc::new(config),
            default_headers,
            authorization,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a resource path under the API root. Each segment is
    /// percent-encoded on its own, so `/`, `?`, `#` and `%` inside a name stay
    /// inside that segment. Segments that [`is_path_segment`] refuses are an
    /// error rather than a silently different route.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        self.endpoint_with(segments, &Query::new())
    }

    pub fn endpoint_with(&self, segments: &[&str], query: &Query) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| !is_path_segment(s)) {
            return Err(AtomGitError::InvalidPathSegment(bad.to_string()));
        }
        let mut url = self.config.base_url.clone();
        // Config::new rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Issue exactly one HTTP call and return its decoded body.
    ///
    /// Request headers win over the client defaults, except `Authorization`
    /// which is always taken from the configured token when one is set.
    ///
    /// JSON responses are decoded, anything else is returned as a JSON string.
    /// The body is decoded before the status is checked so error payloads reach
    /// the classifier.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut merged = self.default_headers.clone();
        for (name, value) in headers.iter() {
            merged.insert(name.clone(), value.clone());
        }
        if let Some(ref auth) = self.authorization {
            merged.insert(AUTHORIZATION, auth.clone());
        }

        tracing::debug!(method = %method, url = %url, "Sending AtomGit request");

        let mut builder = self.http.request(method, url).headers(merged);
        if let Some(ref body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = response.text().await?;

        tracing::debug!(status = status.as_u16(), is_json, "Received AtomGit response");

        let parsed = if !is_json {
            Value::String(text)
        } else if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) if !status.is_success() => Value::String(text),
                Err(e) => return Err(AtomGitError::Decode(e)),
            }
        };

        if !status.is_success() {
            return Err(ApiError::classify(status.as_u16(), &parsed).into());
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client(base: &str) -> AtomGitClient {
        AtomGitClient::new(Config::new(base, None).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = make_client("https://api.atomgit.com");
        assert_eq!(
            client.endpoint(&["repos", "alice", "proj", "branches"]).unwrap().as_str(),
            "https://api.atomgit.com/repos/alice/proj/branches"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = make_client("http://localhost:8080/api/v5/");
        assert_eq!(
            client.endpoint(&["user"]).unwrap().as_str(),
            "http://localhost:8080/api/v5/user"
        );
    }

    #[test]
    fn test_endpoint_encodes_reserved_characters() {
        let client = make_client("https://api.atomgit.com");
        let url = client.endpoint(&["repos", "my org", "a/b", "branches", "v1#rc?x=1", "100%"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.atomgit.com/repos/my%20org/a%2Fb/branches/v1%23rc%3Fx=1/100%25"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_endpoint_refuses_dot_and_empty_segments() {
        let client = make_client("https://api.atomgit.com");
        for bad in [".", "..", ""] {
            let result = client.endpoint(&["repos", "a", "b", "issues", "1", "labels", bad]);
            match result {
                Err(AtomGitError::InvalidPathSegment(segment)) => assert_eq!(segment, bad),
                other => panic!("{bad:?} produced {other:?}"),
            }
        }
        assert!(client.endpoint(&["repos", "..", "b"]).is_err());
    }

    #[test]
    fn test_endpoint_keeps_dots_inside_names() {
        let client = make_client("https://api.atomgit.com");
        let url = client
            .endpoint(&["repos", "a", "b", "labels", "...", "v1.0", "%2e%2e"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.atomgit.com/repos/a/b/labels/.../v1.0/%252e%252e"
        );
    }

    #[test]
    fn test_query_omits_absent_and_zero() {
        let client = make_client("https://api.atomgit.com");
        let query = Query::new()
            .number("page", Some(0))
            .number("per_page", None)
            .text("search", Some(""));
        assert!(query.is_empty());
        let url = client.endpoint_with(&["users", "alice", "repos"], &query).unwrap();
        assert_eq!(url.as_str(), "https://api.atomgit.com/users/alice/repos");
    }

    #[test]
    fn test_query_keeps_supplied_values_in_order() {
        let client = make_client("https://api.atomgit.com");
        let query = Query::new()
            .number("page", Some(2))
            .number("per_page", Some(20))
            .text("search", Some("mcp server"));
        let url = client.endpoint_with(&["repos", "a", "b", "branches"], &query).unwrap();
        assert_eq!(url.query(), Some("page=2&per_page=20&search=mcp+server"));
    }

    #[test]
    fn test_request_builders() {
        let client = make_client("https://api.atomgit.com");
        let url = client.endpoint(&["user"]).unwrap();
        let req = ApiRequest::post(url.clone())
            .json(serde_json::json!({"title": "t"}))
            .header(ACCEPT, HeaderValue::from_static("text/plain"));
        assert_eq!(req.method, Method::POST);
        assert!(req.body.is_some());
        assert_eq!(req.headers.get(ACCEPT).unwrap(), "text/plain");

        assert_eq!(ApiRequest::get(url.clone()).method, Method::GET);
        assert!(ApiRequest::delete(url).body.is_none());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let config = Config::new("https://api.atomgit.com", Some("bad\ntoken".into())).unwrap();
        assert!(matches!(
            AtomGitClient::new(config),
            Err(AtomGitError::Config(ConfigError::InvalidHeader { .. }))
        ));
    }
}
