//! # taglineage-client
//!
//! Blocking HTTP transport for the GitHub REST API.
//!
//! ## Example
//!
//! ```no_run
//! use taglineage_client::GitHubClient;
//! use taglineage_core::{collect_dependencies, Endpoints, RepoReference};
//!
//! let repo = RepoReference::parse("https://github.com/user/repo").unwrap();
//! let client = GitHubClient::new("ghp_token").unwrap();
//!
//! let records = collect_dependencies(&client, &Endpoints::new(&repo), "v1.0", 100).unwrap();
//! ```

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use taglineage_core::{ApiTransport, Error};
use tracing::debug;

const USER_AGENT: &str = concat!("taglineage/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Authenticated session against a GitHub-compatible API.
///
/// The token is sent as the username of a basic-auth pair with an empty
/// password. One client is meant to serve every request of a lineage walk.
pub struct GitHubClient {
    token: String,
    client: reqwest::blocking::Client,
}

impl GitHubClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `token` - Personal access token used for every request
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            token: token.into(),
            client,
        })
    }

    fn fetch(&self, url: &str) -> taglineage_core::Result<Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.token, Some(""))
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json().map_err(|e| Error::Transport(e.to_string()))
    }
}

impl ApiTransport for GitHubClient {
    fn get_json(&self, url: &str) -> taglineage_core::Result<Value> {
        self.fetch(url)
    }
}
