use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A repository on a hosting service, parsed from `scheme://host/owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoReference {
    pub fn parse(locator: &str) -> Result<Self> {
        let malformed = || Error::MalformedLocator(locator.to_string());

        let (_, uri) = locator.split_once("://").ok_or_else(malformed)?;
        let uri = uri.trim_end_matches('/');

        let segments: Vec<&str> = uri.split('/').collect();
        let [host, owner, name] = segments.as_slice() else {
            return Err(malformed());
        };

        let name = name.strip_suffix(".git").unwrap_or(*name);
        if host.is_empty() || owner.is_empty() || name.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Default REST root for the host, e.g. `https://api.github.com`.
    pub fn default_api_root(&self) -> String {
        format!("https://api.{}", self.host)
    }

    /// File stem of the diagram artifact for `tag`.
    pub fn artifact_stem(&self, tag: &str) -> String {
        format!("{}@{}", self.name, tag)
    }
}

impl FromStr for RepoReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

/// URL builder for the three read-only endpoints the lineage walk consumes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    repo_root: String,
}

impl Endpoints {
    pub fn new(repo: &RepoReference) -> Self {
        Self::with_api_root(&repo.default_api_root(), repo)
    }

    pub fn with_api_root(api_root: &str, repo: &RepoReference) -> Self {
        Self {
            repo_root: format!(
                "{}/repos/{}/{}",
                api_root.trim_end_matches('/'),
                repo.owner,
                repo.name
            ),
        }
    }

    pub fn tags(&self, per_page: u32) -> String {
        format!("{}/tags?per_page={}", self.repo_root, per_page)
    }

    pub fn commits(&self, sha: &str, per_page: u32) -> String {
        format!("{}/commits?sha={}&per_page={}", self.repo_root, sha, per_page)
    }

    /// Compare `base...head` as the hosting API defines it.
    pub fn compare(&self, base: &str, head: &str) -> String {
        format!("{}/compare/{}...{}", self.repo_root, base, head)
    }
}
