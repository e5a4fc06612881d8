use crate::error::{Error, Result};
use crate::repo::{Endpoints, RepoReference};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";
pub const DEFAULT_DEPTH: u32 = 1000;
pub const DEFAULT_OUT_DIR: &str = "out";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub token: String,
    pub repo: String,
    pub tag: String,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default, alias = "puml_executable", alias = "rendererPath")]
    pub renderer_path: Option<PathBuf>,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// REST root override, e.g. `https://ghe.example.com/api/v3`.
    #[serde(default)]
    pub api_url: Option<String>,
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR)
}

impl Settings {
    pub fn new(token: impl Into<String>, repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            repo: repo.into(),
            tag: tag.into(),
            depth: DEFAULT_DEPTH,
            renderer_path: None,
            out_dir: default_out_dir(),
            api_url: None,
        }
    }

    /// Load settings from a YAML (`.yml`, `.yaml`) or TOML (`.toml`) file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::Config("token cannot be empty".to_string()));
        }

        if self.tag.is_empty() {
            return Err(Error::Config("tag cannot be empty".to_string()));
        }

        if self.depth == 0 {
            return Err(Error::Config("depth must be greater than 0".to_string()));
        }

        self.repo_reference().map(|_| ())
    }

    pub fn repo_reference(&self) -> Result<RepoReference> {
        RepoReference::parse(&self.repo)
    }

    pub fn endpoints(&self, repo: &RepoReference) -> Endpoints {
        match &self.api_url {
            Some(root) => Endpoints::with_api_root(root, repo),
            None => Endpoints::new(repo),
        }
    }
}
