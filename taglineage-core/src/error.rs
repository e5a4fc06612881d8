use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed repository locator: {0}")]
    MalformedLocator(String),

    #[error("Upstream request to {url} failed with status {status}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No commit dependencies to render")]
    EmptyLineage,
}

impl Error {
    /// True for errors produced by a non-success upstream response.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream { .. })
    }
}
