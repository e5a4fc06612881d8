use serde::{Deserialize, Serialize};

/// Placeholder file entry for a diff that reports no file changes.
pub const MERGE_COMMIT_SENTINEL: &str = "Merge commit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub commit_sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub sha: String,
}

impl ParentRef {
    pub fn new(sha: impl Into<String>) -> Self {
        Self { sha: sha.into() }
    }
}

/// One entry of the commit history listing, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDescriptor {
    pub sha: String,
    pub message: String,
    pub parents: Vec<ParentRef>,
}

impl CommitDescriptor {
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            parents: Vec::new(),
        }
    }

    pub fn with_parent(mut self, sha: impl Into<String>) -> Self {
        self.parents.push(ParentRef::new(sha));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Other(String),
}

impl FileStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "added" => FileStatus::Added,
            "removed" => FileStatus::Removed,
            "modified" => FileStatus::Modified,
            "renamed" => FileStatus::Renamed,
            other => FileStatus::Other(other.to_string()),
        }
    }

    /// Diagram symbol for this status. Unknown statuses pass through verbatim.
    pub fn symbol(&self) -> &str {
        match self {
            FileStatus::Added => "+",
            FileStatus::Removed => "-",
            FileStatus::Modified => "~",
            FileStatus::Renamed => "@",
            FileStatus::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub status: FileStatus,
    pub path: String,
}

impl FileChange {
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    pub fn format(&self) -> String {
        format!("{} /{}", self.status.symbol(), self.path)
    }
}

/// A commit paired with the files changed against its predecessor in the
/// lineage window. `files` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDependencyRecord {
    pub sha: String,
    pub message: String,
    pub parents: Vec<ParentRef>,
    pub files: Vec<String>,
}

impl CommitDependencyRecord {
    pub fn from_diff(commit: &CommitDescriptor, changes: &[FileChange]) -> Self {
        let mut files: Vec<String> = changes.iter().map(FileChange::format).collect();
        if files.is_empty() {
            files.push(MERGE_COMMIT_SENTINEL.to_string());
        }

        Self {
            sha: commit.sha.clone(),
            message: commit.message.clone(),
            parents: commit.parents.clone(),
            files,
        }
    }

    /// Label shown inside the diagram card.
    pub fn label(&self) -> &str {
        if self.message.is_empty() {
            &self.sha
        } else {
            &self.message
        }
    }

    pub fn is_merge(&self) -> bool {
        self.files.len() == 1 && self.files[0] == MERGE_COMMIT_SENTINEL
    }
}
