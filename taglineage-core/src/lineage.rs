//! Tag resolution, history walking and pairwise diff aggregation.
//!
//! Every request goes through an [`ApiTransport`], so the algorithm runs the
//! same against the real HTTP client and against canned responses.

use crate::error::{Error, Result};
use crate::models::{
    CommitDependencyRecord, CommitDescriptor, FileChange, FileStatus, ParentRef, TagEntry,
};
use crate::repo::Endpoints;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Authenticated GET against the hosting API, returning the decoded body.
///
/// Implementations report a non-success response as [`Error::Upstream`].
pub trait ApiTransport {
    fn get_json(&self, url: &str) -> Result<Value>;
}

impl<T: ApiTransport + ?Sized> ApiTransport for &T {
    fn get_json(&self, url: &str) -> Result<Value> {
        (**self).get_json(url)
    }
}

#[derive(Deserialize)]
struct WireTag {
    name: String,
    commit: WireSha,
}

#[derive(Deserialize)]
struct WireSha {
    sha: String,
}

#[derive(Deserialize)]
struct WireCommit {
    sha: String,
    commit: WireCommitDetail,
    #[serde(default)]
    parents: Vec<ParentRef>,
}

#[derive(Deserialize)]
struct WireCommitDetail {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct WireCompare {
    #[serde(default)]
    files: Vec<WireFile>,
}

#[derive(Deserialize)]
struct WireFile {
    status: String,
    filename: String,
}

impl From<WireTag> for TagEntry {
    fn from(tag: WireTag) -> Self {
        TagEntry {
            name: tag.name,
            commit_sha: tag.commit.sha,
        }
    }
}

impl From<WireCommit> for CommitDescriptor {
    fn from(commit: WireCommit) -> Self {
        CommitDescriptor {
            sha: commit.sha,
            message: commit.commit.message,
            parents: commit.parents,
        }
    }
}

impl From<WireFile> for FileChange {
    fn from(file: WireFile) -> Self {
        FileChange::new(FileStatus::parse(&file.status), file.filename)
    }
}

fn fetch_fatal<T: ApiTransport + ?Sized>(api: &T, url: &str) -> Result<Value> {
    api.get_json(url).inspect_err(|e| match e {
        Error::Upstream { status, body, .. } => {
            error!("Request to {} failed ({}): {}", url, status, body)
        }
        other => error!("Request to {} failed: {}", url, other),
    })
}

pub fn list_tags<T: ApiTransport + ?Sized>(
    api: &T,
    endpoints: &Endpoints,
    page_size: u32,
) -> Result<Vec<TagEntry>> {
    let value = fetch_fatal(api, &endpoints.tags(page_size))?;
    let tags: Vec<WireTag> = serde_json::from_value(value)?;
    Ok(tags.into_iter().map(TagEntry::from).collect())
}

/// Resolve `tag` to its commit sha. `Ok(None)` means the tag is not in the
/// first `page_size` entries of the listing.
pub fn resolve_tag<T: ApiTransport + ?Sized>(
    api: &T,
    endpoints: &Endpoints,
    tag: &str,
    page_size: u32,
) -> Result<Option<String>> {
    let sha = list_tags(api, endpoints, page_size)?
        .into_iter()
        .find(|entry| entry.name == tag)
        .map(|entry| entry.commit_sha);

    match &sha {
        Some(sha) => info!("Resolved tag {} to {}", tag, sha),
        None => info!("Tag {} not found", tag),
    }

    Ok(sha)
}

/// Fetch up to `page_size` commits reachable from `sha`, newest first.
pub fn walk_lineage<T: ApiTransport + ?Sized>(
    api: &T,
    endpoints: &Endpoints,
    sha: &str,
    page_size: u32,
) -> Result<Vec<CommitDescriptor>> {
    let value = fetch_fatal(api, &endpoints.commits(sha, page_size))?;
    let commits: Vec<WireCommit> = serde_json::from_value(value)?;

    if commits.len() >= page_size as usize {
        warn!(
            "History from {} filled the {}-commit window; older commits are not included",
            sha, page_size
        );
    }
    debug!("Walked {} commits from {}", commits.len(), sha);

    Ok(commits.into_iter().map(CommitDescriptor::from).collect())
}

fn fetch_diff<T: ApiTransport + ?Sized>(api: &T, url: &str) -> Result<Vec<FileChange>> {
    let compare: WireCompare = serde_json::from_value(api.get_json(url)?)?;
    Ok(compare.files.into_iter().map(FileChange::from).collect())
}

/// Diff every commit in `commits` (newest first) against the older commit
/// that follows it, producing one record per newer commit of each pair.
///
/// The oldest commit of the window only serves as a base and gets no record,
/// except in a one-commit window where the commit is compared against its
/// first parent instead. A failed compare leaves a gap in the output and the
/// walk moves on to the next pair.
pub fn aggregate_diffs<T: ApiTransport + ?Sized>(
    api: &T,
    endpoints: &Endpoints,
    commits: &[CommitDescriptor],
) -> Vec<CommitDependencyRecord> {
    let pairs: Vec<(&CommitDescriptor, &str)> = match commits {
        [only] => only
            .parents
            .first()
            .map(|parent| (only, parent.sha.as_str()))
            .into_iter()
            .collect(),
        _ => commits
            .windows(2)
            .map(|pair| (&pair[0], pair[1].sha.as_str()))
            .collect(),
    };

    let mut records = Vec::with_capacity(pairs.len());
    for (commit, base) in pairs {
        let url = endpoints.compare(base, &commit.sha);
        debug!("Comparing {}...{}", base, commit.sha);

        match fetch_diff(api, &url) {
            Ok(changes) => records.push(CommitDependencyRecord::from_diff(commit, &changes)),
            Err(e) => warn!("Skipping {}: {}", commit.sha, e),
        }
    }

    records
}

/// Resolve `tag`, walk its history and aggregate the pairwise diffs.
///
/// Returns `Ok(None)` when the tag does not exist.
pub fn collect_dependencies<T: ApiTransport + ?Sized>(
    api: &T,
    endpoints: &Endpoints,
    tag: &str,
    depth: u32,
) -> Result<Option<Vec<CommitDependencyRecord>>> {
    let Some(sha) = resolve_tag(api, endpoints, tag, depth)? else {
        return Ok(None);
    };

    let commits = walk_lineage(api, endpoints, &sha, depth)?;
    let records = aggregate_diffs(api, endpoints, &commits);
    info!(
        "Collected {} dependency records from {} commits",
        records.len(),
        commits.len()
    );

    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MERGE_COMMIT_SENTINEL;
    use crate::repo::RepoReference;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct ScriptedTransport {
        responses: HashMap<String, Value>,
        requests: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn respond(mut self, url: String, body: Value) -> Self {
            self.responses.insert(url, body);
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl ApiTransport for ScriptedTransport {
        fn get_json(&self, url: &str) -> Result<Value> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses.get(url).cloned().ok_or_else(|| Error::Upstream {
                url: url.to_string(),
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }

    fn endpoints() -> Endpoints {
        Endpoints::new(&RepoReference::parse("https://github.com/user/repo").unwrap())
    }

    fn history(shas: &[&str]) -> Value {
        let entries: Vec<Value> = shas
            .iter()
            .enumerate()
            .map(|(i, sha)| {
                let parents: Vec<Value> = shas
                    .get(i + 1)
                    .map(|parent| vec![json!({ "sha": parent })])
                    .unwrap_or_default();
                json!({
                    "sha": sha,
                    "commit": { "message": format!("commit {sha}") },
                    "parents": parents,
                })
            })
            .collect();
        Value::Array(entries)
    }

    fn added(file: &str) -> Value {
        json!({ "files": [{ "status": "added", "filename": file }] })
    }

    #[test]
    fn test_resolve_tag() {
        let endpoints = endpoints();
        let api = ScriptedTransport::default().respond(
            endpoints.tags(10),
            json!([
                { "name": "v0.9", "commit": { "sha": "0000" } },
                { "name": "v1.0", "commit": { "sha": "1234" } },
            ]),
        );

        assert_eq!(
            resolve_tag(&api, &endpoints, "v1.0", 10).unwrap(),
            Some("1234".to_string())
        );
        assert_eq!(resolve_tag(&api, &endpoints, "v2.0", 10).unwrap(), None);
    }

    #[test]
    fn test_resolve_tag_takes_first_match() {
        let endpoints = endpoints();
        let api = ScriptedTransport::default().respond(
            endpoints.tags(10),
            json!([
                { "name": "v1.0", "commit": { "sha": "aaaa" } },
                { "name": "v1.0", "commit": { "sha": "bbbb" } },
            ]),
        );

        assert_eq!(
            resolve_tag(&api, &endpoints, "v1.0", 10).unwrap(),
            Some("aaaa".to_string())
        );
    }

    #[test]
    fn test_resolve_tag_upstream_failure_is_fatal() {
        let api = ScriptedTransport::default();
        let result = resolve_tag(&api, &endpoints(), "v1.0", 10);
        assert!(matches!(result, Err(Error::Upstream { status: 404, .. })));
    }

    #[test]
    fn test_walk_lineage_preserves_order() {
        let endpoints = endpoints();
        let api = ScriptedTransport::default()
            .respond(endpoints.commits("cccc", 50), history(&["cccc", "bbbb", "aaaa"]));

        let commits = walk_lineage(&api, &endpoints, "cccc", 50).unwrap();
        let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();

        assert_eq!(shas, vec!["cccc", "bbbb", "aaaa"]);
        assert_eq!(commits[0].message, "commit cccc");
        assert_eq!(commits[0].parents, vec![ParentRef::new("bbbb")]);
        assert!(commits[2].parents.is_empty());
    }

    #[test]
    fn test_walk_lineage_upstream_failure_is_fatal() {
        let api = ScriptedTransport::default();
        assert!(walk_lineage(&api, &endpoints(), "cccc", 50).is_err());
    }

    #[test]
    fn test_aggregate_single_pair() {
        let endpoints = endpoints();
        let commits = vec![
            CommitDescriptor::new("5678", "Test commit").with_parent("1234"),
            CommitDescriptor::new("1234", "Initial"),
        ];
        let api = ScriptedTransport::default()
            .respond(endpoints.compare("1234", "5678"), added("file1.txt"));

        let records = aggregate_diffs(&api, &endpoints, &commits);

        assert_eq!(
            records,
            vec![CommitDependencyRecord {
                sha: "5678".to_string(),
                message: "Test commit".to_string(),
                parents: vec![ParentRef::new("1234")],
                files: vec!["+ /file1.txt".to_string()],
            }]
        );
        assert_eq!(
            api.requests(),
            vec!["https://api.github.com/repos/user/repo/compare/1234...5678"]
        );
    }

    #[test]
    fn test_aggregate_empty_diff_yields_sentinel() {
        let endpoints = endpoints();
        let commits = vec![
            CommitDescriptor::new("bbbb", "Merge branch 'feature'")
                .with_parent("aaaa")
                .with_parent("ffff"),
            CommitDescriptor::new("aaaa", "a"),
        ];
        let api = ScriptedTransport::default()
            .respond(endpoints.compare("aaaa", "bbbb"), json!({ "files": [] }));

        let records = aggregate_diffs(&api, &endpoints, &commits);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].files, vec![MERGE_COMMIT_SENTINEL]);
        assert_eq!(records[0].parents.len(), 2);
    }

    #[test]
    fn test_aggregate_skips_failed_diff_and_advances() {
        let endpoints = endpoints();
        let commits = vec![
            CommitDescriptor::new("dddd", "d"),
            CommitDescriptor::new("cccc", "c"),
            CommitDescriptor::new("bbbb", "b"),
            CommitDescriptor::new("aaaa", "a"),
        ];
        // cccc...dddd is left unscripted and fails.
        let api = ScriptedTransport::default()
            .respond(endpoints.compare("bbbb", "cccc"), added("c.txt"))
            .respond(endpoints.compare("aaaa", "bbbb"), added("b.txt"));

        let records = aggregate_diffs(&api, &endpoints, &commits);
        let shas: Vec<&str> = records.iter().map(|r| r.sha.as_str()).collect();

        assert_eq!(shas, vec!["cccc", "bbbb"]);
        assert_eq!(records[0].files, vec!["+ /c.txt"]);
        assert_eq!(
            api.requests(),
            vec![
                endpoints.compare("cccc", "dddd"),
                endpoints.compare("bbbb", "cccc"),
                endpoints.compare("aaaa", "bbbb"),
            ]
        );
    }

    #[test]
    fn test_aggregate_skips_undecodable_diff() {
        let endpoints = endpoints();
        let commits = vec![CommitDescriptor::new("bbbb", "b"), CommitDescriptor::new("aaaa", "a")];
        let api = ScriptedTransport::default()
            .respond(endpoints.compare("aaaa", "bbbb"), json!({ "files": "nope" }));

        assert!(aggregate_diffs(&api, &endpoints, &commits).is_empty());
    }

    #[test]
    fn test_aggregate_single_commit_window_uses_first_parent() {
        let endpoints = endpoints();
        let commits = vec![CommitDescriptor::new("5678", "Test commit").with_parent("1234")];
        let api = ScriptedTransport::default()
            .respond(endpoints.compare("1234", "5678"), added("file1.txt"));

        let records = aggregate_diffs(&api, &endpoints, &commits);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sha, "5678");
        assert_eq!(records[0].files, vec!["+ /file1.txt"]);
    }

    #[test]
    fn test_aggregate_without_base_makes_no_requests() {
        let api = ScriptedTransport::default();
        let endpoints = endpoints();

        assert!(aggregate_diffs(&api, &endpoints, &[]).is_empty());
        assert!(aggregate_diffs(&api, &endpoints, &[CommitDescriptor::new("aaaa", "root")]).is_empty());
        assert!(api.requests().is_empty());
    }

    #[test]
    fn test_collect_dependencies() {
        let endpoints = endpoints();
        let api = ScriptedTransport::default()
            .respond(
                endpoints.tags(10),
                json!([{ "name": "v1.0", "commit": { "sha": "5678" } }]),
            )
            .respond(
                endpoints.commits("5678", 10),
                json!([
                    { "sha": "5678", "commit": { "message": "Test commit" }, "parents": [{ "sha": "1234" }] },
                    { "sha": "1234", "commit": { "message": "Initial" }, "parents": [] },
                ]),
            )
            .respond(endpoints.compare("1234", "5678"), added("file1.txt"));

        let records = collect_dependencies(&api, &endpoints, "v1.0", 10)
            .unwrap()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sha, "5678");
        assert_eq!(records[0].message, "Test commit");
        assert_eq!(records[0].files, vec!["+ /file1.txt"]);
        assert_eq!(api.requests().len(), 3);
    }

    #[test]
    fn test_collect_dependencies_unknown_tag() {
        let endpoints = endpoints();
        let api = ScriptedTransport::default().respond(endpoints.tags(10), json!([]));

        assert!(collect_dependencies(&api, &endpoints, "v1.0", 10)
            .unwrap()
            .is_none());
        assert_eq!(api.requests().len(), 1);
    }
}
