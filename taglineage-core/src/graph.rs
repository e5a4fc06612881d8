use crate::error::{Error, Result};
use crate::models::CommitDependencyRecord;

pub const START_MARKER: &str = "@startuml";
pub const END_MARKER: &str = "@enduml";

/// Extension of the diagram artifact.
pub const ARTIFACT_EXTENSION: &str = "puml";

/// PlantUML alias of the synthetic node that stands for the tag.
const ROOT_ALIAS: &str = "repo";

/// Render the records as a PlantUML component diagram.
///
/// Each record becomes a card holding its label and file list. Edges run
/// from every parent sha to its child, whether or not the parent is in the
/// record set, and the last (oldest) record feeds into the tag node.
pub fn render_plantuml(tag: &str, records: &[CommitDependencyRecord]) -> Result<String> {
    let root = records.last().ok_or(Error::EmptyLineage)?;

    let mut lines = vec![
        START_MARKER.to_string(),
        format!("node \"{}\" as {}", tag, ROOT_ALIAS),
    ];
    let mut edges = Vec::new();

    for record in records {
        lines.push(format!("card {} [", record.sha));
        lines.push(record.label().to_string());
        lines.push("--".to_string());
        lines.push(record.files.join("\n"));
        lines.push("]".to_string());

        edges.extend(
            record
                .parents
                .iter()
                .map(|parent| format!("{} --> {}", parent.sha, record.sha)),
        );
    }

    lines.extend(edges);
    lines.push(format!("{} --> {}", root.sha, ROOT_ALIAS));
    lines.push(END_MARKER.to_string());

    Ok(lines.join("\n"))
}
