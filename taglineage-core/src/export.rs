use crate::error::Result;
use crate::graph::ARTIFACT_EXTENSION;
use crate::repo::RepoReference;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

const PLANTUML_LIMIT_SIZE: u32 = 102_400;

/// Write `diagram` to `{out_dir}/{repo}@{tag}.puml`, creating `out_dir` if needed.
pub fn write_artifact(
    out_dir: &Path,
    repo: &RepoReference,
    tag: &str,
    diagram: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;

    let path = out_dir.join(format!("{}.{}", repo.artifact_stem(tag), ARTIFACT_EXTENSION));
    std::fs::write(&path, diagram)?;
    info!("Wrote diagram to {:?}", path);

    Ok(path)
}

/// External program that turns the artifacts in a directory into images.
#[derive(Debug, Clone)]
pub struct Renderer {
    executable: PathBuf,
}

impl Renderer {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn is_jar(&self) -> bool {
        self.executable
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"))
    }

    /// Command line for rendering `out_dir`. Jars are launched through `java`.
    pub fn command(&self, out_dir: &Path) -> Command {
        let mut command = if self.is_jar() {
            let mut java = Command::new("java");
            java.arg(format!("-DPLANTUML_LIMIT_SIZE={}", PLANTUML_LIMIT_SIZE))
                .arg("-jar")
                .arg(&self.executable);
            java
        } else {
            Command::new(&self.executable)
        };
        command.arg(out_dir).stdout(Stdio::null());
        command
    }

    /// Run the renderer and wait for it. The exit status is only logged.
    pub fn run(&self, out_dir: &Path) -> Result<()> {
        info!("Rendering {:?} with {:?}", out_dir, self.executable);
        let status = self.command(out_dir).status()?;
        debug!("Renderer exited with {}", status);
        Ok(())
    }
}
