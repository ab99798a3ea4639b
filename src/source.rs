//! Source tree resolution.
//!
//! Runs `<build-tool> <project-root> -A <attribute> --no-out-link` and takes
//! the single path it prints on stdout as the source tree.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::ReportError;

/// One build tool invocation.
#[derive(Debug, Clone)]
pub struct BuildInvocation {
    pub tool: String,
    pub project_root: PathBuf,
    pub attribute: String,
}

impl BuildInvocation {
    pub fn args(&self) -> Vec<String> {
        vec![
            self.project_root.display().to_string(),
            "-A".to_string(),
            self.attribute.clone(),
            "--no-out-link".to_string(),
        ]
    }

    /// Run the build and return the trimmed path it printed.
    ///
    /// The path is not checked; a bad one fails later when the manifest is read.
    pub async fn resolve(&self) -> Result<PathBuf, ReportError> {
        let args = self.args();
        tracing::debug!("running {} {}", self.tool, args.join(" "));

        let output = Command::new(&self.tool)
            .args(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| ReportError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ReportError::BuildFailed {
                tool: self.tool.clone(),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.trim();
        if path.is_empty() {
            return Err(ReportError::EmptyOutput {
                tool: self.tool.clone(),
            });
        }

        tracing::debug!("source tree: {}", path);
        Ok(PathBuf::from(path))
    }
}

/// Read the manifest file from a source tree.
pub fn read_manifest(source: &Path, manifest_file: &str) -> Result<String, ReportError> {
    let path = source.join(manifest_file);
    tracing::debug!("reading {}", path.display());
    std::fs::read_to_string(&path).map_err(|source| ReportError::ReadManifest { path, source })
}
