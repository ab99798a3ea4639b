//! Report configuration.
//!
//! Read from `.grammar-report.toml` in the current directory, or from an
//! explicit `--config` path. Every key is optional:
//! - `build_tool` - command that materializes the source tree
//! - `project_root` - first argument passed to the build tool
//! - `attribute` - attribute built with `-A`
//! - `manifest_file` - manifest name inside the source tree

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

pub const CONFIG_FILE: &str = ".grammar-report.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    #[serde(default = "default_attribute")]
    pub attribute: String,

    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
}

fn default_build_tool() -> String {
    "nix-build".to_string()
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_attribute() -> String {
    "neovim-unwrapped.src".to_string()
}

fn default_manifest_file() -> String {
    "build.zig.zon".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            project_root: default_project_root(),
            attribute: default_attribute(),
            manifest_file: default_manifest_file(),
        }
    }
}

impl ReportConfig {
    /// Load `.grammar-report.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self, ReportError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load an explicit config file. The file must exist.
    pub fn load_file(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ReportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
