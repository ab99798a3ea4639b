//! Report command - list the tree-sitter grammars a source tree's manifest declares.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ReportConfig;
use crate::manifests::parse_zon_parsers;
use crate::report::{OutputFormat, write_report};
use crate::source::{BuildInvocation, read_manifest};

#[derive(Args, Debug, Default)]
pub struct ReportCmd {
    /// Project root passed to the build tool (default: .)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Attribute that builds the source tree (default: neovim-unwrapped.src)
    #[arg(long = "attr")]
    pub attribute: Option<String>,

    /// Build tool used to materialize the source tree (default: nix-build)
    #[arg(long)]
    pub build_tool: Option<String>,

    /// Manifest file inside the source tree (default: build.zig.zon)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Use an existing source tree instead of running the build tool
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file (default: ./.grammar-report.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ReportCmd {
    pub async fn run(&self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&cwd, &mut out).await
    }

    /// Run the pipeline, writing the report to `out`.
    ///
    /// Nothing is written unless the source tree and manifest were both read.
    pub async fn run_to<W: Write>(&self, cwd: &Path, out: &mut W) -> Result<()> {
        let config = self.config(cwd)?;

        let source = match &self.source {
            Some(path) => path.clone(),
            None => self
                .invocation(&config)
                .resolve()
                .await
                .context("Failed to resolve source tree")?,
        };

        let content = read_manifest(&source, &config.manifest_file)?;
        let parsers = parse_zon_parsers(&content);

        write_report(out, &config.manifest_file, &parsers, self.format)?;
        Ok(())
    }

    /// Config file values with command line overrides applied.
    fn config(&self, cwd: &Path) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load_file(path)?,
            None => ReportConfig::load(cwd)?,
        };

        if let Some(root) = &self.project_root {
            config.project_root = root.clone();
        }
        if let Some(attr) = &self.attribute {
            config.attribute = attr.clone();
        }
        if let Some(tool) = &self.build_tool {
            config.build_tool = tool.clone();
        }
        if let Some(manifest) = &self.manifest {
            config.manifest_file = manifest.clone();
        }

        Ok(config)
    }

    fn invocation(&self, config: &ReportConfig) -> BuildInvocation {
        BuildInvocation {
            tool: config.build_tool.clone(),
            project_root: config.project_root.clone(),
            attribute: config.attribute.clone(),
        }
    }
}
