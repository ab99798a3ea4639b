//! CLI argument definitions.

use clap::Parser;

use crate::commands::ReportCmd;

/// With no arguments, builds `neovim-unwrapped.src` with nix-build and
/// reports the grammars declared in its build.zig.zon.
#[derive(Parser)]
#[command(name = "grammar-report")]
#[command(about = "List the tree-sitter grammar dependencies declared in build.zig.zon")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub report: ReportCmd,
}

impl Cli {
    pub async fn execute(&self) -> anyhow::Result<()> {
        self.report.run().await
    }
}
