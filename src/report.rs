//! Report rendering.

use std::io::Write;

use clap::ValueEnum;
use indexmap::IndexMap;

use crate::error::ReportError;
use crate::manifests::ParserDependency;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write the parser report to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    manifest_file: &str,
    parsers: &IndexMap<String, ParserDependency>,
    format: OutputFormat,
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Text => write_text(out, manifest_file, parsers),
        OutputFormat::Json => write_json(out, parsers),
    }
}

fn write_text<W: Write>(
    out: &mut W,
    manifest_file: &str,
    parsers: &IndexMap<String, ParserDependency>,
) -> Result<(), ReportError> {
    writeln!(out, "Tree-sitter parsers found in {}:", manifest_file)?;
    for (lang, dep) in parsers {
        writeln!(out, "  {}: {} @ {}", lang, dep.repository, dep.version)?;
        writeln!(out, "    hash: {}", dep.hash)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Note: With the Zig build system, tree-sitter parsers are managed"
    )?;
    writeln!(
        out,
        "automatically via build.zig.zon and don't need a separate .nix file."
    )?;
    Ok(())
}

fn write_json<W: Write>(
    out: &mut W,
    parsers: &IndexMap<String, ParserDependency>,
) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, parsers)?;
    writeln!(out)?;
    Ok(())
}
