//! Manifest file parsing for grammar dependency extraction.

mod zon;

use serde::Serialize;

pub use zon::parse_zon_parsers;

/// A tree-sitter grammar dependency extracted from a manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserDependency {
    /// Language name, the `<lang>` in `.treesitter_<lang>`.
    #[serde(skip)]
    pub language_key: String,
    /// `owner/name` on GitHub.
    pub repository: String,
    /// The `?ref=` tag, usually something like `v0.24.1`.
    pub version: String,
    pub hash: String,
}
