//! Zig package manifest parsing (build.zig.zon).
//!
//! Only `.treesitter_<lang>` dependencies are extracted. Each one carries a
//! git URL of the form `git+https://github.com/<owner>/<repo>?ref=<tag>#<rev>`
//! and a content hash.
//!
//! Matching is regex based and stops at the first `}` after the block opens,
//! so a `}` inside a string value ahead of the fields hides that block.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use super::ParserDependency;

/// `.treesitter_<lang> = { ... }` with `.url` and `.hash` in either order.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\.treesitter_(\w+)\s*=\s*\{(?:"#,
        r#"[^}]*?\.url\s*=\s*"([^"]+)"[^}]*?\.hash\s*=\s*"([^"]+)""#,
        r#"|"#,
        r#"[^}]*?\.hash\s*=\s*"([^"]+)"[^}]*?\.url\s*=\s*"([^"]+)""#,
        r#")"#,
    ))
    .expect("valid block regex")
});

static REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?ref=([^#]+)").expect("valid ref regex"));

static REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^?]+)").expect("valid repo regex"));

/// Extract tree-sitter parser dependencies from build.zig.zon content.
///
/// Entries keep the order their language first appears in. A repeated
/// language overwrites the earlier entry's data. Blocks whose URL has no
/// `?ref=` tag or no GitHub repository are dropped.
pub fn parse_zon_parsers(content: &str) -> IndexMap<String, ParserDependency> {
    let mut parsers = IndexMap::new();

    for caps in BLOCK_RE.captures_iter(content) {
        let language = &caps[1];
        let (url, hash) = url_and_hash(&caps);

        let Some(dep) = parse_block(language, url, hash) else {
            tracing::debug!("skipping treesitter_{}: unrecognized url {}", language, url);
            continue;
        };

        parsers.insert(dep.language_key.clone(), dep);
    }

    tracing::debug!("found {} parser dependencies", parsers.len());
    parsers
}

fn url_and_hash<'h>(caps: &Captures<'h>) -> (&'h str, &'h str) {
    match (caps.get(2), caps.get(3)) {
        (Some(url), Some(hash)) => (url.as_str(), hash.as_str()),
        // hash-first branch
        _ => (
            caps.get(5).map_or("", |m| m.as_str()),
            caps.get(4).map_or("", |m| m.as_str()),
        ),
    }
}

fn parse_block(language: &str, url: &str, hash: &str) -> Option<ParserDependency> {
    let version = REF_RE.captures(url)?.get(1)?.as_str();
    let repository = REPO_RE.captures(url)?.get(1)?.as_str();

    Some(ParserDependency {
        language_key: language.to_string(),
        repository: repository.to_string(),
        version: version.to_string(),
        hash: hash.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_block() {
        let content = r#"
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1#abc123",
    .hash = "sha256-XXXX",
},
"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers.len(), 1);

        let c = &parsers["c"];
        assert_eq!(c.language_key, "c");
        assert_eq!(c.repository, "tree-sitter/tree-sitter-c");
        assert_eq!(c.version, "v0.24.1");
        assert_eq!(c.hash, "sha256-XXXX");
    }

    #[test]
    fn test_parse_multiple_blocks_in_order() {
        let content = r#"
.treesitter_lua = {
    .url = "git+https://github.com/tree-sitter-grammars/tree-sitter-lua?ref=v0.4.0#f1",
    .hash = "hash-lua",
},
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1#f2",
    .hash = "hash-c",
},
.treesitter_vim = {
    .url = "git+https://github.com/tree-sitter-grammars/tree-sitter-vim?ref=v0.7.0#f3",
    .hash = "hash-vim",
},
"#;
        let parsers = parse_zon_parsers(content);
        let keys: Vec<_> = parsers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["lua", "c", "vim"]);

        for dep in parsers.values() {
            assert!(!dep.repository.is_empty());
            assert!(!dep.version.is_empty());
            assert!(!dep.hash.is_empty());
        }
        assert_eq!(parsers["vim"].repository, "tree-sitter-grammars/tree-sitter-vim");
        assert_eq!(parsers["lua"].version, "v0.4.0");
    }

    #[test]
    fn test_skip_block_without_ref() {
        let content = r#"
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c#abc123",
    .hash = "hash-c",
},
.treesitter_lua = {
    .url = "git+https://github.com/tree-sitter-grammars/tree-sitter-lua?ref=v0.4.0#f1",
    .hash = "hash-lua",
},
"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers.len(), 1);
        assert!(!parsers.contains_key("c"));
        assert_eq!(parsers["lua"].hash, "hash-lua");
    }

    #[test]
    fn test_skip_block_without_github_repo() {
        let content = r#"
.treesitter_query = {
    .url = "git+https://codeberg.org/grammars/tree-sitter-query?ref=v0.5.0#f1",
    .hash = "hash-query",
},
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1#f2",
    .hash = "hash-c",
},
"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers.len(), 1);
        assert!(parsers.contains_key("c"));
    }

    #[test]
    fn test_duplicate_language_overwrites() {
        let content = r#"
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.23.0#old",
    .hash = "hash-old",
},
.treesitter_lua = {
    .url = "git+https://github.com/tree-sitter-grammars/tree-sitter-lua?ref=v0.4.0#f1",
    .hash = "hash-lua",
},
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1#new",
    .hash = "hash-new",
},
"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers.len(), 2);
        assert_eq!(parsers["c"].version, "v0.24.1");
        assert_eq!(parsers["c"].hash, "hash-new");

        let keys: Vec<_> = parsers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "lua"]);
    }

    #[test]
    fn test_hash_before_url() {
        let content = r#"
.treesitter_markdown = {
    .hash = "hash-md",
    .lazy = true,
    .url = "git+https://github.com/tree-sitter-grammars/tree-sitter-markdown?ref=v0.5.0#f1",
},
"#;
        let parsers = parse_zon_parsers(content);
        let md = &parsers["markdown"];
        assert_eq!(md.repository, "tree-sitter-grammars/tree-sitter-markdown");
        assert_eq!(md.version, "v0.5.0");
        assert_eq!(md.hash, "hash-md");
    }

    #[test]
    fn test_ref_without_fragment() {
        let content = r#".treesitter_c = { .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1", .hash = "h" },"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers["c"].version, "v0.24.1");
    }

    #[test]
    fn test_ignores_other_dependencies() {
        let content = r#"
.lua = {
    .url = "https://github.com/lua/lua/archive/v5.1.5.tar.gz",
    .hash = "hash-lua-runtime",
},
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1#f2",
    .hash = "hash-c",
},
"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers.len(), 1);
        assert!(parsers.contains_key("c"));
    }

    #[test]
    fn test_block_missing_hash_does_not_borrow_from_next() {
        let content = r#"
.treesitter_c = {
    .url = "git+https://github.com/tree-sitter/tree-sitter-c?ref=v0.24.1#f2",
},
.treesitter_lua = {
    .url = "git+https://github.com/tree-sitter-grammars/tree-sitter-lua?ref=v0.4.0#f1",
    .hash = "hash-lua",
},
"#;
        let parsers = parse_zon_parsers(content);
        assert_eq!(parsers.len(), 1);
        assert_eq!(parsers["lua"].hash, "hash-lua");
    }

    #[test]
    fn test_empty_manifest() {
        assert!(parse_zon_parsers("").is_empty());
        assert!(parse_zon_parsers(".{ .name = .neovim }").is_empty());
    }
}
