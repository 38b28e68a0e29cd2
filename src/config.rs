//! Run configuration and embedded defaults.

use std::path::PathBuf;

/// Directory scanned for documentation when none is given on the command line.
pub const DEFAULT_DOCS_ROOT: &str = "docs/snippets";

/// Fence language tag that marks a code block as an executable example.
/// Matching is case-sensitive and exact; `docvet-js foo` does not match.
pub const DEFAULT_MARKER: &str = "docvet-js";

/// Bindings evaluated ahead of every snippet. This is the documented helper
/// surface examples assume is in scope, the counterpart of a wildcard import.
/// Only `var` and `function` declarations belong here: the execution context
/// is shared across snippets, and lexical declarations would collide when the
/// preamble is re-evaluated.
pub const DEFAULT_PREAMBLE: &str = r#"var __docvet_out = [];
function print() {
    var parts = [];
    for (var i = 0; i < arguments.length; i++) {
        parts.push(String(arguments[i]));
    }
    __docvet_out.push(parts.join(" "));
}
function assert(condition, message) {
    if (!condition) {
        throw new Error(message || "assertion failed");
    }
}
function assertEq(actual, expected) {
    if (actual !== expected) {
        throw new Error("expected " + expected + " but got " + actual);
    }
}
"#;

/// Configuration for a validation run.
pub struct RunConfig {
    /// Base directory scanned (non-recursively) for `*.md` files.
    pub docs_root: PathBuf,
    /// Fence language tag selecting executable snippets.
    pub marker: String,
    /// Source prepended to every snippet before evaluation.
    pub preamble: String,
    pub use_colors: bool,
    /// Emit the outcome records as JSON after the transcript.
    pub emit_json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from(DEFAULT_DOCS_ROOT),
            marker: DEFAULT_MARKER.to_string(),
            preamble: DEFAULT_PREAMBLE.to_string(),
            use_colors: atty::is(atty::Stream::Stdout),
            emit_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_the_shipped_docs_tree() {
        let config = RunConfig::default();
        assert_eq!(config.docs_root, PathBuf::from("docs/snippets"));
        assert_eq!(config.marker, "docvet-js");
        assert!(!config.emit_json);
    }

    #[test]
    fn default_preamble_avoids_lexical_declarations() {
        for line in DEFAULT_PREAMBLE.lines() {
            let trimmed = line.trim_start();
            assert!(
                !trimmed.starts_with("let ") && !trimmed.starts_with("const "),
                "preamble must survive re-evaluation: {line}"
            );
        }
    }
}
