//! Shared JavaScript sandbox for snippet execution.
//!
//! One engine context is created at startup and reused for every snippet in
//! the run. Context creation cost is amortized, and the flip side is a known,
//! accepted behavior: top-level bindings leak from one snippet into the next.
//! Documentation examples that build on an earlier example rely on this.

use boa_engine::{Context, Source};

use crate::errors::ExecutionFailure;
use crate::extract::Snippet;

/// Long-lived execution sandbox handed to every snippet in a run.
pub struct SnippetSandbox {
    context: Context,
    preamble: String,
    marker: String,
}

impl SnippetSandbox {
    pub fn new(preamble: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            context: Context::default(),
            preamble: preamble.into(),
            marker: marker.into(),
        }
    }

    /// Runs one snippet, preamble first.
    ///
    /// The composed source is echoed to stdout ahead of the `RESULT:` line so
    /// a failure in the run log is traceable to the exact source that raised
    /// it. The snippet's completion value is discarded; output is not
    /// captured or checked.
    pub fn execute(&mut self, snippet: &Snippet) -> Result<(), ExecutionFailure> {
        let composed = self.compose(&snippet.source);
        println!("```{}", self.marker);
        println!("{composed}");
        println!("```");
        println!("RESULT:");
        match self.context.eval(Source::from_bytes(&composed)) {
            Ok(_) => Ok(()),
            Err(err) => Err(ExecutionFailure::new(err.to_string())),
        }
    }

    /// Prepends the preamble, re-evaluated for every snippet so the library
    /// surface is in scope no matter what earlier snippets did to it.
    fn compose(&self, snippet_source: &str) -> String {
        if self.preamble.is_empty() {
            return snippet_source.to_string();
        }
        format!("{}\n{}", self.preamble.trim_end(), snippet_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PREAMBLE;

    fn snippet(source: &str, id: usize) -> Snippet {
        Snippet {
            file_name: "doc.md".to_string(),
            snippet_id: id,
            source: source.to_string(),
        }
    }

    #[test]
    fn evaluates_a_plain_expression() {
        let mut sandbox = SnippetSandbox::new("", "docvet-js");
        assert!(sandbox.execute(&snippet("1 + 1;", 1)).is_ok());
    }

    #[test]
    fn thrown_error_is_surfaced_with_its_message() {
        let mut sandbox = SnippetSandbox::new("", "docvet-js");
        let failure = sandbox
            .execute(&snippet("throw new Error(\"bad\");", 1))
            .unwrap_err();
        assert!(failure.detail.contains("bad"), "got: {}", failure.detail);
    }

    #[test]
    fn undefined_reference_is_surfaced() {
        let mut sandbox = SnippetSandbox::new("", "docvet-js");
        let failure = sandbox.execute(&snippet("no_such_binding + 1;", 1)).unwrap_err();
        assert!(
            failure.detail.contains("no_such_binding"),
            "got: {}",
            failure.detail
        );
    }

    #[test]
    fn preamble_bindings_are_in_scope() {
        let mut sandbox = SnippetSandbox::new(DEFAULT_PREAMBLE, "docvet-js");
        assert!(sandbox.execute(&snippet("print(1 + 1);", 1)).is_ok());
        assert!(sandbox.execute(&snippet("assertEq(2 + 2, 4);", 2)).is_ok());
    }

    #[test]
    fn failed_preamble_assertion_is_a_failure() {
        let mut sandbox = SnippetSandbox::new(DEFAULT_PREAMBLE, "docvet-js");
        let failure = sandbox
            .execute(&snippet("assertEq(2 + 2, 5);", 1))
            .unwrap_err();
        assert!(failure.detail.contains("expected 5"), "got: {}", failure.detail);
    }

    #[test]
    fn bindings_leak_across_snippets_within_a_run() {
        let mut sandbox = SnippetSandbox::new("", "docvet-js");
        assert!(sandbox.execute(&snippet("var leaked = 41;", 1)).is_ok());
        assert!(sandbox
            .execute(&snippet("if (leaked !== 41) { throw new Error(\"gone\"); }", 2))
            .is_ok());
    }

    #[test]
    fn run_continues_after_a_failure() {
        let mut sandbox = SnippetSandbox::new("", "docvet-js");
        assert!(sandbox.execute(&snippet("throw new Error(\"first\");", 1)).is_err());
        assert!(sandbox.execute(&snippet("1 + 1;", 2)).is_ok());
    }
}
