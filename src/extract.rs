//! Extracts executable snippets from markdown documentation.
//!
//! The extraction process follows this flow:
//! 1. Parse the document text into a stream of markdown events
//! 2. Filter for fenced code blocks whose language tag equals the marker
//! 3. Check the fence interior holds exactly one run of raw text
//! 4. Yield that text unmodified, in document order
//!
//! Matching is a case-sensitive exact comparison of the whole fence info
//! string, so `docvet-js` matches while `Docvet-Js` and `docvet-js title`
//! do not. Fences with any other tag, untagged fences, and indented code
//! blocks are ignored entirely.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd, TextMergeStream};

use crate::errors::{DocvetError, Result};

/// A single executable example lifted out of a documentation file.
///
/// Produced by [`SnippetStream`] and consumed immediately by the sandbox;
/// snippets are not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Name of the originating documentation file.
    pub file_name: String,
    /// 1-based position among this file's extracted snippets.
    pub snippet_id: usize,
    /// Raw fence interior, exactly as written (no dedent, no trim).
    pub source: String,
}

/// Lazy, consumed-once stream of the snippets in one document.
pub struct SnippetStream<'a> {
    events: TextMergeStream<'a, Parser<'a>>,
    marker: &'a str,
    file_name: &'a str,
    next_id: usize,
}

impl<'a> SnippetStream<'a> {
    pub fn new(text: &'a str, marker: &'a str, file_name: &'a str) -> Self {
        // Adjacent text events are merged first so that a well-formed fence
        // interior is observed as a single raw-text run regardless of how the
        // parser chunked it.
        Self {
            events: TextMergeStream::new(Parser::new(text)),
            marker,
            file_name,
            next_id: 1,
        }
    }

    /// Consumes one fence interior, from just after its start event through
    /// its end event.
    ///
    /// The interior must be exactly one raw-text run. Anything else means the
    /// documentation itself is malformed, which is fatal rather than a
    /// per-snippet failure.
    fn collect_fence_interior(&mut self) -> Result<Snippet> {
        let mut texts: Vec<String> = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::End(TagEnd::CodeBlock) => {
                    if texts.len() != 1 {
                        return Err(self.malformed(format!(
                            "expected exactly one raw text run inside a `{}` fence, found {}",
                            self.marker,
                            texts.len()
                        )));
                    }
                    let snippet = Snippet {
                        file_name: self.file_name.to_string(),
                        snippet_id: self.next_id,
                        source: texts.pop().unwrap_or_default(),
                    };
                    self.next_id += 1;
                    return Ok(snippet);
                }
                Event::Text(text) => texts.push(text.into_string()),
                other => {
                    return Err(self.malformed(format!(
                        "unexpected {other:?} inside a `{}` fence",
                        self.marker
                    )));
                }
            }
        }
        Err(self.malformed(format!("unterminated `{}` fence", self.marker)))
    }

    fn malformed(&self, reason: String) -> DocvetError {
        DocvetError::MalformedFence {
            file_name: self.file_name.to_string(),
            reason,
        }
    }
}

impl Iterator for SnippetStream<'_> {
    type Item = Result<Snippet>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.events.next()? {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                    if &*info == self.marker =>
                {
                    return Some(self.collect_fence_interior());
                }
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "docvet-js";

    fn snippets_of(text: &str) -> Vec<Snippet> {
        SnippetStream::new(text, MARKER, "doc.md")
            .collect::<Result<Vec<_>>>()
            .expect("extraction should succeed")
    }

    #[test]
    fn extracts_tagged_fences_in_document_order() {
        let doc = concat!(
            "# Title\n\n",
            "```docvet-js\n1 + 1;\n```\n\n",
            "Prose between examples.\n\n",
            "```docvet-js\nvar x = 2;\n```\n",
        );
        let snippets = snippets_of(doc);
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].snippet_id, 1);
        assert_eq!(snippets[0].source, "1 + 1;\n");
        assert_eq!(snippets[1].snippet_id, 2);
        assert_eq!(snippets[1].source, "var x = 2;\n");
        assert_eq!(snippets[1].file_name, "doc.md");
    }

    #[test]
    fn ignores_fences_with_other_tags() {
        let doc = concat!(
            "```js\nnot extracted\n```\n\n",
            "```Docvet-Js\ncase matters\n```\n\n",
            "```docvet-js extra\ninfo string matters\n```\n\n",
            "```\nuntagged\n```\n",
        );
        assert!(snippets_of(doc).is_empty());
    }

    #[test]
    fn ignores_indented_code_blocks() {
        let doc = "Paragraph.\n\n    indented code\n    more code\n";
        assert!(snippets_of(doc).is_empty());
    }

    #[test]
    fn yields_raw_text_unmodified() {
        let doc = "```docvet-js\n  indented();\n\ntrailing blank above\n```\n";
        let snippets = snippets_of(doc);
        assert_eq!(snippets[0].source, "  indented();\n\ntrailing blank above\n");
    }

    #[test]
    fn multi_line_fence_is_one_snippet() {
        let doc = "```docvet-js\nvar a = 1;\nvar b = 2;\na + b;\n```\n";
        let snippets = snippets_of(doc);
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].source, "var a = 1;\nvar b = 2;\na + b;\n");
    }

    #[test]
    fn empty_tagged_fence_is_a_structural_error() {
        let doc = "```docvet-js\n```\n";
        let result: Result<Vec<_>> = SnippetStream::new(doc, MARKER, "doc.md").collect();
        match result {
            Err(DocvetError::MalformedFence { file_name, .. }) => {
                assert_eq!(file_name, "doc.md");
            }
            other => panic!("expected a malformed fence error, got {other:?}"),
        }
    }

    #[test]
    fn document_without_snippets_yields_nothing() {
        let doc = "# Only prose\n\nNo code here.\n";
        assert!(snippets_of(doc).is_empty());
    }
}
