//! Outcome records and run reporting.

use std::io::Write;

use serde::{Deserialize, Serialize};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::ExecutionFailure;

// ============================================================================
// OUTCOME RECORDS
// ============================================================================

/// The per-snippet result of an execution attempt.
///
/// Built once per snippet, immutable after the run records it, and held in
/// insertion order (which is execution order) for the run's duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub file_name: String,
    pub snippet_id: usize,
    /// `Some` iff the snippet's evaluation raised.
    pub failure: Option<ExecutionFailure>,
}

impl ExecutionOutcome {
    pub fn new(file_name: impl Into<String>, snippet_id: usize) -> Self {
        Self {
            file_name: file_name.into(),
            snippet_id,
            failure: None,
        }
    }

    pub fn was_successful(&self) -> bool {
        self.failure.is_none()
    }
}

/// Aggregate counts, derived by folding over the outcome records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_count: usize,
    pub error_count: usize,
}

impl RunSummary {
    /// Exit status for the whole run: 0 on zero failures, 1 otherwise.
    pub fn exit_status(&self) -> i32 {
        if self.error_count == 0 {
            0
        } else {
            1
        }
    }
}

pub fn summarize(outcomes: &[ExecutionOutcome]) -> RunSummary {
    outcomes.iter().fold(
        RunSummary {
            total_count: 0,
            error_count: 0,
        },
        |mut summary, outcome| {
            summary.total_count += 1;
            if !outcome.was_successful() {
                summary.error_count += 1;
            }
            summary
        },
    )
}

// ============================================================================
// STATS RENDERING
// ============================================================================

/// Renders the final stats block: one line per failed outcome, in encounter
/// order, then the aggregate count line.
pub fn render_stats(outcomes: &[ExecutionOutcome]) -> (String, RunSummary) {
    let summary = summarize(outcomes);
    let mut block = String::from("=== EXECUTION STATS ===\n");
    for outcome in outcomes {
        if let Some(failure) = &outcome.failure {
            block.push_str(&format!(
                "snippet #{} in \"{}\": {}\n",
                outcome.snippet_id, outcome.file_name, failure
            ));
        }
    }
    block.push_str(&format!(
        "There were {} errors over {} snippets\n",
        summary.error_count, summary.total_count
    ));
    (block, summary)
}

/// One-line colorized verdict after the stats block.
pub fn print_verdict(summary: &RunSummary, use_colors: bool) {
    let choice = if use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let (color, verdict) = if summary.error_count == 0 {
        (Color::Green, "PASS")
    } else {
        (Color::Red, "FAIL")
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{verdict}");
    let _ = stdout.reset();
    let _ = writeln!(
        stdout,
        ": {}/{} snippets ran without error",
        summary.total_count - summary.error_count,
        summary.total_count
    );
}
