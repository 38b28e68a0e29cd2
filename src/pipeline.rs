//! The validation pipeline: enumerate files, extract snippets, execute each
//! in the shared sandbox, collect outcomes.
//!
//! Strictly sequential: files one at a time, snippets within a file one at a
//! time, no overlap. There is no timeout, so a snippet that loops forever
//! blocks the run. Execution failures are recorded and the run moves on;
//! everything else aborts.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::RunConfig;
use crate::errors::{DocvetError, Result};
use crate::extract::{Snippet, SnippetStream};
use crate::report::ExecutionOutcome;
use crate::sandbox::SnippetSandbox;

/// Enumerates `*.md` files directly inside the docs root.
///
/// Non-recursive, and deliberately unsorted: order is whatever the OS hands
/// back. The root must exist.
pub fn enumerate_doc_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(DocvetError::DocsDirMissing {
            path: root.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| DocvetError::ScanFailed {
            path: root.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == "md") {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

/// Runs the whole pipeline and returns one outcome record per snippet, in
/// execution order.
///
/// Prints the run transcript to stdout as it goes: per-file start and end
/// markers, per-snippet markers, and the composed source about to run.
pub fn run_check(config: &RunConfig) -> Result<Vec<ExecutionOutcome>> {
    let files = enumerate_doc_files(&config.docs_root)?;
    let mut sandbox = SnippetSandbox::new(config.preamble.clone(), config.marker.clone());
    let mut outcomes = Vec::new();

    for path in files {
        let file_name = display_name(&path);
        println!("=== VALIDATING FILE {file_name} - START ===");
        let text = read_doc(&path)?;
        for snippet in SnippetStream::new(&text, &config.marker, &file_name) {
            let snippet = snippet?;
            println!(
                "=== Executing snippet #{} in \"{}\" ===",
                snippet.snippet_id, file_name
            );
            let mut outcome = ExecutionOutcome::new(&file_name, snippet.snippet_id);
            if let Err(failure) = sandbox.execute(&snippet) {
                outcome.failure = Some(failure);
            }
            outcomes.push(outcome);
        }
        println!("=== FINISHED VALIDATING {file_name} ===");
    }
    Ok(outcomes)
}

/// Extracts every snippet without executing anything.
pub fn list_snippets(config: &RunConfig) -> Result<Vec<Snippet>> {
    let files = enumerate_doc_files(&config.docs_root)?;
    let mut snippets = Vec::new();
    for path in files {
        let file_name = display_name(&path);
        let text = read_doc(&path)?;
        for snippet in SnippetStream::new(&text, &config.marker, &file_name) {
            snippets.push(snippet?);
        }
    }
    Ok(snippets)
}

fn read_doc(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DocvetError::UnreadableFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_docs_root_is_fatal() {
        let result = enumerate_doc_files(Path::new("no/such/directory"));
        assert!(matches!(result, Err(DocvetError::DocsDirMissing { .. })));
    }
}
