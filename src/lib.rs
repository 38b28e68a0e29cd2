pub use crate::errors::{DocvetError, ExecutionFailure, Result};
pub use crate::extract::{Snippet, SnippetStream};
pub use crate::report::{ExecutionOutcome, RunSummary};

pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod sandbox;
