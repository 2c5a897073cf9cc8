//! User interface module - reporting to a terminal or a CI log.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Choosing the output channel for warnings and failures

use std::env;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::Failure;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success, display_summary,
    format_failure_annotation, format_summary, format_warning_annotation,
};

/// Whether the process runs inside a GitHub Actions job
pub fn is_github_actions() -> bool {
    env::var("GITHUB_ACTIONS").map(|v| v == "true").unwrap_or(false)
}

/// Report a warning, as a workflow annotation when running under Actions.
pub fn report_warning(warning: &BoundaryWarning) {
    if is_github_actions() {
        println!("{}", format_warning_annotation(warning));
    } else {
        display_boundary_warning(warning);
    }
}

/// Report a failed run. Called exactly once per failed run.
///
/// Under GitHub Actions this emits an `::error::` workflow command so the
/// step is annotated; elsewhere it prints a red error line.
pub fn report_failure(failure: &Failure) {
    if is_github_actions() {
        println!("{}", format_failure_annotation(failure));
    } else {
        display_error(&failure.message);
    }
}
