//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build strings and are testable; the `display_*`
//! functions print them.

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::{CleanupSummary, Failure};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠\x1b[0m  {}", warning);
}

/// Escape a message for a GitHub Actions workflow command.
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render a failure as a GitHub Actions `::error::` workflow command.
pub fn format_failure_annotation(failure: &Failure) -> String {
    format!("::error::{}", escape_workflow_data(&failure.message))
}

/// Render a warning as a GitHub Actions `::warning::` workflow command.
pub fn format_warning_annotation(warning: &BoundaryWarning) -> String {
    format!("::warning::{}", escape_workflow_data(&warning.to_string()))
}

/// Build the lines of the end-of-run summary.
pub fn format_summary(summary: &CleanupSummary) -> Vec<String> {
    let verb = if summary.dry_run {
        "Would delete"
    } else {
        "Deleted"
    };

    let mut lines = vec![format!(
        "Evaluated {} version tag(s): {} orphaned, {} kept, {} not feature tags",
        summary.evaluated,
        summary.deleted.len(),
        summary.kept.len(),
        summary.unrecognized.len()
    )];

    for tag in &summary.deleted {
        lines.push(format!("  {} {}", verb, tag));
    }

    lines
}

/// Print the end-of-run summary.
pub fn display_summary(summary: &CleanupSummary) {
    let lines = format_summary(summary);
    let Some((headline, details)) = lines.split_first() else {
        return;
    };

    if summary.dry_run {
        display_status(&format!("Dry run: {}", headline));
    } else {
        display_success(headline);
    }

    for line in details {
        println!("{}", line);
    }
}
