pub mod orchestration;

pub use orchestration::{
    cleanup_orphaned_tags, run_cleanup_workflow, CleanupOptions, CleanupSummary, Failure,
    FailureKind,
};
