//! Command-line surface and the tagging workflow it drives.

pub mod args;
pub mod orchestration;

pub use args::Cli;
pub use orchestration::{run_tag_workflow, BranchSelection, TagState, TagWorkflowArgs, WorkflowResult};
