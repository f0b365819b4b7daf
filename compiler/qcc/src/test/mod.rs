//! Batch execution of QuickCode scripts.
//!
//! This module provides:
//! - Discovery: finding `.qc` files in a directory tree
//! - Execution: running each file in its own interpreter
//! - Result tracking: per-file outcome, output and timing
//! - Parallel execution: running files concurrently with rayon

mod discovery;

pub use discovery::{discover_scripts, discover_scripts_in, ScriptFile};
pub use result::{FileOutcome, FileResult, RunSummary};
pub use runner::{run_file, BatchRunner, RunnerConfig};
