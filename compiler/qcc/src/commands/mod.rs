//! Command handlers for the `qc` CLI.
//!
//! Each submodule implements one command. They print to the terminal and
//! exit the process with the command's status code.

mod explain;
mod run;

pub use explain::explain_error;
pub use run::run_file;
pub use test::{render_summary, run_tests};

/// `"1 file"`, `"3 files"`.
fn files(count: usize) -> String {
    if count == 1 {
        format!("{count} file")
    } else {
        format!("{count} files")
    }
}
