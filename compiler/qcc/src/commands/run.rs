//! The `run` command: execute one script against the console.

use std::path::Path;

use qc_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use qc_eval::Interpreter;

use crate::load::load_program;

/// Run a script with console output and a console `std` host.
///
/// Runtime errors are rendered as diagnostics on stderr and exit with 1.
pub fn run_file(path: &str) {
    let program = match load_program(Path::new(path)) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let mut interp = Interpreter::new();
    if let Err(err) = interp.run(&program) {
        let mut emitter = TerminalEmitter::stderr(ColorMode::Auto);
        emitter.emit(&err.to_diagnostic().with_path(path));
        emitter.flush();
        std::process::exit(1);
    }
}
