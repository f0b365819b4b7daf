//! Shared harness for execution tests.

use qc_eval::{
    buffer_handler, EvalError, EvalResult, InstantScheduler, Interpreter, SharedPrintHandler,
};
use qc_ir::{BEGIN_MARKER, TERMINATE_MARKER};

/// A finished run: the interpreter, what it printed and how it ended.
pub struct Run {
    pub interp: Interpreter,
    pub output: SharedPrintHandler,
    pub scheduler: InstantScheduler,
    pub result: EvalResult<()>,
}

impl Run {
    pub fn lines(&self) -> Vec<String> {
        self.output.lines()
    }

    pub fn error(self) -> EvalError {
        self.result.expect_err("script should fail")
    }
}

/// Wrap instruction lines in execution markers.
pub fn script(lines: &[&str]) -> String {
    format!(
        "Free-form title text\n{BEGIN_MARKER}\n{}\n{TERMINATE_MARKER}\nSTD::OUT \"never\"\n",
        lines.join("\n")
    )
}

pub fn run_with(max_call_depth: Option<usize>, lines: &[&str]) -> Run {
    let output = buffer_handler();
    let scheduler = InstantScheduler::new();
    let mut builder = Interpreter::builder()
        .print_handler(output.clone())
        .scheduler(scheduler.clone());
    if let Some(depth) = max_call_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interp = builder.build();
    let result = interp.run_source(&script(lines));
    Run {
        interp,
        output,
        scheduler,
        result,
    }
}

pub fn run(lines: &[&str]) -> Run {
    run_with(None, lines)
}

/// Printed lines of a script that must succeed.
pub fn output(lines: &[&str]) -> Vec<String> {
    let run = run(lines);
    if let Err(err) = &run.result {
        panic!("script failed: {err}");
    }
    run.lines()
}
