//! The `std` binding.
//!
//! Every root scope is seeded with a constant `std` object wrapping a
//! [`HostIo`] implementation. The default host talks to the console; an
//! embedding application injects its own through `InterpreterBuilder`.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Host-side input and output primitives.
///
/// Scripts cannot call these: expressions have no member access, so `std`
/// only ever evaluates as an opaque object. The methods serve the embedding
/// application, which reaches them through [`StdLibrary`].
pub trait HostIo: Send + Sync {
    /// Ask the user for a line of text. `None` when no input is available.
    fn input(&self, prompt: &str) -> Option<String>;

    /// Show a message to the user.
    fn output(&self, message: &str);

    /// Ask the user a yes/no question.
    fn query(&self, question: &str) -> bool;
}

/// Console host: prompts on stdout, reads from stdin.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleHost;

impl ConsoleHost {
    fn read_line(prompt: &str) -> Option<String> {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{prompt} ");
        let _ = stdout.flush();
        drop(stdout);

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl HostIo for ConsoleHost {
    fn input(&self, prompt: &str) -> Option<String> {
        Self::read_line(prompt)
    }

    fn output(&self, message: &str) {
        println!("{message}");
    }

    fn query(&self, question: &str) -> bool {
        Self::read_line(&format!("{question} [y/N]")).is_some_and(|answer| {
            matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        })
    }
}

/// The value bound to `std`.
#[derive(Clone)]
pub struct StdLibrary {
    host: Arc<dyn HostIo>,
}

impl StdLibrary {
    pub fn new(host: impl HostIo + 'static) -> Self {
        StdLibrary {
            host: Arc::new(host),
        }
    }

    /// Standard library backed by the console.
    pub fn console() -> Self {
        Self::new(ConsoleHost)
    }

    pub fn input(&self, prompt: &str) -> Option<String> {
        self.host.input(prompt)
    }

    pub fn output(&self, message: &str) {
        self.host.output(message);
    }

    pub fn query(&self, question: &str) -> bool {
        self.host.query(question)
    }

    /// Whether both handles wrap the same host instance.
    pub fn same_host(&self, other: &StdLibrary) -> bool {
        Arc::ptr_eq(&self.host, &other.host)
    }
}

impl Default for StdLibrary {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for StdLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StdLibrary")
    }
}
