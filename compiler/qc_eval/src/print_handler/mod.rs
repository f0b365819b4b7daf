//! Output sink for `STD::OUT`.
//!
//! Output can be directed to different destinations:
//! - stdout (default)
//! - a line buffer, for the batch runner and tests
//! - nowhere
//! - a host closure that receives the raw [`Value`]
//!
//! Enum dispatch keeps the common variants free of vtable indirection.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::Value;

/// Writes each value on its own stdout line.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn emit(&self, value: &Value) {
        println!("{value}");
    }
}

/// Captures rendered output lines.
#[derive(Default)]
pub struct BufferPrintHandler {
    lines: Mutex<Vec<String>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, value: &Value) {
        self.lines.lock().push(value.to_string());
    }

    /// Captured lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured output, one newline-terminated line per value.
    pub fn get_output(&self) -> String {
        self.lines.lock().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Host callback receiving every emitted value.
pub struct CallbackPrintHandler {
    callback: Box<dyn Fn(&Value) + Send + Sync>,
}

impl CallbackPrintHandler {
    pub fn new(callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        CallbackPrintHandler {
            callback: Box::new(callback),
        }
    }

    pub fn emit(&self, value: &Value) {
        (self.callback)(value);
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout(StdoutPrintHandler),
    /// Captures rendered lines.
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
    /// Forwards values to a host closure.
    Callback(CallbackPrintHandler),
}

impl PrintHandlerImpl {
    pub fn emit(&self, value: &Value) {
        match self {
            Self::Stdout(h) => h.emit(value),
            Self::Buffer(h) => h.emit(value),
            Self::Silent => {}
            Self::Callback(h) => h.emit(value),
        }
    }

    /// Captured lines. Empty for handlers that don't capture.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(h) => h.lines(),
            Self::Stdout(_) | Self::Silent | Self::Callback(_) => Vec::new(),
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent | Self::Callback(_) => String::new(),
        }
    }

    /// Clear captured output. No-op for handlers that don't capture.
    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Create a silent print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

/// Create a handler that forwards each value to `callback`.
pub fn callback_handler(callback: impl Fn(&Value) + Send + Sync + 'static) -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Callback(CallbackPrintHandler::new(callback)))
}
