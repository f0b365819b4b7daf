//! Diagnostics for QuickCode.
//!
//! Every runtime failure carries an [`ErrorCode`] for searchability, a
//! message stating what went wrong, and the source line of the instruction
//! that failed. Codes are grouped by the error category a script author sees:
//!
//! | Range   | Category         |
//! |---------|------------------|
//! | `E1xxx` | `SyntaxError`    |
//! | `E2xxx` | `ReferenceError` |
//! | `E3xxx` | `TypeError`      |
//! | `E4xxx` | `RangeError`     |
//!
//! Long-form explanations for `qc explain <code>` live in [`ErrorDocs`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Location};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
