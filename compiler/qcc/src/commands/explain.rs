//! The `explain` command: display documentation for error codes.

use qc_diagnostic::{ErrorCode, ErrorDocs};

/// Print the long-form documentation for `code_str`.
pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Known codes:");
        for code in ErrorDocs::all_codes() {
            eprintln!("  {code}  {:<15} {}", code.category(), code.summary());
        }
        std::process::exit(1);
    };

    if let Some(doc) = ErrorDocs::get(code) {
        println!("{doc}");
    } else {
        eprintln!("No documentation available for {code_str}");
        std::process::exit(1);
    }
}
