//! Long-form error documentation for `qc explain`.
//!
//! Every code has a markdown page next to this module (`E1001.md`, ...)
//! describing the error, a script that triggers it and the fix. Pages are
//! embedded at compile time.

use crate::ErrorCode;

/// Lookup of the embedded pages.
pub struct ErrorDocs;

impl ErrorDocs {
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        PAGES
            .iter()
            .find_map(|&(documented, page)| (documented == code).then_some(page))
    }

    /// Documented codes, in numeric order.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        PAGES.iter().map(|&(code, _)| code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        Self::get(code).is_some()
    }
}

macro_rules! pages {
    ($($code:ident),* $(,)?) => {
        &[$((ErrorCode::$code, include_str!(concat!(stringify!($code), ".md")))),*]
    };
}

static PAGES: &[(ErrorCode, &str)] = pages![
    E1001, E1002, E1003, E1004, E1005, E1006, E1007, E1008, // syntax
    E2001, E2002, // reference
    E3001, E3002, E3003, E3004, // type
    E4001, // range
];

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
