//! A single executable line.

use std::fmt;

/// Keywords that open a block terminated by [`BLOCK_CLOSER`].
pub const BLOCK_OPENERS: [&str; 2] = ["IF", "FUNC"];

/// Keyword that closes the innermost open block.
pub const BLOCK_CLOSER: &str = "END";

/// Keyword separating the two branches of an `IF` block.
pub const ELSE_KEYWORD: &str = "ELSE";

/// Keyword that calls a function, also valid as a `DECLARE` value.
pub const CALL_KEYWORD: &str = "CALL";

/// Keyword that defines a function.
pub const FUNC_KEYWORD: &str = "FUNC";

const DECLARE_KEYWORD: &str = "DECLARE";

/// Strip `keyword` from the start of `text` when it stands as a whole word.
pub fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim())
}

/// The header of an inline `(FUNC <name|_> params...)` callee, if `callee`
/// is one.
pub fn inline_definition(callee: &str) -> Option<&str> {
    let inner = callee.strip_prefix('(')?.strip_suffix(')')?.trim();
    strip_keyword(inner, FUNC_KEYWORD)
}

/// The leading parenthesised token of a call operand.
fn leading_group(operand: &str) -> Option<&str> {
    if !operand.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in operand.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&operand[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// One trimmed, non-empty, non-comment line of the executable region.
///
/// Structurally `<KEYWORD> <operand-text>`. The keyword is everything before
/// the first whitespace character; the operand is the remainder, trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    text: String,
    /// 1-based line in the original source.
    line: u32,
}

impl Instruction {
    /// Create an instruction from already-trimmed text.
    pub fn new(text: impl Into<String>, line: u32) -> Self {
        Instruction {
            text: text.into(),
            line,
        }
    }

    /// The full instruction text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based source line the instruction came from.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Split into `(keyword, operand)`.
    pub fn split(&self) -> (&str, &str) {
        match self.text.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (self.text.as_str(), ""),
        }
    }

    /// The leading keyword.
    #[inline]
    pub fn keyword(&self) -> &str {
        self.split().0
    }

    /// The operand text following the keyword.
    #[inline]
    pub fn operand(&self) -> &str {
        self.split().1
    }

    /// Whether this instruction opens a block closed by a later `END`.
    ///
    /// Besides `IF` and `FUNC`, a call of an inline definition opens one:
    /// `CALL (FUNC ...) args` and `DECLARE x = CALL (FUNC ...) args`.
    pub fn opens_block(&self) -> bool {
        BLOCK_OPENERS.contains(&self.keyword()) || self.defines_inline_function()
    }

    /// Whether this instruction calls an inline `(FUNC ...)` definition
    /// whose body follows it.
    pub fn defines_inline_function(&self) -> bool {
        let (keyword, operand) = self.split();
        let call = match keyword {
            CALL_KEYWORD => operand,
            DECLARE_KEYWORD => match operand.split_once('=') {
                Some((_, value)) => match strip_keyword(value.trim(), CALL_KEYWORD) {
                    Some(call) => call,
                    None => return false,
                },
                None => return false,
            },
            _ => return false,
        };
        leading_group(call).and_then(inline_definition).is_some()
    }

    /// Whether this instruction is a bare `END`.
    pub fn closes_block(&self) -> bool {
        self.keyword() == BLOCK_CLOSER
    }

    /// Whether this instruction is an `ELSE` separator.
    pub fn is_else(&self) -> bool {
        self.keyword() == ELSE_KEYWORD
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
