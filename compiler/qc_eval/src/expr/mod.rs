//! Textual expression evaluation.
//!
//! Expressions are never parsed ahead of time: every occurrence of an
//! operand is evaluated from its text against the current scope.
//!
//! Evaluation order:
//!
//! 1. A text wrapped in one matching quote is a string literal.
//! 2. Innermost `(...)` groups outside string literals are evaluated and
//!    replaced by a placeholder token that stands for the exact value.
//! 3. The weakest operator tier present splits the text at its rightmost
//!    token, so chains are left-associative.
//! 4. What remains is a leaf: negations, literals, placeholders or an
//!    identifier.

mod operators;

use smallvec::SmallVec;

pub use operators::{evaluate_binary, BinaryOp};

use crate::environment::{Environment, Lookup, ScopeId};
use crate::errors::{malformed_expression, misplaced_negation, undefined_variable, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::parse_numeric_literal;
use crate::Value;

use operators::TIERS;

/// Marks a substituted `(...)` group. Never appears in source lines.
const PLACEHOLDER: char = '\u{1}';

/// Evaluate `text` in `scope`.
pub fn evaluate(env: &Environment, scope: ScopeId, text: &str) -> EvalResult<Value> {
    Evaluator {
        env,
        scope,
        slots: Vec::new(),
    }
    .evaluate(text)
}

/// If `text` is a string literal, its contents without the quotes.
///
/// A literal starts and ends with the same quote (`'`, `"` or a backtick) and
/// contains no unescaped occurrence of that quote in between. Escape
/// sequences are kept verbatim.
pub fn string_literal(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| is_quote(*c))?;
    let inner = text.get(1..)?;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return (i + c.len_utf8() == inner.len()).then(|| &inner[..i]);
        }
    }
    None
}

#[inline]
fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

/// Tracks whether a scan is inside a string literal.
#[derive(Default)]
struct QuoteState {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns `true` if it lies outside any literal
    /// (opening quotes count as outside, closing quotes as inside).
    fn advance(&mut self, c: char) -> bool {
        match self.quote {
            Some(q) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == q {
                    self.quote = None;
                }
                false
            }
            None => {
                if is_quote(c) {
                    self.quote = Some(c);
                }
                true
            }
        }
    }
}

/// Split `text` into top-level whitespace-separated arguments.
///
/// Whitespace inside parentheses or string literals does not separate.
pub fn split_arguments(text: &str) -> EvalResult<SmallVec<[&str; 4]>> {
    let mut args = SmallVec::new();
    let mut state = QuoteState::default();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in text.char_indices() {
        let outside = state.advance(c);
        if outside {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| malformed_expression("unbalanced `)` in arguments"))?;
                }
                c if c.is_whitespace() && depth == 0 => {
                    if let Some(s) = start.take() {
                        args.push(&text[s..i]);
                    }
                    continue;
                }
                _ => {}
            }
        }
        start.get_or_insert(i);
    }

    if depth > 0 {
        return Err(malformed_expression("unbalanced `(` in arguments"));
    }
    if let Some(s) = start {
        args.push(&text[s..]);
    }
    Ok(args)
}

struct Evaluator<'a> {
    env: &'a Environment,
    scope: ScopeId,
    /// Values of substituted groups, indexed by placeholder number.
    slots: Vec<Value>,
}

impl Evaluator<'_> {
    fn evaluate(&mut self, text: &str) -> EvalResult<Value> {
        let text = text.trim();
        if text.is_empty() {
            return Err(malformed_expression("empty expression"));
        }
        if let Some(contents) = string_literal(text) {
            return Ok(Value::string(contents));
        }
        let flat = self.substitute_groups(text)?;
        self.evaluate_flat(&flat)
    }

    /// Replace every `(...)` group with a placeholder, innermost first.
    fn substitute_groups(&mut self, text: &str) -> EvalResult<String> {
        let mut text = text.to_string();
        while let Some((open, close)) = innermost_group(&text)? {
            let inner = &text[open + 1..close];
            if inner.trim().is_empty() {
                return Err(malformed_expression("empty parentheses"));
            }
            let value = ensure_sufficient_stack(|| self.evaluate(inner))?;
            let token = self.store(value);
            text.replace_range(open..=close, &token);
        }
        Ok(text)
    }

    fn store(&mut self, value: Value) -> String {
        let index = self.slots.len();
        self.slots.push(value);
        format!("{PLACEHOLDER}{index}{PLACEHOLDER}")
    }

    /// Evaluate text that contains no parentheses.
    fn evaluate_flat(&mut self, text: &str) -> EvalResult<Value> {
        let tokens = operator_tokens(text);
        for tier in TIERS {
            let split = tokens.iter().rev().find(|(_, _, op)| tier.contains(op));
            if let Some(&(start, end, op)) = split {
                let left = ensure_sufficient_stack(|| self.evaluate_flat(&text[..start]))?;
                let right = ensure_sufficient_stack(|| self.evaluate_flat(&text[end..]))?;
                return Ok(evaluate_binary(op, left, right));
            }
        }
        self.resolve_leaf(text)
    }

    fn resolve_leaf(&self, text: &str) -> EvalResult<Value> {
        let text = text.trim();
        if text.is_empty() {
            return Err(malformed_expression("missing operand"));
        }

        let operand = text.trim_start_matches('!');
        let negations = text.len() - operand.len();
        let operand = operand.trim_start();
        if operand.is_empty() {
            return Err(malformed_expression("`!` without an operand"));
        }

        let value = match string_literal(operand) {
            Some(contents) => Value::string(contents),
            None if operand.contains('!') => return Err(misplaced_negation(text)),
            None => self.resolve_atom(operand)?,
        };

        Ok(if negations % 2 == 1 {
            Value::Bool(!value.is_truthy())
        } else {
            value
        })
    }

    fn resolve_atom(&self, atom: &str) -> EvalResult<Value> {
        if let Some(value) = self.placeholder(atom) {
            return Ok(value);
        }
        match atom {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "undefined" => return Ok(Value::Undefined),
            "NaN" => return Ok(Value::Number(f64::NAN)),
            _ => {}
        }
        if let Some(n) = parse_numeric_literal(atom) {
            return Ok(Value::Number(n));
        }
        if let Some(value) = self.signed_placeholder(atom) {
            return Ok(value);
        }
        match self.env.get(self.scope, atom) {
            Lookup::Found(binding) => Ok(binding.value.clone()),
            Lookup::Undeclared => Err(undefined_variable(&self.render(atom))),
        }
    }

    /// `-(...)` or `+(...)`: the group's value converted to a number.
    fn signed_placeholder(&self, atom: &str) -> Option<Value> {
        let rest = atom.strip_prefix(['+', '-'])?.trim_start();
        let n = self.placeholder(rest)?.to_number();
        Some(Value::Number(if atom.starts_with('-') { -n } else { n }))
    }

    /// `text` with every placeholder shown as its parenthesized value.
    fn render(&self, text: &str) -> String {
        let mut rendered = String::with_capacity(text.len());
        for (i, part) in text.split(PLACEHOLDER).enumerate() {
            if i % 2 == 0 {
                rendered.push_str(part);
                continue;
            }
            match part.parse::<usize>().ok().and_then(|n| self.slots.get(n)) {
                Some(value) => {
                    rendered.push('(');
                    rendered.push_str(&value.to_string());
                    rendered.push(')');
                }
                None => rendered.push_str(part),
            }
        }
        rendered
    }

    fn placeholder(&self, atom: &str) -> Option<Value> {
        let index = atom
            .strip_prefix(PLACEHOLDER)?
            .strip_suffix(PLACEHOLDER)?
            .parse::<usize>()
            .ok()?;
        self.slots.get(index).cloned()
    }
}

/// Locate the first innermost `(...)` group outside string literals.
fn innermost_group(text: &str) -> EvalResult<Option<(usize, usize)>> {
    let mut state = QuoteState::default();
    let mut open = None;
    for (i, c) in text.char_indices() {
        if !state.advance(c) {
            continue;
        }
        match c {
            '(' => open = Some(i),
            ')' => {
                return match open {
                    Some(start) => Ok(Some((start, i))),
                    None => Err(malformed_expression("unbalanced `)`")),
                }
            }
            _ => {}
        }
    }
    match open {
        Some(_) => Err(malformed_expression("unbalanced `(`")),
        None => Ok(None),
    }
}

/// Whitespace-delimited operator tokens outside string literals, as
/// `(start, end, op)` byte ranges.
fn operator_tokens(text: &str) -> SmallVec<[(usize, usize, BinaryOp); 8]> {
    let mut tokens = SmallVec::new();
    let mut state = QuoteState::default();
    let mut start: Option<usize> = None;
    let mut quoted = false;

    let mut finish = |start: usize, end: usize, quoted: bool| {
        if !quoted {
            if let Some(op) = BinaryOp::from_token(&text[start..end]) {
                tokens.push((start, end, op));
            }
        }
    };

    for (i, c) in text.char_indices() {
        let outside = state.advance(c);
        if outside && c.is_whitespace() {
            if let Some(s) = start.take() {
                finish(s, i, quoted);
            }
            continue;
        }
        if start.is_none() {
            start = Some(i);
            quoted = false;
        }
        if !outside || is_quote(c) {
            quoted = true;
        }
    }
    if let Some(s) = start {
        finish(s, text.len(), quoted);
    }
    tokens
}
