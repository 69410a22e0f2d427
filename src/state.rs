//! Parser state and the result/error model shared by every combinator.

use std::fmt;
use std::rc::Rc;

use crate::position::SourcePosition;

/// An immutable snapshot of the remaining input and the current position,
/// optionally carrying a user-defined state value.
///
/// Every successful parse step produces a *new* state with a shorter
/// remainder and an advanced position; nothing is mutated in place.
/// Combinators that retry keep the pre-attempt state and hand it, unchanged,
/// to the next alternative.
#[derive(Debug, Clone)]
pub struct ParserState<S = ()> {
    source: Rc<str>,
    cursor: usize,
    pos: SourcePosition,
    /// Auxiliary user state, threaded through unchanged by the engine.
    pub user: S,
}

impl<S> ParserState<S> {
    /// A fresh state at line 1, column 1 over the full input.
    pub fn new(input: impl Into<Rc<str>>, user: S) -> Self {
        Self {
            source: input.into(),
            cursor: 0,
            pos: SourcePosition::start(),
            user,
        }
    }

    /// The input that has not been consumed yet.
    pub fn remaining(&self) -> &str {
        &self.source[self.cursor..]
    }

    pub fn pos(&self) -> SourcePosition {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.source.len()
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }
}

impl<S: Clone> ParserState<S> {
    /// Consume `prefix`, which must be a prefix of the remaining input, and
    /// return the state after it.
    pub fn consume(&self, prefix: &str) -> Self {
        debug_assert!(
            self.remaining().starts_with(prefix),
            "consume called with something that is not a prefix of the remaining input"
        );
        Self {
            source: Rc::clone(&self.source),
            cursor: self.cursor + prefix.len(),
            pos: self.pos.advance(prefix),
            user: self.user.clone(),
        }
    }

    /// Consume a single character.
    pub fn consume_char(&self, ch: char) -> Self {
        let mut buf = [0u8; 4];
        self.consume(ch.encode_utf8(&mut buf))
    }
}

/// A structured parse failure: what went wrong, what was expected, where.
///
/// Errors are returned, never thrown, so callers can pattern-match on the
/// pieces and build their own diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// Labels for what would have been accepted here, in attempt order.
    pub expected: Vec<String>,
    /// What was actually seen, if the failing parser looked at the input.
    pub found: Option<String>,
    pub pos: SourcePosition,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: Vec::new(),
            found: None,
            pos: SourcePosition::start(),
        }
    }

    pub fn expected(mut self, label: impl Into<String>) -> Self {
        self.expected.push(label.into());
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn at(mut self, pos: SourcePosition) -> Self {
        self.pos = pos;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)?;
        if !self.expected.is_empty() {
            let labels: Vec<String> = self.expected.iter().map(|e| format!("'{e}'")).collect();
            write!(f, ": expected {}", labels.join(" or "))?;
        }
        if let Some(found) = &self.found {
            write!(f, ", found '{found}'")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The universal outcome of a parse step: the value plus the state after it,
/// or a structured error.
pub type ParseResult<T, S = ()> = Result<(T, ParserState<S>), ParseError>;

/// A single parse step.
///
/// Implemented for free by closures, so ad hoc parsers can be written inline
/// and handed to [`crate::Parser::new`].
pub trait Parse<T, S = ()> {
    fn parse(&self, state: ParserState<S>) -> ParseResult<T, S>;
}

impl<T, S, F: Fn(ParserState<S>) -> ParseResult<T, S>> Parse<T, S> for F {
    fn parse(&self, state: ParserState<S>) -> ParseResult<T, S> {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_produces_a_new_state() {
        let state: ParserState = ParserState::new("ab\ncd", ());
        let after = state.consume("ab\nc");
        assert_eq!(state.remaining(), "ab\ncd");
        assert_eq!(after.remaining(), "d");
        assert_eq!(after.pos().line, 2);
        assert_eq!(after.pos().column, 2);
        assert_eq!(after.pos().offset, 4);
    }

    #[test]
    fn error_display_lists_expectations() {
        let err = ParseError::new("unexpected input")
            .expected("let")
            .expected("const")
            .found("var")
            .at(SourcePosition {
                line: 3,
                column: 7,
                offset: 20,
            });
        assert_eq!(
            err.to_string(),
            "3:7: unexpected input: expected 'let' or 'const', found 'var'"
        );
    }
}
