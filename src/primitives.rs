//! Leaf parsers: the recognizers everything else is built from.
//!
//! Each primitive consumes at most what it matches; the only lookahead is
//! the context quoted back in its error message.

use std::rc::Rc;

use crate::combinators::Parser;
use crate::state::{ParseError, ParserState};

/// Match `expected` verbatim at the front of the input.
///
/// An empty literal always succeeds without consuming anything. On failure
/// the error carries the literal as its `expected` hint and quotes up to the
/// first 10 characters of the remaining input.
pub fn literal<S: Clone + 'static>(expected: impl Into<String>) -> Parser<String, S> {
    let expected: Rc<str> = Rc::from(expected.into());
    let name = Rc::clone(&expected);
    Parser::named(
        move |state: ParserState<S>| {
            if state.remaining().starts_with(expected.as_ref()) {
                let rest = state.consume(&expected);
                Ok((expected.to_string(), rest))
            } else {
                let context: String = state.remaining().chars().take(10).collect();
                Err(ParseError::new("unexpected input")
                    .expected(expected.as_ref())
                    .found(context)
                    .at(state.pos()))
            }
        },
        name,
    )
}

/// Match exactly the character `expected`.
///
/// Taking a `char` makes the multi-character misuse of a string-based
/// constructor unrepresentable, so the configuration error the equivalent
/// string API would need is caught before the program compiles.
pub fn char<S: Clone + 'static>(expected: char) -> Parser<char, S> {
    Parser::named(
        move |state: ParserState<S>| match state.peek() {
            Some(ch) if ch == expected => Ok((expected, state.consume_char(ch))),
            Some(ch) => Err(ParseError::new("unexpected character")
                .expected(expected.to_string())
                .found(ch.to_string())
                .at(state.pos())),
            None => Err(ParseError::new("unexpected end of input")
                .expected(expected.to_string())
                .at(state.pos())),
        },
        expected.to_string(),
    )
}

/// Match a single ASCII letter.
pub fn alphabet<S: Clone + 'static>() -> Parser<char, S> {
    Parser::named(
        move |state: ParserState<S>| match state.peek() {
            Some(ch) if ch.is_ascii_alphabetic() => Ok((ch, state.consume_char(ch))),
            Some(ch) => Err(ParseError::new(format!(
                "expected alphabetic character, but got '{ch}'"
            ))
            .at(state.pos())),
            None => Err(ParseError::new("unexpected end of input").at(state.pos())),
        },
        "alphabet",
    )
}

/// Match a single ASCII digit.
pub fn digit<S: Clone + 'static>() -> Parser<char, S> {
    Parser::named(
        move |state: ParserState<S>| match state.peek() {
            Some(ch) if ch.is_ascii_digit() => Ok((ch, state.consume_char(ch))),
            Some(ch) => {
                Err(ParseError::new(format!("expected digit, but got '{ch}'")).at(state.pos()))
            }
            None => Err(ParseError::new("unexpected end of input").at(state.pos())),
        },
        "digit",
    )
}

/// Greedily drop ASCII spaces from the front of the input.
///
/// Newlines are left alone, so this never moves the line counter; the
/// column advances through the usual position bookkeeping.
pub fn skip_spaces<S: Clone + 'static>() -> Parser<(), S> {
    Parser::new(move |state: ParserState<S>| {
        let count = state
            .remaining()
            .chars()
            .take_while(|&ch| ch == ' ')
            .count();
        let rest = state.consume(&state.remaining()[..count]);
        Ok(((), rest))
    })
}
