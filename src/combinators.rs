//! The combinator core: reusable parser values and the operations that build
//! new parsers from existing ones.
//!
//! Failure propagation policy: the sequencing combinators ([`Parser::map`],
//! [`Parser::flat_map`], [`Parser::zip`], [`Parser::bind`] and friends) pass
//! errors through verbatim. Only [`choice`], [`optional`] and the repetition
//! loops are allowed to catch a failure, and only to try the next alternative
//! or stop the loop, never to invent a success for the failed branch.

use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use log::{debug, trace};

use crate::primitives::literal;
use crate::state::{Parse, ParseError, ParseResult, ParserState};

type ParserFn<T, S> = Rc<dyn Fn(ParserState<S>) -> ParseResult<T, S>>;

/// A reusable parser: a step function from state to result, plus an optional
/// name used for `expected` hints in [`choice`].
///
/// Parsers are values. They are cheap to clone, never mutated after
/// construction, and can be shared and re-run freely; each run only reads
/// its input state and allocates new states.
pub struct Parser<T, S = ()> {
    run: ParserFn<T, S>,
    name: Option<Rc<str>>,
}

impl<T, S> Clone for Parser<T, S> {
    fn clone(&self) -> Self {
        Parser {
            run: Rc::clone(&self.run),
            name: self.name.clone(),
        }
    }
}

impl<T: 'static, S: Clone + 'static> Parser<T, S> {
    /// Wrap a raw step function.
    pub fn new<P: Parse<T, S> + 'static>(parser: P) -> Self {
        Parser {
            run: Rc::new(move |state| parser.parse(state)),
            name: None,
        }
    }

    pub(crate) fn named<P: Parse<T, S> + 'static>(parser: P, name: impl Into<Rc<str>>) -> Self {
        Parser {
            run: Rc::new(move |state| parser.parse(state)),
            name: Some(name.into()),
        }
    }

    /// The name given by a primitive or [`Parser::label`], if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run this parser against a ready-made state.
    pub fn parse(&self, state: ParserState<S>) -> ParseResult<T, S> {
        (self.run)(state)
    }

    /// Succeed with `value` without consuming anything.
    pub fn pure(value: T) -> Self
    where
        T: Clone,
    {
        Parser::new(move |state: ParserState<S>| Ok((value.clone(), state)))
    }

    /// Fail with `message` at the current position without consuming anything.
    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        Parser::new(move |state: ParserState<S>| {
            Err(ParseError::new(message.clone()).at(state.pos()))
        })
    }

    /// Transform the parsed value; everything else is untouched.
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> Parser<U, S> {
        Parser::new(move |state: ParserState<S>| {
            let (value, rest) = self.parse(state)?;
            Ok((f(value), rest))
        })
    }

    /// Monadic sequencing: feed the parsed value into `f` to decide how to
    /// continue. Every other sequencing combinator reduces to this.
    pub fn flat_map<U: 'static, F: Fn(T) -> Parser<U, S> + 'static>(self, f: F) -> Parser<U, S> {
        Parser::new(move |state: ParserState<S>| {
            let (value, rest) = self.parse(state)?;
            f(value).parse(rest)
        })
    }

    /// Sequence: parse self then `other`, return both values as a pair.
    pub fn zip<U: 'static>(self, other: Parser<U, S>) -> Parser<(T, U), S> {
        Parser::new(move |state: ParserState<S>| {
            let (a, rest) = self.parse(state)?;
            let (b, rest) = other.parse(rest)?;
            Ok(((a, b), rest))
        })
    }

    /// Dependent sequencing that keeps both values: like [`Parser::zip`],
    /// but the second parser may be chosen based on the first value. Grows a
    /// record one pair at a time; [`crate::chain!`] builds on this.
    pub fn bind<U: 'static, F: Fn(T) -> Parser<U, S> + 'static>(self, f: F) -> Parser<(T, U), S>
    where
        T: Clone,
    {
        Parser::new(move |state: ParserState<S>| {
            let (a, rest) = self.parse(state)?;
            let (b, rest) = f(a.clone()).parse(rest)?;
            Ok(((a, b), rest))
        })
    }

    /// Keep left: parse self then `other`, discard `other`'s value.
    pub fn skip<U: 'static>(self, other: Parser<U, S>) -> Parser<T, S> {
        Parser::new(move |state: ParserState<S>| {
            let (a, rest) = self.parse(state)?;
            let (_, rest) = other.parse(rest)?;
            Ok((a, rest))
        })
    }

    /// Keep right: parse self then `other`, discard self's value.
    pub fn skip_left<U: 'static>(self, other: Parser<U, S>) -> Parser<U, S> {
        Parser::new(move |state: ParserState<S>| {
            let (_, rest) = self.parse(state)?;
            other.parse(rest)
        })
    }

    /// Choice: try self; if it fails, try `other` against the same
    /// pre-attempt state, no matter how far self got before failing.
    pub fn or(self, other: Parser<T, S>) -> Parser<T, S> {
        Parser::new(move |state: ParserState<S>| match self.parse(state.clone()) {
            Ok(ok) => Ok(ok),
            Err(_) => other.parse(state),
        })
    }

    /// Name this parser for error reporting: failures get their `expected`
    /// hints replaced by `name`, and [`choice`] lists the name when all
    /// alternatives fail.
    pub fn label(self, name: &'static str) -> Parser<T, S> {
        let mut labeled = Parser::new(move |state: ParserState<S>| match self.parse(state) {
            Ok(ok) => Ok(ok),
            Err(mut err) => {
                err.expected = vec![name.to_string()];
                Err(err)
            }
        });
        labeled.name = Some(Rc::from(name));
        labeled
    }
}

impl<T: 'static> Parser<T, ()> {
    /// Parse `input` from the start, with no auxiliary state.
    pub fn run(&self, input: &str) -> ParseResult<T, ()> {
        run(self, input)
    }
}

impl<T: 'static, S: Clone + 'static> Parse<T, S> for Parser<T, S> {
    fn parse(&self, state: ParserState<S>) -> ParseResult<T, S> {
        (self.run)(state)
    }
}

/// Build the initial state at line 1, column 1 and run `parser` over `input`.
pub fn run<T: 'static>(parser: &Parser<T, ()>, input: &str) -> ParseResult<T, ()> {
    run_with_state(parser, input, ())
}

/// Like [`run`], threading a caller-supplied state value through every step.
pub fn run_with_state<T: 'static, S: Clone + 'static>(
    parser: &Parser<T, S>,
    input: &str,
    user: S,
) -> ParseResult<T, S> {
    trace!("running parser over {} bytes of input", input.len());
    parser.parse(ParserState::new(input, user))
}

// === Operator overloading ===

/// `+` for sequence: `a + b` parses a then b and pairs the values.
impl<T: 'static, U: 'static, S: Clone + 'static> Add<Parser<U, S>> for Parser<T, S> {
    type Output = Parser<(T, U), S>;

    fn add(self, rhs: Parser<U, S>) -> Self::Output {
        self.zip(rhs)
    }
}

/// `-` for keep left: `a - b` parses both, keeps a's value.
impl<T: 'static, U: 'static, S: Clone + 'static> Sub<Parser<U, S>> for Parser<T, S> {
    type Output = Parser<T, S>;

    fn sub(self, rhs: Parser<U, S>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: `a * b` parses both, keeps b's value.
impl<T: 'static, U: 'static, S: Clone + 'static> Mul<Parser<U, S>> for Parser<T, S> {
    type Output = Parser<U, S>;

    fn mul(self, rhs: Parser<U, S>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: `a | b` tries a, then b from the same spot.
impl<T: 'static, S: Clone + 'static> BitOr<Parser<T, S>> for Parser<T, S> {
    type Output = Parser<T, S>;

    fn bitor(self, rhs: Parser<T, S>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: `p >> f` transforms the parsed value.
impl<T: 'static, U: 'static, S: Clone + 'static, F: Fn(T) -> U + 'static> Shr<F> for Parser<T, S> {
    type Output = Parser<U, S>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Choice and repetition ===

/// Ordered alternation: try each parser in turn against the same starting
/// state; the first success wins.
///
/// When every alternative fails, the error says how many choices were
/// attempted, carries the deepest position any alternative reached, and
/// lists the alternatives' names as `expected` (first-occurrence order,
/// duplicates dropped).
pub fn choice<T: 'static, S: Clone + 'static>(parsers: Vec<Parser<T, S>>) -> Parser<T, S> {
    Parser::new(move |state: ParserState<S>| {
        let mut deepest: Option<ParseError> = None;
        for parser in &parsers {
            match parser.parse(state.clone()) {
                Ok(ok) => return Ok(ok),
                Err(err) => {
                    let is_deeper = deepest
                        .as_ref()
                        .map_or(true, |d| err.pos.offset > d.pos.offset);
                    if is_deeper {
                        deepest = Some(err);
                    }
                }
            }
        }

        debug!(
            "all {} choice alternatives failed at {}",
            parsers.len(),
            state.pos()
        );

        let pos = deepest.map_or_else(|| state.pos(), |err| err.pos);
        let mut combined = ParseError::new(format!(
            "none of the {} choices could be satisfied",
            parsers.len()
        ))
        .at(pos);
        for parser in &parsers {
            if let Some(name) = parser.name() {
                if !combined.expected.iter().any(|label| label == name) {
                    combined.expected.push(name.to_string());
                }
            }
        }
        Err(combined)
    })
}

/// Zero or one: on failure, succeed with `None` and the original,
/// pre-attempt state. Never fails and never leaves input half-consumed.
pub fn optional<T: 'static, S: Clone + 'static>(parser: Parser<T, S>) -> Parser<Option<T>, S> {
    Parser::new(move |state: ParserState<S>| match parser.parse(state.clone()) {
        Ok((value, rest)) => Ok((Some(value), rest)),
        Err(_) => Ok((None, state)),
    })
}

/// At least `min` repetitions of `parser`, collected into a vector.
///
/// The loop runs iteratively and stops at the first failure, so `parser`
/// must consume input when it succeeds; a parser that succeeds on nothing
/// would never let the loop terminate.
pub fn many_n<T: 'static, S: Clone + 'static>(
    parser: Parser<T, S>,
    min: usize,
) -> Parser<Vec<T>, S> {
    Parser::new(move |state: ParserState<S>| {
        let mut acc = Vec::new();
        let mut current = state;
        loop {
            match parser.parse(current.clone()) {
                Ok((value, rest)) => {
                    acc.push(value);
                    current = rest;
                }
                Err(_) => {
                    if acc.len() >= min {
                        return Ok((acc, current));
                    }
                    return Err(ParseError::new(format!(
                        "expected at least {} occurrences, but only found {}",
                        min,
                        acc.len()
                    ))
                    .at(current.pos()));
                }
            }
        }
    })
}

/// Zero or more repetitions.
pub fn many<T: 'static, S: Clone + 'static>(parser: Parser<T, S>) -> Parser<Vec<T>, S> {
    many_n(parser, 0)
}

/// One or more repetitions.
pub fn many1<T: 'static, S: Clone + 'static>(parser: Parser<T, S>) -> Parser<Vec<T>, S> {
    many_n(parser, 1)
}

/// Like [`many_n`], but the values are discarded.
pub fn skip_many_n<T: 'static, S: Clone + 'static>(
    parser: Parser<T, S>,
    min: usize,
) -> Parser<(), S> {
    Parser::new(move |state: ParserState<S>| {
        let mut count = 0usize;
        let mut current = state;
        loop {
            match parser.parse(current.clone()) {
                Ok((_, rest)) => {
                    count += 1;
                    current = rest;
                }
                Err(_) => {
                    if count >= min {
                        return Ok(((), current));
                    }
                    return Err(ParseError::new(format!(
                        "expected to skip at least {} occurrences, but only skipped {}",
                        min, count
                    ))
                    .at(current.pos()));
                }
            }
        }
    })
}

/// Skip zero or more repetitions.
pub fn skip_many<T: 'static, S: Clone + 'static>(parser: Parser<T, S>) -> Parser<(), S> {
    skip_many_n(parser, 0)
}

/// Skip one or more repetitions.
pub fn skip_many1<T: 'static, S: Clone + 'static>(parser: Parser<T, S>) -> Parser<(), S> {
    skip_many_n(parser, 1)
}

/// Separator-delimited repetition: `parser`, then an optional `separator`; a
/// present separator means another element follows, an absent one stops the
/// loop.
///
/// Fails only when no element at all could be parsed. A trailing separator
/// is consumed.
pub fn sep_by<T: 'static, Sep: 'static, S: Clone + 'static>(
    separator: Parser<Sep, S>,
    parser: Parser<T, S>,
) -> Parser<Vec<T>, S> {
    Parser::new(move |state: ParserState<S>| {
        let mut acc = Vec::new();
        let mut current = state;
        loop {
            let (value, rest) = match parser.parse(current.clone()) {
                Ok(ok) => ok,
                Err(_) => {
                    if acc.is_empty() {
                        return Err(ParseError::new("unexpected end of input").at(current.pos()));
                    }
                    return Ok((acc, current));
                }
            };
            match separator.parse(rest.clone()) {
                Ok((_, after_sep)) => {
                    acc.push(value);
                    current = after_sep;
                }
                Err(_) => {
                    acc.push(value);
                    return Ok((acc, rest));
                }
            }
        }
    })
}

/// The literal `start`, then `parser`, then the literal `end`; only
/// `parser`'s value is kept. Any of the three steps failing propagates that
/// step's error.
pub fn between<T: 'static, S: Clone + 'static>(
    start: impl Into<String>,
    end: impl Into<String>,
    parser: Parser<T, S>,
) -> Parser<T, S> {
    let open = literal(start);
    let close = literal(end);
    Parser::new(move |state: ParserState<S>| {
        let (_, rest) = open.parse(state)?;
        let (value, rest) = parser.parse(rest)?;
        let (_, rest) = close.parse(rest)?;
        Ok((value, rest))
    })
}

/// Scan forward, one character at a time, until `parser` would succeed at
/// the current spot. The match itself is left unconsumed.
///
/// Reaching the end of the input without a match is a failure, so this
/// always terminates.
pub fn skip_until<T: 'static, S: Clone + 'static>(parser: Parser<T, S>) -> Parser<(), S> {
    Parser::new(move |state: ParserState<S>| {
        let mut current = state;
        loop {
            if parser.parse(current.clone()).is_ok() {
                return Ok(((), current));
            }
            match current.peek() {
                Some(ch) => current = current.consume_char(ch),
                None => {
                    let mut err = ParseError::new("reached end of input without finding a match")
                        .at(current.pos());
                    if let Some(name) = parser.name() {
                        err = err.expected(name);
                    }
                    return Err(err);
                }
            }
        }
    })
}
