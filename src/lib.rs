//! # Munch - parser combinators over plain text
//!
//! Munch is a small engine for building parsers out of composable pieces.
//! A parser is a plain value: a step function from an input state to either
//! a typed result plus the state after it, or a structured, positioned
//! error. Grammars are built by combining such values; nothing runs until
//! [`run`] is called on a concrete input.
//!
//! ## Architecture Overview
//!
//! The engine is layered bottom-up:
//!
//! 1. **Positions** ([`position`]) - line/column/offset tracking over
//!    consumed characters
//! 2. **State and results** ([`state`]) - immutable input snapshots, the
//!    [`ParseResult`] outcome, and the [`ParseError`] failure value
//! 3. **Primitives** ([`primitives`]) - leaf recognizers: [`literal`],
//!    [`primitives::char`], [`alphabet`], [`digit`], [`skip_spaces`]
//! 4. **Combinators** ([`combinators`]) - everything that builds parsers
//!    from parsers: sequencing, choice with backtracking, repetition
//! 5. **Sequencing sugar** ([`chain!`]) - flat do-notation over
//!    [`Parser::bind`]
//!
//! ## Key Design Decisions
//!
//! ### States are immutable
//! Every successful step allocates a new [`ParserState`]; a failed attempt
//! leaves the original state untouched. Backtracking in [`choice`],
//! [`optional`] and the repetition loops is therefore just "keep the
//! pre-attempt state value and hand it to the next alternative" - there is
//! no undo log and nothing to roll back.
//!
//! ### Errors are values
//! Expected parse failures travel as [`ParseError`] through every layer;
//! only choice, optional and the repetition loops may catch one, and only
//! to try the next alternative or stop their loop. Callers pattern-match
//! the error's message, expectations and position to build diagnostics.
//!
//! ### Repetition is iterative
//! `many` and friends loop instead of recursing, so deeply repetitive input
//! grows a vector, not the call stack.
//!
//! ## Example
//!
//! ```
//! use munch::{char, digit, many1, run, sep_by};
//!
//! let digits = sep_by(char(','), many1(digit()));
//! let (groups, rest) = run(&digits, "1,23,456").unwrap();
//! assert_eq!(groups.len(), 3);
//! assert!(rest.at_end());
//! ```

pub mod combinators;
pub mod position;
pub mod primitives;
mod sequence;
pub mod state;

pub use combinators::{
    between, choice, many, many1, many_n, optional, run, run_with_state, sep_by, skip_many,
    skip_many1, skip_many_n, skip_until, Parser,
};
pub use position::SourcePosition;
pub use primitives::{alphabet, char, digit, literal, skip_spaces};
pub use state::{Parse, ParseError, ParseResult, ParserState};
