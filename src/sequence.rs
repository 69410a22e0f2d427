//! Flat, imperative-looking sequencing sugar over [`Parser::bind`].
//!
//! [`Parser::bind`]: crate::Parser::bind

/// Sequence parsers in do-notation style.
///
/// A chain is a flat list of steps running left to right, with the whole
/// chain stopping at the first failing step and returning that step's error
/// untouched. Steps are `let name = parser;` to keep a value, `parser;` to
/// drop one, and a final `=> expr` producing the chain's result from the
/// bound names. Later steps can use earlier bindings, so grammars that
/// depend on what they just parsed stay flat.
///
/// ```
/// use munch::{chain, char, digit, many1, optional, run};
///
/// let signed = chain! {
///     let sign = optional(char('-'));
///     let digits = many1(digit());
///     => {
///         let raw: String = digits.into_iter().collect();
///         let value: i64 = raw.parse().expect("only digits collected");
///         if sign.is_some() { -value } else { value }
///     }
/// };
///
/// let (value, rest) = run(&signed, "-42").unwrap();
/// assert_eq!(value, -42);
/// assert!(rest.at_end());
/// ```
///
/// Behind the scenes the chain threads every bound value through
/// `Parser::bind` as a growing tuple of pairs, so bound values must be
/// `Clone` and every binding needs a distinct name. Every step after the
/// first runs inside a re-runnable closure, so a parser variable from the
/// surrounding scope has to be cloned into such a step (`p.clone()`);
/// parsers are cheap to clone.
#[macro_export]
macro_rules! chain {
    (@acc [$($names:ident)*], $pat:tt, $acc:expr, => $result:expr) => {
        $acc.map(move |$pat| {
            $(let _ = &$names;)*
            $result
        })
    };
    (@acc [$($names:ident)*], $pat:tt, $acc:expr, let $name:ident = $parser:expr; $($rest:tt)+) => {
        $crate::chain!(
            @acc [$($names)* $name],
            ($pat, $name),
            $acc.bind(move |$pat| {
                $(let _ = &$names;)*
                $parser
            }),
            $($rest)+
        )
    };
    (@acc [$($names:ident)*], $pat:tt, $acc:expr, $parser:expr; $($rest:tt)+) => {
        $crate::chain!(
            @acc [$($names)*],
            ($pat, _),
            $acc.bind(move |$pat| {
                $(let _ = &$names;)*
                $parser
            }),
            $($rest)+
        )
    };
    (let $name:ident = $parser:expr; $($rest:tt)+) => {
        $crate::chain!(@acc [$name], $name, $parser, $($rest)+)
    };
    ($parser:expr; $($rest:tt)+) => {
        $crate::chain!(@acc [], _, $parser, $($rest)+)
    };
}
