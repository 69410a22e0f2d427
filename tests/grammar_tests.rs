//! Example grammars built purely on the public combinator vocabulary: the
//! kind of throwaway lexing this engine exists to make easy.

use munch::{
    between, chain, char, choice, digit, many, many1, optional, run, ParseError, Parser,
    ParserState,
};

/// integer := '-'? digit+
fn integer() -> Parser<i64> {
    chain! {
        let sign = optional(char('-'));
        let digits = many1(digit());
        => {
            let raw: String = digits.into_iter().collect();
            let value: i64 = raw.parse().expect("only digits collected");
            if sign.is_some() { -value } else { value }
        }
    }
}

/// float := '-'? digit+ ('.' digit+)? ('e' ('+' | '-')? digit+)?
fn float() -> Parser<f64> {
    chain! {
        let sign = optional(char('-'));
        let whole = many1(digit());
        let fraction = optional(chain! {
            char('.');
            let digits = many1(digit());
            => digits
        });
        let exponent = optional(chain! {
            char('e');
            let esign = optional(char('+') | char('-'));
            let digits = many1(digit());
            => (esign, digits)
        });
        => {
            let mut raw = String::new();
            if sign.is_some() {
                raw.push('-');
            }
            raw.extend(whole);
            if let Some(digits) = fraction {
                raw.push('.');
                raw.extend(digits);
            }
            if let Some((esign, digits)) = exponent {
                raw.push('e');
                if let Some(esign) = esign {
                    raw.push(esign);
                }
                raw.extend(digits);
            }
            raw.parse::<f64>().expect("shaped like a float")
        }
    }
}

/// string := '"' (escaped-quote | plain-char)* '"'
fn quoted_string() -> Parser<String> {
    let escaped_quote = char('\\') * char('"');
    let plain = Parser::new(|state: ParserState| match state.peek() {
        Some(ch) if ch != '"' && ch != '\\' => Ok((ch, state.consume_char(ch))),
        Some(ch) => {
            Err(ParseError::new(format!("character '{ch}' ends the string")).at(state.pos()))
        }
        None => Err(ParseError::new("unexpected end of input").at(state.pos())),
    });
    between("\"", "\"", many(choice(vec![escaped_quote, plain])))
        >> |chars: Vec<char>| chars.into_iter().collect()
}

#[test]
fn integer_parses_plain_digits() {
    let (value, rest) = run(&integer(), "123").expect("should match");
    assert_eq!(value, 123);
    assert!(rest.at_end());
}

#[test]
fn integer_honors_the_sign() {
    let (value, _) = run(&integer(), "-7").expect("should match");
    assert_eq!(value, -7);
}

#[test]
fn integer_stops_at_the_first_non_digit() {
    let (value, rest) = run(&integer(), "12ab").expect("should match");
    assert_eq!(value, 12);
    assert_eq!(rest.remaining(), "ab");
}

#[test]
fn integer_needs_at_least_one_digit() {
    run(&integer(), "x").expect_err("no digits at all");
    run(&integer(), "-").expect_err("a sign alone is not a number");
}

#[test]
fn float_parses_whole_numbers() {
    let (value, _) = run(&float(), "42").expect("should match");
    assert_eq!(value, 42.0);
}

#[test]
fn float_parses_fraction_and_exponent() {
    let (value, _) = run(&float(), "3.14").expect("should match");
    assert_eq!(value, 3.14);

    let (value, _) = run(&float(), "-0.5e2").expect("should match");
    assert_eq!(value, -50.0);

    let (value, _) = run(&float(), "1e-3").expect("should match");
    assert_eq!(value, 0.001);
}

#[test]
fn quoted_string_returns_the_inner_text() {
    let (value, rest) = run(&quoted_string(), "\"hi there\"").expect("should match");
    assert_eq!(value, "hi there");
    assert!(rest.at_end());
}

#[test]
fn quoted_string_unescapes_quotes() {
    let (value, _) = run(&quoted_string(), "\"a\\\"b\"").expect("should match");
    assert_eq!(value, "a\"b");
}

#[test]
fn quoted_string_requires_the_closing_quote() {
    let err = run(&quoted_string(), "\"abc").expect_err("closing quote is missing");
    assert_eq!(err.pos.offset, 4);
}
