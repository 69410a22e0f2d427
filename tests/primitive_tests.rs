//! Behavior of the leaf parsers: literals, single characters, character
//! classes and space skipping.

use munch::{alphabet, char, digit, literal, run, skip_spaces, SourcePosition};

#[test]
fn literal_consumes_exactly_itself() {
    let (value, rest) = run(&literal("abc"), "abc").expect("literal should match");
    assert_eq!(value, "abc");
    assert!(rest.at_end());
    assert_eq!(
        rest.pos(),
        SourcePosition {
            line: 1,
            column: 4,
            offset: 3
        }
    );
}

#[test]
fn literal_leaves_the_tail_untouched() {
    let (value, rest) = run(&literal("abc"), "abcdef").expect("literal should match");
    assert_eq!(value, "abc");
    assert_eq!(rest.remaining(), "def");
}

#[test]
fn empty_literal_always_succeeds() {
    let (value, rest) = run(&literal(""), "anything").expect("empty literal never fails");
    assert_eq!(value, "");
    assert_eq!(rest.remaining(), "anything");
    assert_eq!(rest.pos().offset, 0);
}

#[test]
fn literal_failure_reports_expectation_and_context() {
    let err = run(&literal("let"), "laughing out loud").expect_err("should not match");
    assert_eq!(err.expected, vec!["let".to_string()]);
    assert_eq!(err.found.as_deref(), Some("laughing o"));
    assert_eq!(err.pos.offset, 0);
}

#[test]
fn literal_failure_context_is_capped_at_ten_characters() {
    let err = run(&literal("x"), "abcdefghijklmnop").expect_err("should not match");
    assert_eq!(err.found.as_deref(), Some("abcdefghij"));
}

#[test]
fn char_matches_a_single_character() {
    let (value, rest) = run(&char('x'), "xy").expect("char should match");
    assert_eq!(value, 'x');
    assert_eq!(rest.remaining(), "y");
    assert_eq!(rest.pos().column, 2);
}

#[test]
fn char_failure_names_both_sides() {
    let err = run(&char('x'), "y").expect_err("should not match");
    assert_eq!(err.expected, vec!["x".to_string()]);
    assert_eq!(err.found.as_deref(), Some("y"));
}

#[test]
fn char_fails_on_end_of_input() {
    let err = run(&char('x'), "").expect_err("should not match");
    assert_eq!(err.message, "unexpected end of input");
    assert!(err.found.is_none());
}

#[test]
fn alphabet_accepts_letters_only() {
    let (value, _) = run(&alphabet(), "word").expect("letter should match");
    assert_eq!(value, 'w');

    let err = run(&alphabet(), "1").expect_err("digit is not a letter");
    assert!(err.expected.is_empty());
    assert_eq!(err.message, "expected alphabetic character, but got '1'");
}

#[test]
fn alphabet_fails_on_end_of_input() {
    let err = run(&alphabet(), "").expect_err("nothing to match");
    assert_eq!(err.message, "unexpected end of input");
}

#[test]
fn digit_accepts_digits_only() {
    let (value, _) = run(&digit(), "42").expect("digit should match");
    assert_eq!(value, '4');

    let err = run(&digit(), "a").expect_err("letter is not a digit");
    assert!(err.expected.is_empty());
    assert_eq!(err.message, "expected digit, but got 'a'");
}

#[test]
fn skip_spaces_trims_the_front() {
    let (_, rest) = run(&skip_spaces(), "   abc").expect("skipping never fails");
    assert_eq!(rest.remaining(), "abc");
    assert_eq!(rest.pos().column, 4);
}

#[test]
fn skip_spaces_without_spaces_is_a_no_op() {
    let (_, rest) = run(&skip_spaces(), "abc").expect("skipping never fails");
    assert_eq!(rest.remaining(), "abc");
    assert_eq!(rest.pos().offset, 0);
}

#[test]
fn skip_spaces_stops_at_newlines() {
    let (_, rest) = run(&skip_spaces(), "  \n  x").expect("skipping never fails");
    assert_eq!(rest.remaining(), "\n  x");
    assert_eq!(rest.pos().line, 1);
    assert_eq!(rest.pos().column, 3);
}

#[test]
fn positions_track_lines_through_literals() {
    let (_, rest) = run(&literal("ab\ncd"), "ab\ncd").expect("literal should match");
    assert_eq!(
        rest.pos(),
        SourcePosition {
            line: 2,
            column: 3,
            offset: 5
        }
    );
}
