use munch::{between, chain, char, digit, many1, optional, run, sep_by, skip_spaces, Parser};

const INPUT: &str = "[12, -3, 4096]";

/// A signed decimal integer, with surrounding spaces allowed.
fn signed_integer() -> Parser<i64> {
    chain! {
        skip_spaces();
        let sign = optional(char('-'));
        let digits = many1(digit());
        skip_spaces();
        => {
            let raw: String = digits.into_iter().collect();
            let value: i64 = raw.parse().expect("only digits collected");
            if sign.is_some() { -value } else { value }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let numbers = between("[", "]", sep_by(char(','), signed_integer()));

    let (values, rest) = run(&numbers, INPUT)?;
    log::debug!("finished with {} characters left", rest.remaining().len());

    println!("{INPUT} -> {values:?}");
    Ok(())
}
