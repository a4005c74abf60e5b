//! Lexers for the numbers embedded in attribute values.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map, map_res, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

/// A signed decimal with an optional exponent.
///
/// No separator is needed between two numbers as long as the boundary is
/// unambiguous, so `1.5.3` lexes as `1.5` followed by `.3` and `3-4` as `3`
/// followed by `-4`. An `e` that is not followed by digits is not consumed.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
	recognize(tuple((
	    opt(one_of("+-")),
	    alt((
		recognize(pair(digit1, opt(pair(char('.'), digit0)))),
		recognize(pair(char('.'), digit1)),
	    )),
	    opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
	))),
	|s: &str| s.parse::<f64>(),
    )(input)
}

/// A single `0` or `1`, as used by the arc flags.
pub fn flag(input: &str) -> IResult<&str, bool> {
    map(one_of("01"), |c| c == '1')(input)
}

/// A run of ASCII digits, nothing else.
pub fn digit_run(input: &str) -> IResult<&str, f64> {
    map_res(digit1, |s: &str| s.parse::<f64>())(input)
}

/// Skips whitespace and at most one comma between arguments.
pub fn skip_separators(input: &str) -> &str {
    let input = input.trim_start();
    match input.strip_prefix(',') {
	Some(rest) => rest.trim_start(),
	None => input,
    }
}

/// Collects up to `limit` numbers from `input` with `lexer`, skipping any
/// character where no number starts.
pub fn scan<F>(mut input: &str, limit: usize, mut lexer: F) -> Vec<f64>
where
    F: FnMut(&str) -> IResult<&str, f64>,
{
    let mut found = Vec::with_capacity(limit);

    while found.len() < limit && !input.is_empty() {
	match lexer(input) {
	    Ok((rest, n)) => {
		found.push(n);
		input = rest;
	    },
	    Err(_) => {
		let mut chars = input.chars();
		chars.next();
		input = chars.as_str();
	    },
	}
    }

    found
}
