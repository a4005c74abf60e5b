use crate::number::{digit_run, number, scan};
use crate::types::Translation;

const TRANSLATE: &str = "translate";

/// How numbers are picked out of a transform string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberScan {
    /// Signed decimals, scanned from the `translate` keyword onward.
    SignedDecimal,
    /// Bare digit runs anywhere in the string. Signs and decimal points are
    /// not understood, so `translate(-1.5, 2)` reads as `(1, 5)`.
    DigitRuns,
}

impl Default for NumberScan {
    fn default() -> Self { NumberScan::SignedDecimal }
}

/// Extracts a translation with the default number scan.
pub fn parse(transform: &str) -> Option<Translation> {
    parse_with(transform, NumberScan::default())
}

/// Returns `None` unless `transform` mentions `translate` and at least two
/// numbers can be found.
pub fn parse_with(transform: &str, scan_mode: NumberScan) -> Option<Translation> {
    let start = transform.find(TRANSLATE)?;

    let numbers = match scan_mode {
	NumberScan::SignedDecimal => scan(&transform[start + TRANSLATE.len()..], 2, number),
	NumberScan::DigitRuns => scan(transform, 2, digit_run),
    };

    match numbers[..] {
	[x, y] => Some(Translation { x, y }),
	_ => None,
    }
}
