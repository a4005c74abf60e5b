use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::Color;

/// Decodes a `#rgb` or `#rrggbb` hex string. The `#` is optional.
pub fn parse(s: &str) -> Result<Color> {
    let err = || Error::InvalidColorFormat(String::from(s));
    let hex = s.strip_prefix('#').unwrap_or(s);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
	return Err(err());
    }

    let expanded = match hex.len() {
	6 => String::from(hex),
	3 => hex.chars().flat_map(|c| vec![c, c]).collect(),
	_ => return Err(err()),
    };

    let parse_hex = |s_rep: &str| u8::from_str_radix(s_rep, 16)
	.map(|v| (v as f64) / 255.0)
	.map_err(|_| err());

    let r = parse_hex(&expanded[0..2])?;
    let g = parse_hex(&expanded[2..4])?;
    let b = parse_hex(&expanded[4..6])?;

    Ok(Color::rgb(r, g, b))
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
	parse(s)
    }
}
