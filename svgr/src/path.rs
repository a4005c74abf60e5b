//! Interpreter for the path data mini-language of the `d` attribute.
//!
//! Every command is resolved to absolute coordinates while parsing: relative
//! commands are offset by the running cursor, `H`/`V` become lines and the
//! smooth curves `S`/`T` get their first control point by reflecting the
//! previous one.

use crate::error::Error;
use crate::number::{flag, number, skip_separators};
use crate::types::PathSegment;

/// Path data that stopped parsing at `offset`. `segments` holds everything
/// interpreted before that point.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedPath {
    pub segments: Vec<PathSegment>,
    pub offset: usize,
}

impl From<MalformedPath> for Error {
    fn from(err: MalformedPath) -> Self {
	Error::MalformedPathData { offset: err.offset }
    }
}

/// Parses `d`, silently dropping anything after the first malformed token.
pub fn parse(d: &str) -> Vec<PathSegment> {
    match try_parse(d) {
	Ok(segments) => segments,
	Err(partial) => partial.segments,
    }
}

pub fn try_parse(d: &str) -> Result<Vec<PathSegment>, MalformedPath> {
    let mut interpreter = Interpreter::default();

    match interpreter.run(d) {
	Ok(()) => Ok(interpreter.segments),
	Err(offset) => Err(MalformedPath {
	    segments: interpreter.segments,
	    offset,
	}),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Move,
    Line,
    HorizontalLine,
    VerticalLine,
    CubicCurve,
    SmoothCubicCurve,
    QuadraticCurve,
    SmoothQuadraticCurve,
    EllipticalArc,
    Close,
}

#[derive(Debug, Clone, Copy)]
struct Command {
    kind: Kind,
    relative: bool,
}

impl Command {
    fn from_letter(c: char) -> Option<Command> {
	let kind = match c.to_ascii_uppercase() {
	    'M' => Kind::Move,
	    'L' => Kind::Line,
	    'H' => Kind::HorizontalLine,
	    'V' => Kind::VerticalLine,
	    'C' => Kind::CubicCurve,
	    'S' => Kind::SmoothCubicCurve,
	    'Q' => Kind::QuadraticCurve,
	    'T' => Kind::SmoothQuadraticCurve,
	    'A' => Kind::EllipticalArc,
	    'Z' => Kind::Close,
	    _ => return None,
	};

	Some(Command {
	    kind,
	    relative: c.is_ascii_lowercase(),
	})
    }

    fn arity(self) -> usize {
	match self.kind {
	    Kind::Close => 0,
	    Kind::HorizontalLine | Kind::VerticalLine => 1,
	    Kind::Move | Kind::Line | Kind::SmoothQuadraticCurve => 2,
	    Kind::SmoothCubicCurve | Kind::QuadraticCurve => 4,
	    Kind::CubicCurve => 6,
	    Kind::EllipticalArc => 7,
	}
    }

    /// The command applied to a coordinate group that has no letter of its
    /// own.
    fn repeated(self) -> Command {
	let kind = match self.kind {
	    Kind::Move => Kind::Line,
	    Kind::Close => Kind::Move,
	    other => other,
	};

	Command { kind, ..self }
    }

    fn is_flag(self, index: usize) -> bool {
	self.kind == Kind::EllipticalArc && (index == 3 || index == 4)
    }
}

#[derive(Debug, Clone, Copy)]
enum LastControl {
    None,
    Cubic(f64, f64),
    Quadratic(f64, f64),
}

impl Default for LastControl {
    fn default() -> Self { LastControl::None }
}

#[derive(Debug, Default)]
struct Interpreter {
    segments: Vec<PathSegment>,
    current: (f64, f64),
    subpath_start: (f64, f64),
    last_control: LastControl,
}

impl Interpreter {
    /// Returns the byte offset of the first token that could not be used.
    fn run(&mut self, d: &str) -> Result<(), usize> {
	let offset = |rest: &str| d.len() - rest.len();
	let mut rest = d;
	let mut pending: Option<Command> = None;

	loop {
	    rest = skip_separators(rest);
	    let c = match rest.chars().next() {
		Some(c) => c,
		None => return Ok(()),
	    };

	    let command = if c.is_ascii_alphabetic() {
		let command = Command::from_letter(c).ok_or_else(|| offset(rest))?;
		rest = &rest[c.len_utf8()..];

		if command.kind == Kind::Close {
		    self.close();
		    pending = Some(command.repeated());
		    continue;
		}

		command
	    } else {
		pending.ok_or_else(|| offset(rest))?
	    };

	    let mut args = [0.0; 7];
	    for i in 0..command.arity() {
		rest = skip_separators(rest);
		let lexed = if command.is_flag(i) {
		    flag(rest).map(|(r, f)| (r, if f { 1.0 } else { 0.0 }))
		} else {
		    number(rest)
		};

		match lexed {
		    Ok((r, value)) => {
			args[i] = value;
			rest = r;
		    },
		    Err(_) => return Err(offset(rest)),
		}
	    }

	    self.apply(command, &args);
	    pending = Some(command.repeated());
	}
    }

    fn reflect(&self, control: Option<(f64, f64)>) -> (f64, f64) {
	let (cx, cy) = self.current;
	match control {
	    Some((px, py)) => (2.0 * cx - px, 2.0 * cy - py),
	    None => self.current,
	}
    }

    fn apply(&mut self, command: Command, a: &[f64; 7]) {
	let (cx, cy) = self.current;
	let abs = |x: f64, y: f64| if command.relative { (cx + x, cy + y) } else { (x, y) };

	let (segment, last_control) = match command.kind {
	    Kind::Move => {
		let (x, y) = abs(a[0], a[1]);
		self.subpath_start = (x, y);
		(PathSegment::MoveTo { x, y }, LastControl::None)
	    },
	    Kind::Line => {
		let (x, y) = abs(a[0], a[1]);
		(PathSegment::LineTo { x, y }, LastControl::None)
	    },
	    Kind::HorizontalLine => {
		let (x, _) = abs(a[0], 0.0);
		(PathSegment::LineTo { x, y: cy }, LastControl::None)
	    },
	    Kind::VerticalLine => {
		let (_, y) = abs(0.0, a[0]);
		(PathSegment::LineTo { x: cx, y }, LastControl::None)
	    },
	    Kind::CubicCurve => {
		let (x1, y1) = abs(a[0], a[1]);
		let (x2, y2) = abs(a[2], a[3]);
		let (x, y) = abs(a[4], a[5]);
		(PathSegment::CubicCurveTo { x1, y1, x2, y2, x, y }, LastControl::Cubic(x2, y2))
	    },
	    Kind::SmoothCubicCurve => {
		let previous = match self.last_control {
		    LastControl::Cubic(px, py) => Some((px, py)),
		    _ => None,
		};
		let (x1, y1) = self.reflect(previous);
		let (x2, y2) = abs(a[0], a[1]);
		let (x, y) = abs(a[2], a[3]);
		(PathSegment::CubicCurveTo { x1, y1, x2, y2, x, y }, LastControl::Cubic(x2, y2))
	    },
	    Kind::QuadraticCurve => {
		let (x1, y1) = abs(a[0], a[1]);
		let (x, y) = abs(a[2], a[3]);
		(PathSegment::QuadraticCurveTo { x1, y1, x, y }, LastControl::Quadratic(x1, y1))
	    },
	    Kind::SmoothQuadraticCurve => {
		let previous = match self.last_control {
		    LastControl::Quadratic(px, py) => Some((px, py)),
		    _ => None,
		};
		let (x1, y1) = self.reflect(previous);
		let (x, y) = abs(a[0], a[1]);
		(PathSegment::QuadraticCurveTo { x1, y1, x, y }, LastControl::Quadratic(x1, y1))
	    },
	    Kind::EllipticalArc => {
		let (x, y) = abs(a[5], a[6]);
		let arc = PathSegment::ArcTo {
		    rx: a[0],
		    ry: a[1],
		    x_axis_rotation: a[2],
		    large_arc: a[3] != 0.0,
		    sweep: a[4] != 0.0,
		    x,
		    y,
		};
		(arc, LastControl::None)
	    },
	    Kind::Close => {
		self.close();
		return;
	    },
	};

	if let Some(end) = segment.end_point() {
	    self.current = end;
	}
	self.last_control = last_control;
	self.segments.push(segment);
    }

    fn close(&mut self) {
	self.segments.push(PathSegment::ClosePath);
	self.current = self.subpath_start;
	self.last_control = LastControl::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathSegment::*;

    fn m(x: f64, y: f64) -> PathSegment { MoveTo { x, y } }
    fn l(x: f64, y: f64) -> PathSegment { LineTo { x, y } }

    #[test]
    fn absolute_square() {
	assert_eq!(parse("M0,0 L10,0 L10,10 Z"),
		   vec![m(0.0, 0.0), l(10.0, 0.0), l(10.0, 10.0), ClosePath]);
    }

    #[test]
    fn relative_implicit_repeat() {
	assert_eq!(parse("m0,0 l10,0 10,10"),
		   vec![m(0.0, 0.0), l(10.0, 0.0), l(20.0, 10.0)]);
    }

    #[test]
    fn extra_move_pairs_become_lines() {
	assert_eq!(parse("M0 0 10 10"), vec![m(0.0, 0.0), l(10.0, 10.0)]);
	assert_eq!(parse("m1 1 2 2 1 0"), vec![m(1.0, 1.0), l(3.0, 3.0), l(4.0, 3.0)]);
    }

    #[test]
    fn relative_move_after_close_starts_from_subpath() {
	assert_eq!(parse("m10 10 l5 0 z m1 1"),
		   vec![m(10.0, 10.0), l(15.0, 10.0), ClosePath, m(11.0, 11.0)]);
    }

    #[test]
    fn horizontal_and_vertical_become_lines() {
	assert_eq!(parse("M1 2 H5 v3 h-1 V0"),
		   vec![m(1.0, 2.0), l(5.0, 2.0), l(5.0, 5.0), l(4.0, 5.0), l(4.0, 0.0)]);
    }

    #[test]
    fn coordinates_after_close_start_a_move() {
	assert_eq!(parse("M10,10 L20,10 Z 5,5 6,6"),
		   vec![m(10.0, 10.0), l(20.0, 10.0), ClosePath, m(5.0, 5.0), l(6.0, 6.0)]);
	assert_eq!(parse("m10,10 l10,0 z 5,5"),
		   vec![m(10.0, 10.0), l(20.0, 10.0), ClosePath, m(15.0, 15.0)]);
    }

    #[test]
    fn close_restores_cursor() {
	assert_eq!(parse("M10 10 l5 0 z l1 1"),
		   vec![m(10.0, 10.0), l(15.0, 10.0), ClosePath, l(11.0, 11.0)]);
    }

    #[test]
    fn relative_cubic() {
	assert_eq!(parse("M10 10 c1 1 2 2 3 3")[1],
		   CubicCurveTo { x1: 11.0, y1: 11.0, x2: 12.0, y2: 12.0, x: 13.0, y: 13.0 });
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
	let segments = parse("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
	assert_eq!(segments[2],
		   CubicCurveTo { x1: 10.0, y1: -10.0, x2: 20.0, y2: -10.0, x: 20.0, y: 0.0 });

	let segments = parse("M0 0 C0 10 10 10 10 0 s10 -10 10 0");
	assert_eq!(segments[2],
		   CubicCurveTo { x1: 10.0, y1: -10.0, x2: 20.0, y2: -10.0, x: 20.0, y: 0.0 });
    }

    #[test]
    fn smooth_cubic_without_previous_curve_uses_cursor() {
	assert_eq!(parse("M0 0 L5 5 S10 10 15 5")[2],
		   CubicCurveTo { x1: 5.0, y1: 5.0, x2: 10.0, y2: 10.0, x: 15.0, y: 5.0 });
	// a quadratic is not a match for S
	assert_eq!(parse("M0 0 Q5 10 10 0 S15 5 20 0")[2],
		   CubicCurveTo { x1: 10.0, y1: 0.0, x2: 15.0, y2: 5.0, x: 20.0, y: 0.0 });
    }

    #[test]
    fn smooth_quadratic_chain() {
	let segments = parse("M0 0 Q5 10 10 0 T20 0 T30 0");
	assert_eq!(segments[2], QuadraticCurveTo { x1: 15.0, y1: -10.0, x: 20.0, y: 0.0 });
	assert_eq!(segments[3], QuadraticCurveTo { x1: 25.0, y1: 10.0, x: 30.0, y: 0.0 });
    }

    #[test]
    fn smooth_quadratic_without_previous_curve_uses_cursor() {
	assert_eq!(parse("M3 4 t2 2")[1], QuadraticCurveTo { x1: 3.0, y1: 4.0, x: 5.0, y: 6.0 });
	assert_eq!(parse("M0 0 C1 1 2 2 3 3 T5 5")[2],
		   QuadraticCurveTo { x1: 3.0, y1: 3.0, x: 5.0, y: 5.0 });
    }

    #[test]
    fn arcs() {
	assert_eq!(parse("M0 0 a5 5 0 1 0 10 0")[1], ArcTo {
	    rx: 5.0,
	    ry: 5.0,
	    x_axis_rotation: 0.0,
	    large_arc: true,
	    sweep: false,
	    x: 10.0,
	    y: 0.0,
	});
	assert_eq!(parse("M0 0 A5,5 30 1110,10")[1], ArcTo {
	    rx: 5.0,
	    ry: 5.0,
	    x_axis_rotation: 30.0,
	    large_arc: true,
	    sweep: true,
	    x: 10.0,
	    y: 10.0,
	});
    }

    #[test]
    fn compact_numbers() {
	assert_eq!(parse("M1.5.3L-1-2"), vec![m(1.5, 0.3), l(-1.0, -2.0)]);
	assert_eq!(parse("M 0,0\n\tL 1 , 1"), vec![m(0.0, 0.0), l(1.0, 1.0)]);
    }

    #[test]
    fn truncated_data_keeps_earlier_segments() {
	let d = "M0 0 L10 0 L5";
	assert_eq!(parse(d), vec![m(0.0, 0.0), l(10.0, 0.0)]);
	assert_eq!(try_parse(d), Err(MalformedPath {
	    segments: vec![m(0.0, 0.0), l(10.0, 0.0)],
	    offset: d.len(),
	}));
    }

    #[test]
    fn unknown_command_stops_parsing() {
	assert_eq!(try_parse("M0 0 X5 5 L1 1"),
		   Err(MalformedPath { segments: vec![m(0.0, 0.0)], offset: 5 }));
	assert_eq!(try_parse("M0 0 A5 5 0 2 0 1 1"),
		   Err(MalformedPath { segments: vec![m(0.0, 0.0)], offset: 12 }));
    }

    #[test]
    fn numbers_before_any_command() {
	assert_eq!(try_parse("10 10"), Err(MalformedPath { segments: vec![], offset: 0 }));
	assert_eq!(parse("  "), vec![]);
	assert_eq!(try_parse(""), Ok(vec![]));
    }

    #[test]
    fn malformed_converts_to_error() {
	let err: Error = try_parse("M0 0 L").unwrap_err().into();
	assert!(matches!(err, Error::MalformedPathData { offset: 6 }));
    }

    #[test]
    fn parsing_is_stateless() {
	let d = "M0 0 C0 10 10 10 10 0 S20 -10 20 0 q5 5 10 0 t10 0 z";
	assert_eq!(parse(d), parse(d));
    }
}
