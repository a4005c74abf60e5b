/// An opaque RGB color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
	Color { r, g, b }
    }

    /// The source format has no alpha channel, so this is always 1.
    pub fn alpha(&self) -> f64 { 1.0 }

    pub fn rgba(&self) -> (f64, f64, f64, f64) {
	(self.r, self.g, self.b, self.alpha())
    }
}

/// Offset taken from a `translate(x, y)` transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

/// A single absolute path segment.
///
/// Relative commands, `H`/`V` and the smooth curve shorthands are resolved
/// while parsing, so every coordinate here is absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo {
	x: f64,
	y: f64,
    },
    LineTo {
	x: f64,
	y: f64,
    },
    CubicCurveTo {
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	x: f64,
	y: f64,
    },
    QuadraticCurveTo {
	x1: f64,
	y1: f64,
	x: f64,
	y: f64,
    },
    ArcTo {
	rx: f64,
	ry: f64,
	x_axis_rotation: f64,
	large_arc: bool,
	sweep: bool,
	x: f64,
	y: f64,
    },
    ClosePath,
}

impl PathSegment {
    ///Returns the point the segment ends at, `None` for `ClosePath`
    pub fn end_point(&self) -> Option<(f64, f64)> {
	match *self {
	    PathSegment::MoveTo { x, y }
	    | PathSegment::LineTo { x, y }
	    | PathSegment::CubicCurveTo { x, y, .. }
	    | PathSegment::QuadraticCurveTo { x, y, .. }
	    | PathSegment::ArcTo { x, y, .. } => Some((x, y)),
	    PathSegment::ClosePath => None,
	}
    }

    /// Moves every point of the segment by `(dx, dy)`. Arc radii and
    /// rotation are left alone.
    pub fn translate(self, dx: f64, dy: f64) -> PathSegment {
	match self {
	    PathSegment::MoveTo { x, y } => PathSegment::MoveTo { x: x + dx, y: y + dy },
	    PathSegment::LineTo { x, y } => PathSegment::LineTo { x: x + dx, y: y + dy },
	    PathSegment::CubicCurveTo { x1, y1, x2, y2, x, y } => PathSegment::CubicCurveTo {
		x1: x1 + dx,
		y1: y1 + dy,
		x2: x2 + dx,
		y2: y2 + dy,
		x: x + dx,
		y: y + dy,
	    },
	    PathSegment::QuadraticCurveTo { x1, y1, x, y } => PathSegment::QuadraticCurveTo {
		x1: x1 + dx,
		y1: y1 + dy,
		x: x + dx,
		y: y + dy,
	    },
	    PathSegment::ArcTo { x, y, rx, ry, x_axis_rotation, large_arc, sweep } => PathSegment::ArcTo {
		rx,
		ry,
		x_axis_rotation,
		large_arc,
		sweep,
		x: x + dx,
		y: y + dy,
	    },
	    PathSegment::ClosePath => PathSegment::ClosePath,
	}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_moves_control_points_but_not_radii() {
	let arc = PathSegment::ArcTo {
	    rx: 5.0,
	    ry: 3.0,
	    x_axis_rotation: 30.0,
	    large_arc: true,
	    sweep: false,
	    x: 10.0,
	    y: 10.0,
	};
	assert_eq!(arc.translate(1.0, 2.0), PathSegment::ArcTo {
	    rx: 5.0,
	    ry: 3.0,
	    x_axis_rotation: 30.0,
	    large_arc: true,
	    sweep: false,
	    x: 11.0,
	    y: 12.0,
	});

	let quad = PathSegment::QuadraticCurveTo { x1: 0.0, y1: 0.0, x: 4.0, y: 4.0 };
	assert_eq!(quad.translate(-1.0, 1.0),
		   PathSegment::QuadraticCurveTo { x1: -1.0, y1: 1.0, x: 3.0, y: 5.0 });
	assert_eq!(PathSegment::ClosePath.translate(3.0, 3.0), PathSegment::ClosePath);
    }

    #[test]
    fn end_point() {
	assert_eq!(PathSegment::LineTo { x: 1.0, y: 2.0 }.end_point(), Some((1.0, 2.0)));
	assert_eq!(PathSegment::ClosePath.end_point(), None);
    }

    #[test]
    fn color_alpha_is_opaque() {
	assert_eq!(Color::rgb(0.1, 0.2, 0.3).rgba(), (0.1, 0.2, 0.3, 1.0));
    }
}
