use crate::tag::Shape;

/// Receives each shape as soon as the walker has built it, in document
/// order.
pub trait ShapeSink {
    fn accept(&mut self, shape: &Shape);
}

impl<F> ShapeSink for F
where
    F: FnMut(&Shape),
{
    fn accept(&mut self, shape: &Shape) {
	(self)(shape)
    }
}

#[cfg(feature = "cairo")]
pub use self::cairo_sink::CairoSink;

#[cfg(feature = "cairo")]
mod cairo_sink {
    use std::f64::consts::PI;

    use tracing::debug;

    use super::ShapeSink;
    use crate::tag::Shape;
    use crate::types::PathSegment;

    /// Traces every shape onto a cairo context and fills it with the shape's
    /// color. Shapes without a color are traced but not filled.
    pub struct CairoSink<'a> {
	cr: &'a cairo::Context,
    }

    impl<'a> CairoSink<'a> {
	pub fn new(cr: &'a cairo::Context) -> Self {
	    CairoSink { cr }
	}

	fn trace(&self, shape: &Shape) {
	    let cr = self.cr;
	    let mut current = (0.0, 0.0);
	    let mut start = (0.0, 0.0);

	    for segment in shape.segments() {
		match *segment {
		    PathSegment::MoveTo { x, y } => {
			cr.move_to(x, y);
			start = (x, y);
		    },
		    PathSegment::LineTo { x, y } => cr.line_to(x, y),
		    PathSegment::CubicCurveTo { x1, y1, x2, y2, x, y } => cr.curve_to(x1, y1, x2, y2, x, y),
		    PathSegment::QuadraticCurveTo { x1, y1, x, y } => {
			// cairo has no quadratic curves, raise it to a cubic
			let (x0, y0) = current;
			cr.curve_to(x0 + 2.0 / 3.0 * (x1 - x0),
				    y0 + 2.0 / 3.0 * (y1 - y0),
				    x + 2.0 / 3.0 * (x1 - x),
				    y + 2.0 / 3.0 * (y1 - y),
				    x, y);
		    },
		    PathSegment::ArcTo { rx, ry, x_axis_rotation, large_arc, sweep, x, y } =>
			arc(cr, current, rx, ry, x_axis_rotation, large_arc, sweep, (x, y)),
		    PathSegment::ClosePath => {
			cr.close_path();
			current = start;
			continue;
		    },
		}

		if let Some(end) = segment.end_point() {
		    current = end;
		}
	    }
	}
    }

    impl ShapeSink for CairoSink<'_> {
	fn accept(&mut self, shape: &Shape) {
	    let (dx, dy) = shape.translation().map(|t| (t.x, t.y)).unwrap_or((0.0, 0.0));
	    debug!(id = ?shape.id(), dx, dy, "drawing shape");

	    self.cr.translate(dx, dy);
	    self.cr.new_path();
	    self.trace(shape);

	    if let Some(color) = shape.color() {
		let (r, g, b, a) = color.rgba();
		self.cr.set_source_rgba(r, g, b, a);
		self.cr.fill_preserve();
	    }

	    self.cr.new_path();
	    self.cr.translate(-dx, -dy);
	}
    }

    /// Endpoint to center parameterization of an elliptical arc, drawn as a
    /// scaled circular arc.
    #[allow(clippy::too_many_arguments)]
    fn arc(cr: &cairo::Context,
	   (x1, y1): (f64, f64),
	   rx: f64,
	   ry: f64,
	   rotation: f64,
	   large_arc: bool,
	   sweep: bool,
	   (x2, y2): (f64, f64)) {
	let mut rx = rx.abs();
	let mut ry = ry.abs();
	if rx == 0.0 || ry == 0.0 {
	    cr.line_to(x2, y2);
	    return;
	}

	let phi = rotation * PI / 180.0;
	let (sin, cos) = phi.sin_cos();

	let b11 = (x1 - x2) / 2.0;
	let b21 = (y1 - y2) / 2.0;
	let x1_prime = cos * b11 + sin * b21;
	let y1_prime = -sin * b11 + cos * b21;

	// radii too small to reach the end point are scaled up
	let lambda = x1_prime.powi(2) / rx.powi(2) + y1_prime.powi(2) / ry.powi(2);
	if lambda > 1.0 {
	    rx *= lambda.sqrt();
	    ry *= lambda.sqrt();
	}

	let num = rx.powi(2) * ry.powi(2) - rx.powi(2) * y1_prime.powi(2) - ry.powi(2) * x1_prime.powi(2);
	let den = rx.powi(2) * y1_prime.powi(2) + ry.powi(2) * x1_prime.powi(2);
	let mut r_scalar = if den == 0.0 { 0.0 } else { (num / den).max(0.0).sqrt() };
	if large_arc == sweep {
	    r_scalar = -r_scalar;
	}

	let xc_prime = r_scalar * rx * y1_prime / ry;
	let yc_prime = -r_scalar * ry * x1_prime / rx;

	let xc = cos * xc_prime - sin * yc_prime + (x1 + x2) / 2.0;
	let yc = sin * xc_prime + cos * yc_prime + (y1 + y2) / 2.0;

	let angle = |ux: f64, uy: f64, vx: f64, vy: f64| {
	    let dot = ux * vx + uy * vy;
	    let len = (ux.powi(2) + uy.powi(2)).sqrt() * (vx.powi(2) + vy.powi(2)).sqrt();
	    let a = (dot / len).max(-1.0).min(1.0).acos();
	    if ux * vy - uy * vx < 0.0 { -a } else { a }
	};

	let ux = (x1_prime - xc_prime) / rx;
	let uy = (y1_prime - yc_prime) / ry;
	let vx = (-x1_prime - xc_prime) / rx;
	let vy = (-y1_prime - yc_prime) / ry;

	let theta1 = angle(1.0, 0.0, ux, uy);
	let mut d_theta = angle(ux, uy, vx, vy) % (2.0 * PI);
	if !sweep && d_theta > 0.0 {
	    d_theta -= 2.0 * PI;
	} else if sweep && d_theta < 0.0 {
	    d_theta += 2.0 * PI;
	}

	let mat = cr.get_matrix();
	cr.translate(xc, yc);
	cr.rotate(phi);
	cr.scale(rx, ry);

	if d_theta < 0.0 {
	    cr.arc_negative(0.0, 0.0, 1.0, theta1, theta1 + d_theta);
	} else {
	    cr.arc(0.0, 0.0, 1.0, theta1, theta1 + d_theta);
	}

	cr.set_matrix(mat);
    }
}
