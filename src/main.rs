use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use svgr::{parse_file, Document, NumberScan, PathSegment, WalkerOptions};

/// Prints the shapes found in SVG files.
#[derive(Parser, Debug)]
#[command(name = "svgr-dump", version)]
struct Args {
    /// Stop at the first path of each file.
    #[arg(long)]
    single: bool,

    /// Also print everything that was skipped.
    #[arg(long)]
    strict: bool,

    /// Read translate offsets as bare digit runs.
    #[arg(long)]
    legacy_transform: bool,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Args {
    fn options(&self) -> WalkerOptions {
	WalkerOptions {
	    single_shape_only: self.single,
	    strict: self.strict,
	    transform_scan: if self.legacy_transform { NumberScan::DigitRuns } else { NumberScan::SignedDecimal },
	}
    }
}

fn print_segment(segment: &PathSegment) {
    match *segment {
	PathSegment::MoveTo { x, y } => println!("    M {} {}", x, y),
	PathSegment::LineTo { x, y } => println!("    L {} {}", x, y),
	PathSegment::CubicCurveTo { x1, y1, x2, y2, x, y } =>
	    println!("    C {} {} {} {} {} {}", x1, y1, x2, y2, x, y),
	PathSegment::QuadraticCurveTo { x1, y1, x, y } => println!("    Q {} {} {} {}", x1, y1, x, y),
	PathSegment::ArcTo { rx, ry, x_axis_rotation, large_arc, sweep, x, y } =>
	    println!("    A {} {} {} {} {} {} {}", rx, ry, x_axis_rotation, large_arc as u8, sweep as u8, x, y),
	PathSegment::ClosePath => println!("    Z"),
    }
}

fn print_document(document: &Document) {
    for (i, shape) in document.shapes.iter().enumerate() {
	println!("<path> #{} id: {}", i, shape.id().unwrap_or("-"));

	match shape.color() {
	    Some(c) => println!("  fill: rgb({:.3}, {:.3}, {:.3})", c.r, c.g, c.b),
	    None => println!("  fill: none"),
	}
	if let Some(t) = shape.translation() {
	    println!("  translate: {} {}", t.x, t.y);
	}

	shape.segments().iter().for_each(print_segment);
    }

    for diagnostic in &document.diagnostics {
	println!("warning: {}", diagnostic);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
	.with_env_filter(EnvFilter::from_default_env())
	.with_writer(std::io::stderr)
	.init();

    let args = Args::parse();
    let options = args.options();
    let mut failed = 0;

    for file in &args.files {
	println!("{}", file.display());

	match parse_file(file, options.clone()).with_context(|| format!("reading {}", file.display())) {
	    Ok(document) => print_document(&document),
	    Err(err) => {
		error!("{:#}", err);
		failed += 1;
	    },
	}
    }

    if failed > 0 {
	anyhow::bail!("{} of {} files could not be read", failed, args.files.len());
    }

    Ok(())
}
