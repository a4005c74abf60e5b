//! Reads the `<path>` elements of an SVG document into plain geometry.
//!
//! ```no_run
//! use svgr::{parse_file, WalkerOptions};
//!
//! let document = parse_file("icon.svg", WalkerOptions::default()).unwrap();
//! for shape in &document.shapes {
//!     println!("{:?} {:?}", shape.color(), shape.segments());
//! }
//! ```
//!
//! Only `<svg>` and `<path>` are recognized by default (and `<g>` with
//! `ElementRegistry::with_groups`). A path contributes its `d`, `fill` and
//! `transform` attributes; everything else is skipped.

pub mod color;
pub mod error;
pub mod number;
pub mod parse;
pub mod path;
pub mod registry;
pub mod sink;
pub mod tag;
pub mod transform;
pub mod types;

pub use error::{Diagnostic, Error, Result};
pub use parse::{
    parse_file, parse_reader, parse_str, parse_str_with_sink, Attributes, Document, DocumentWalker, Flow, State,
    WalkerOptions,
};
pub use registry::ElementRegistry;
pub use sink::ShapeSink;
pub use tag::{Element, ElementKind, Shape};
pub use transform::NumberScan;
pub use types::{Color, PathSegment, Translation};

#[cfg(feature = "cairo")]
pub use sink::CairoSink;
